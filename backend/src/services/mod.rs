//! HTTP surface of the application.
//!
//! Both entity kinds expose the same set of routes, built from the URL
//! segments of their `EntityKind`. Each resource carries its kind as resource
//! data, so one handler serves cafés and outings alike.
//!
//! Mutating routes answer with a redirect, like the HTML forms they back:
//! - success goes to the detail (or listing) page.
//! - a failure is logged and also redirects to the detail page, leaving the
//!   entry as it was.
//!
//! Read routes answer JSON.

mod create;
mod delete;
mod detail;
mod edit;
mod evaluation;
mod google_photos;
mod list;
mod multipart;
mod upload_image;
mod upload_media;


use crate::entities::{EntityKind, EntityRepo};
use actix_web::http::header;
use actix_web::web::{self, get, post, resource, ServiceConfig};
use actix_web::HttpResponse;
use common::model::record::Record;
use log::error;

/// Registers the routes of every entity kind.
pub fn configure_routes(cfg: &mut ServiceConfig) {
    for kind in EntityKind::ALL {
        register(cfg, kind);
    }
}

fn register(cfg: &mut ServiceConfig, kind: EntityKind) {
    let singular = kind.singular();
    let data = || web::Data::new(kind);

    cfg.service(
        resource(kind.list_path())
            .app_data(data())
            .route(get().to(list::process)),
    )
    .service(
        resource(format!("/add-{singular}"))
            .app_data(data())
            .route(post().to(create::process)),
    )
    .service(
        resource(format!("/{singular}/{{id}}"))
            .app_data(data())
            .route(get().to(detail::process)),
    )
    .service(
        resource(format!("/edit-{singular}/{{id}}"))
            .app_data(data())
            .route(get().to(edit::form))
            .route(post().to(edit::process)),
    )
    .service(
        resource(format!("/delete-{singular}/{{id}}"))
            .app_data(data())
            .route(post().to(delete::process)),
    )
    .service(
        resource(format!("/{singular}/{{id}}/save-google-photos"))
            .app_data(data())
            .route(post().to(google_photos::process)),
    )
    .service(
        resource(format!("/{singular}/{{id}}/upload-image"))
            .app_data(data())
            .route(post().to(upload_image::process)),
    )
    .service(
        resource(format!("/{singular}/{{id}}/upload-media"))
            .app_data(data())
            .route(post().to(upload_media::process)),
    );

    if kind.has_evaluation() {
        cfg.service(
            resource(format!("/{singular}/{{id}}/save-evaluation"))
                .app_data(data())
                .route(post().to(evaluation::process)),
        );
    }
}

fn redirect(location: String) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Looks up entry `id`, turning "not found" and read failures into the
/// response the caller should send instead.
fn find_or_respond(repo: &EntityRepo, id: &str) -> Result<Record, HttpResponse> {
    match repo.store.find_by_id(id) {
        Ok(Some(record)) => Ok(record),
        Ok(None) => Err(HttpResponse::NotFound().body(repo.kind.not_found_message())),
        Err(e) => {
            error!("Error reading {} {}: {}", repo.kind.singular(), id, e);
            Err(HttpResponse::InternalServerError().body(format!("Error: {}", e)))
        }
    }
}
