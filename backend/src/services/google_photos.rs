use super::{find_or_respond, redirect};
use crate::entities::EntityKind;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use common::requests::GooglePhotosForm;
use log::error;

pub(crate) async fn process(
    kind: web::Data<EntityKind>,
    state: web::Data<AppState>,
    id: web::Path<String>,
    form: web::Form<GooglePhotosForm>,
) -> HttpResponse {
    let kind = *kind.get_ref();
    let repo = state.repo(kind);
    if let Err(response) = find_or_respond(&repo, &id) {
        return response;
    }

    let link = form.into_inner().google_photos_link.unwrap_or_default();
    if let Err(e) = repo.store.update_field(&id, "google_photos_link", &link) {
        error!("Error saving photos link of {} {}: {}", kind.singular(), id, e);
    }
    redirect(kind.detail_path(&id))
}
