use crate::entities::{EntityKind, EntityRepo};
use crate::state::AppState;
use crate::store::StoreError;
use actix_web::{web, HttpResponse, Responder};
use common::model::record::Record;
use common::requests::{ListQuery, ListResponse, SortMode};
use log::error;
use std::cmp::Ordering;

pub(crate) async fn process(
    kind: web::Data<EntityKind>,
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> impl Responder {
    let kind = *kind.get_ref();
    let mode = query.mode();
    match list_records(&state.repo(kind), mode) {
        Ok(items) => HttpResponse::Ok().json(ListResponse {
            items,
            current_sort: mode,
        }),
        Err(e) => {
            error!("Error listing {}: {}", kind.plural(), e);
            HttpResponse::InternalServerError().body(format!("Error: {}", e))
        }
    }
}

/// All entries of `repo`, in file order or by descending average rating.
/// Entries with equal averages keep their file order.
pub fn list_records(repo: &EntityRepo, mode: SortMode) -> Result<Vec<Record>, StoreError> {
    let mut records = repo.store.load_all()?;
    if mode == SortMode::Rating {
        records.sort_by(|a, b| {
            b.rating_average()
                .partial_cmp(&a.rating_average())
                .unwrap_or(Ordering::Equal)
        });
    }
    Ok(records)
}
