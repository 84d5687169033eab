use super::find_or_respond;
use crate::entities::EntityKind;
use crate::state::AppState;
use actix_web::{web, HttpResponse};

pub(crate) async fn process(
    kind: web::Data<EntityKind>,
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> HttpResponse {
    let repo = state.repo(*kind.get_ref());
    match find_or_respond(&repo, &id) {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(response) => response,
    }
}
