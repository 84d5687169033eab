use super::{find_or_respond, redirect};
use crate::entities::EntityKind;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use log::error;
use std::collections::HashMap;

/// Current values of the entry, to prefill the edit form.
pub(crate) async fn form(
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

/// Writes the editable fields of the kind in one go. Fields missing from the
/// form take their default (`"False"` for unchecked flags, empty otherwise).
pub(crate) async fn process(
    kind: web::Data<EntityKind>,
    state: web::Data<AppState>,
    id: web::Path<String>,
    form: web::Form<HashMap<String, String>>,
) -> HttpResponse {
    let kind = *kind.get_ref();
    let repo = state.repo(kind);
    if let Err(response) = find_or_respond(&repo, &id) {
        return response;
    }

    let updates: Vec<(&str, &str)> = kind
        .editable_fields()
        .iter()
        .map(|(field, default)| (*field, form.get(*field).map(String::as_str).unwrap_or(*default)))
        .collect();

    if let Err(e) = repo.store.update_fields(&id, &updates) {
        error!("Error updating {} {}: {}", kind.singular(), id, e);
    }
    redirect(kind.detail_path(&id))
}
