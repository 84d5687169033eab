use super::{find_or_respond, redirect};
use crate::entities::EntityKind;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use common::requests::EvaluationForm;
use log::error;

/// Stores the three Likert ratings of a café.
pub(crate) async fn process(
    kind: web::Data<EntityKind>,
    state: web::Data<AppState>,
    id: web::Path<String>,
    form: web::Form<EvaluationForm>,
) -> HttpResponse {
    let kind = *kind.get_ref();
    let repo = state.repo(kind);
    if let Err(response) = find_or_respond(&repo, &id) {
        return response;
    }

    if let Err(e) = repo.store.update_fields(&id, &form.into_inner().into_updates()) {
        error!("Error saving evaluation of {} {}: {}", kind.singular(), id, e);
    }
    redirect(kind.detail_path(&id))
}
