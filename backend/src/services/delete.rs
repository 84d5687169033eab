use super::redirect;
use crate::entities::EntityKind;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use log::{error, info};

pub(crate) async fn process(
    kind: web::Data<EntityKind>,
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> HttpResponse {
    let kind = *kind.get_ref();
    match state.repo(kind).store.delete_by_id(&id) {
        Ok(deleted) => {
            if deleted {
                info!("Deleted {} {}", kind.singular(), id);
            }
            redirect(kind.list_path())
        }
        Err(e) => {
            error!("Error deleting {} {}: {}", kind.singular(), id, e);
            redirect(kind.detail_path(&id))
        }
    }
}
