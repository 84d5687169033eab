use super::redirect;
use crate::entities::EntityKind;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use log::{error, info};

/// Creates an entry with default values and sends the browser to its edit
/// form.
pub(crate) async fn process(kind: web::Data<EntityKind>, state: web::Data<AppState>) -> HttpResponse {
    let kind = *kind.get_ref();
    match state.repo(kind).store.insert_new(kind.seed_record()) {
        Ok(id) => {
            info!("Created {} {}", kind.singular(), id);
            redirect(kind.edit_path(&id))
        }
        Err(e) => {
            error!("Error creating {}: {}", kind.singular(), e);
            HttpResponse::InternalServerError().body(format!("Error: {}", e))
        }
    }
}
