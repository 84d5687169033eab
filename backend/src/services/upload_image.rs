use super::multipart::collect_files;
use super::redirect;
use crate::entities::{EntityKind, EntityRepo};
use crate::media::{self, MediaError};
use crate::state::AppState;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use log::{error, warn};
use std::sync::Arc;

/// Replaces the cover image of an entry.
///
/// Whatever happens, the browser goes back to the detail page, or to the
/// listing when the entry does not exist. Rejected or undecodable uploads are
/// logged and change nothing.
pub(crate) async fn process(
    kind: web::Data<EntityKind>,
    state: web::Data<AppState>,
    id: web::Path<String>,
    payload: Multipart,
) -> HttpResponse {
    let kind = *kind.get_ref();
    let id = id.into_inner();
    let repo = state.repo(kind);

    match repo.store.find_by_id(&id) {
        Ok(Some(_)) => {}
        Ok(None) => return redirect(kind.list_path()),
        Err(e) => {
            error!("Error reading {} {}: {}", kind.singular(), id, e);
            return redirect(kind.detail_path(&id));
        }
    }

    match upload_cover(repo, id.clone(), payload, state.max_upload_bytes).await {
        Ok(_) => {}
        Err(
            e @ (MediaError::MissingFile
            | MediaError::EmptyFilename
            | MediaError::UnsupportedMediaType(_)),
        ) => warn!("Cover upload for {} {} ignored: {}", kind.singular(), id, e),
        Err(e) => error!("Error uploading cover for {} {}: {}", kind.singular(), id, e),
    }
    redirect(kind.detail_path(&id))
}

async fn upload_cover(
    repo: Arc<EntityRepo>,
    id: String,
    payload: Multipart,
    limit: usize,
) -> Result<String, MediaError> {
    let upload = collect_files(payload, "imagen", limit)
        .await?
        .into_iter()
        .next()
        .ok_or(MediaError::MissingFile)?;

    tokio::task::spawn_blocking(move || media::store_cover(&repo, &id, upload)).await?
}
