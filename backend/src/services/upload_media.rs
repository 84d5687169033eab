use super::multipart::collect_files;
use super::{find_or_respond, redirect};
use crate::entities::{EntityKind, EntityRepo};
use crate::media::{self, MediaError};
use crate::state::AppState;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use log::error;
use std::sync::Arc;

/// Adds photos and videos to an entry's media list.
pub(crate) async fn process(
    kind: web::Data<EntityKind>,
    state: web::Data<AppState>,
    id: web::Path<String>,
    payload: Multipart,
) -> HttpResponse {
    let kind = *kind.get_ref();
    let id = id.into_inner();
    let repo = state.repo(kind);
    if let Err(response) = find_or_respond(&repo, &id) {
        return response;
    }

    if let Err(e) = upload_media(repo, id.clone(), payload, state.max_upload_bytes).await {
        error!("Error uploading media for {} {}: {}", kind.singular(), id, e);
    }
    redirect(kind.detail_path(&id))
}

async fn upload_media(
    repo: Arc<EntityRepo>,
    id: String,
    payload: Multipart,
    limit: usize,
) -> Result<Vec<String>, MediaError> {
    let uploads = collect_files(payload, "media_files", limit).await?;
    tokio::task::spawn_blocking(move || media::store_bulk(&repo, &id, uploads)).await?
}
