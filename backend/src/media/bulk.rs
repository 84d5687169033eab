use super::{check_upload, remove_quietly, sanitize_filename, write_new_file};
use super::{MediaError, Upload};
use crate::entities::EntityRepo;
use chrono::Local;
use common::model::media::merge_media_list;
use log::{info, warn};
use std::path::PathBuf;
use uuid::Uuid;

/// Saves every acceptable file of `uploads` unchanged and appends the stored
/// names to the `media_files` column of entry `id`, after the names already
/// there.
///
/// Files without a name or with an extension off the allow-list are skipped.
/// Returns the stored names in upload order.
pub fn store_bulk(repo: &EntityRepo, id: &str, uploads: Vec<Upload>) -> Result<Vec<String>, MediaError> {
    let mut names = Vec::new();
    let mut paths: Vec<PathBuf> = Vec::new();

    for upload in uploads {
        let ext = match check_upload(&upload) {
            Ok(ext) => ext,
            Err(e) => {
                warn!("skipping upload '{}' for {} {}: {}", upload.filename, repo.kind.singular(), id, e);
                continue;
            }
        };
        let name = bulk_filename(&upload.filename, &ext);
        match write_new_file(&repo.upload_dir, &name, &upload.bytes) {
            Ok(path) => {
                paths.push(path);
                names.push(name);
            }
            Err(e) => {
                paths.iter().for_each(|p| remove_quietly(p));
                return Err(e);
            }
        }
    }

    if names.is_empty() {
        return Ok(names);
    }

    let merged = repo
        .store
        .update_field_with(id, "media_files", |existing| merge_media_list(existing, &names));
    match merged {
        Ok(Some(_)) => {
            info!("stored {} media files for {} {}", names.len(), repo.kind.singular(), id);
            Ok(names)
        }
        Ok(None) => {
            paths.iter().for_each(|p| remove_quietly(p));
            Err(MediaError::NotFound(id.to_string()))
        }
        Err(e) => {
            paths.iter().for_each(|p| remove_quietly(p));
            Err(e.into())
        }
    }
}

/// `<YYYYmmdd_HHMMSS>_<8 hex>_<original stem>.<ext>`. The random part keeps
/// two files with the same name uploaded in the same second apart. `ext` is
/// the already checked extension and is always kept, even when nothing of the
/// stem survives sanitizing.
fn bulk_filename(original: &str, ext: &str) -> String {
    let token = Uuid::new_v4().simple().to_string();
    let stem = original
        .rsplit_once('.')
        .map_or(original, |(stem, _)| stem);
    format!(
        "{}_{}_{}.{}",
        Local::now().format("%Y%m%d_%H%M%S"),
        &token[..8],
        sanitize_filename(stem),
        ext
    )
}
