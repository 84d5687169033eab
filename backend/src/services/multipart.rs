use crate::media::{MediaError, Upload};
use actix_multipart::Multipart;
use futures_util::StreamExt;

/// Reads every file sent under the form field `field_name`.
///
/// Parts with another name are drained and ignored. Reading stops with
/// `MediaError::Payload` once the collected files exceed `limit` bytes.
pub async fn collect_files(
    mut payload: Multipart,
    field_name: &str,
    limit: usize,
) -> Result<Vec<Upload>, MediaError> {
    let mut uploads = Vec::new();
    let mut total = 0usize;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| MediaError::Payload(e.to_string()))?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        if name.as_deref() != Some(field_name) {
            while let Some(chunk) = field.next().await {
                chunk.map_err(|e| MediaError::Payload(e.to_string()))?;
            }
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .unwrap_or_default();

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| MediaError::Payload(e.to_string()))?;
            total += chunk.len();
            if total > limit {
                return Err(MediaError::Payload(format!(
                    "upload exceeds the {} byte limit",
                    limit
                )));
            }
            bytes.extend_from_slice(&chunk);
        }
        uploads.push(Upload { filename, bytes });
    }

    Ok(uploads)
}
