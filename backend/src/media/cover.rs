use super::{check_upload, is_still_image, remove_quietly, sanitize_filename, write_new_file};
use super::{MediaError, Upload};
use crate::entities::EntityRepo;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{load_from_memory, DynamicImage, GenericImageView};
use log::info;
use uuid::Uuid;

/// Neither side of a stored cover exceeds this many pixels.
pub const COVER_MAX_DIMENSION: u32 = 800;
pub const COVER_JPEG_QUALITY: u8 = 85;

/// Normalizes `upload` into a cover image for entry `id` and records its
/// file name in the `imagen` column.
///
/// Videos share the extension allow-list but are refused here; they belong
/// in the bulk media list. Nothing is written when the image fails to decode.
pub fn store_cover(repo: &EntityRepo, id: &str, upload: Upload) -> Result<String, MediaError> {
    let ext = check_upload(&upload)?;
    if !is_still_image(&ext) {
        return Err(MediaError::UnsupportedMediaType(upload.filename));
    }

    let encoded = normalize_cover(&upload.bytes)?;
    let filename = cover_filename(repo.kind.singular(), id);
    let path = write_new_file(&repo.upload_dir, &filename, &encoded)?;

    match repo.store.update_field(id, "imagen", &filename) {
        Ok(true) => {
            info!("stored cover {} for {} {}", filename, repo.kind.singular(), id);
            Ok(filename)
        }
        Ok(false) => {
            remove_quietly(&path);
            Err(MediaError::NotFound(id.to_string()))
        }
        Err(e) => {
            remove_quietly(&path);
            Err(e.into())
        }
    }
}

/// Decodes `bytes`, converts to RGB, shrinks to fit the cover bounds and
/// encodes the result as JPEG.
pub fn normalize_cover(bytes: &[u8]) -> Result<Vec<u8>, MediaError> {
    let decoded = load_from_memory(bytes).map_err(MediaError::MediaDecode)?;
    let rgb = DynamicImage::ImageRgb8(decoded.to_rgb8());

    let (width, height) = rgb.dimensions();
    let (target_w, target_h) = bounded_dimensions(width, height, COVER_MAX_DIMENSION);
    let resized = if (target_w, target_h) == (width, height) {
        rgb
    } else {
        rgb.resize_exact(target_w, target_h, FilterType::Lanczos3)
    };

    let mut out = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut out, COVER_JPEG_QUALITY);
        encoder
            .encode_image(&resized.to_rgb8())
            .map_err(MediaError::Encode)?;
    }
    Ok(out)
}

/// Largest size with the same aspect ratio that fits in `max`×`max`.
/// Images already inside the box keep their size.
pub fn bounded_dimensions(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width <= max && height <= max {
        return (width, height);
    }
    let scale = (max as f64 / width as f64).min(max as f64 / height as f64);
    let scaled = |side: u32| ((side as f64 * scale).round() as u32).clamp(1, max);
    (scaled(width), scaled(height))
}

fn cover_filename(prefix: &str, id: &str) -> String {
    let token = Uuid::new_v4().simple().to_string();
    sanitize_filename(&format!("{}_{}_{}.jpg", prefix, id, &token[..16]))
}
