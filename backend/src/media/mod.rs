//! Uploaded photos and videos.
//!
//! Two ways in:
//! - `cover`: one still image per entry, decoded, bounded to 800×800 and
//!   re-encoded as JPEG before its name lands in the `imagen` column.
//! - `bulk`: any number of photos or videos, stored byte for byte and
//!   appended to the `media_files` column.
//!
//! Files of one entity kind share a single flat directory, so every stored
//! name carries a random component to stay unique across entries.

pub mod bulk;
pub mod cover;

use crate::store::StoreError;
use log::warn;
use regex::Regex;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tempfile::NamedTempFile;
use thiserror::Error;

pub use bulk::store_bulk;
pub use cover::store_cover;

/// Extensions accepted by both upload paths.
pub const ALLOWED_EXTENSIONS: [&str; 9] = [
    "png", "jpg", "jpeg", "gif", "webp", "mp4", "webm", "mov", "avi",
];

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_.-]").expect("valid filename pattern"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// A file received from a multipart form.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Name the browser sent, possibly empty.
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("no file was uploaded")]
    MissingFile,

    /// The multipart body could not be read or was too large.
    #[error("invalid upload payload: {0}")]
    Payload(String),

    #[error("uploaded file has no name")]
    EmptyFilename,

    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("could not decode image: {0}")]
    MediaDecode(#[source] image::ImageError),

    #[error("could not encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("record {0} not found")]
    NotFound(String),

    #[error("media worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// Lower-cased extension of `filename` if it is on the allow-list.
pub fn allowed_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Whether `ext` names a still image format, as opposed to a video.
pub fn is_still_image(ext: &str) -> bool {
    mime_guess::from_ext(ext)
        .first()
        .is_some_and(|mime| mime.type_().as_str() == "image")
}

/// Reduces `name` to a safe, flat file name: path components are dropped,
/// whitespace becomes `_`, and anything outside `[A-Za-z0-9_.-]` is removed.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let spaced = WHITESPACE.replace_all(base.trim(), "_");
    let cleaned = UNSAFE_CHARS.replace_all(&spaced, "");
    let cleaned = cleaned.trim_matches(|c| c == '.' || c == '_');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Checks the name of an upload and returns its extension.
fn check_upload(upload: &Upload) -> Result<String, MediaError> {
    if upload.filename.trim().is_empty() {
        return Err(MediaError::EmptyFilename);
    }
    allowed_extension(&upload.filename)
        .ok_or_else(|| MediaError::UnsupportedMediaType(upload.filename.clone()))
}

/// Writes `bytes` to `dir/name` through a temporary file, refusing to
/// replace an existing file.
fn write_new_file(dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf, MediaError> {
    let path = dir.join(name);
    let write_err = |source: io::Error| MediaError::Write {
        path: path.clone(),
        source,
    };

    fs::create_dir_all(dir).map_err(write_err)?;
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(bytes).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist_noclobber(&path)
        .map_err(|e| write_err(e.error))?;
    Ok(path)
}

fn remove_quietly(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        warn!("could not remove orphaned upload {}: {}", path.display(), e);
    }
}
