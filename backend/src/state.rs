//! State shared by every actix worker.
//!
//! Workers each receive a clone of `AppState`; the stores sit behind `Arc`s so
//! all workers serialize their writes through the same per-store lock.

use crate::config::Settings;
use crate::entities::{EntityKind, EntityRepo};
use log::{info, warn};
use std::fs;
use std::io;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    cafes: Arc<EntityRepo>,
    outings: Arc<EntityRepo>,
    /// Upper bound on the bytes read from one multipart upload.
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn open(settings: &Settings) -> Self {
        let open = |kind| Arc::new(EntityRepo::open(kind, &settings.data_dir, &settings.upload_root));
        Self {
            cafes: open(EntityKind::Cafe),
            outings: open(EntityKind::Outing),
            max_upload_bytes: settings.max_upload_bytes,
        }
    }

    pub fn repo(&self, kind: EntityKind) -> Arc<EntityRepo> {
        match kind {
            EntityKind::Cafe => Arc::clone(&self.cafes),
            EntityKind::Outing => Arc::clone(&self.outings),
        }
    }

    /// Creates the upload directory of every entity kind.
    pub fn ensure_upload_dirs(&self) -> io::Result<()> {
        for kind in EntityKind::ALL {
            let repo = self.repo(kind);
            fs::create_dir_all(&repo.upload_dir)?;
            info!("Uploads for {} go to {}", kind.plural(), repo.upload_dir.display());
        }
        Ok(())
    }

    /// Logs where each store lives and the layout of its header.
    pub fn log_stores(&self) {
        for kind in EntityKind::ALL {
            let repo = self.repo(kind);
            match repo.store.schema() {
                Ok(schema) => info!(
                    "{} stored in {} (schema v{}, {} columns)",
                    kind.plural(),
                    repo.store.path().display(),
                    schema.version(),
                    schema.names().count()
                ),
                Err(e) => warn!("{} store {} is unreadable: {}", kind.plural(), repo.store.path().display(), e),
            }
        }
    }
}
