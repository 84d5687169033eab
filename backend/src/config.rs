//! Runtime settings, read from the environment at startup.
//!
//! | Variable | Default |
//! |---|---|
//! | `CITAS_HOST` | `127.0.0.1` |
//! | `CITAS_PORT` | `8080` |
//! | `CITAS_DATA_DIR` | `data` |
//! | `CITAS_UPLOAD_DIR` | `static/uploads` |
//! | `CITAS_MAX_UPLOAD_MB` | `100` |
//!
//! A value that does not parse is reported and replaced by its default.

use log::warn;
use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// Directory holding one CSV file per entity kind.
    pub data_dir: PathBuf,
    /// Root of the per-kind upload directories, served under `/static/uploads`.
    pub upload_root: PathBuf,
    /// Largest accepted request body, in bytes.
    pub max_upload_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            data_dir: PathBuf::from("data"),
            upload_root: PathBuf::from("static/uploads"),
            max_upload_bytes: 100 * 1024 * 1024,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup<L>(lookup: L) -> Self
    where
        L: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let max_upload_mb: usize = load(&lookup, "CITAS_MAX_UPLOAD_MB", 100);
        Self {
            host: lookup("CITAS_HOST").unwrap_or(defaults.host),
            port: load(&lookup, "CITAS_PORT", defaults.port),
            data_dir: lookup("CITAS_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            upload_root: lookup("CITAS_UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_root),
            max_upload_bytes: max_upload_mb.saturating_mul(1024 * 1024),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn load<L, T>(lookup: &L, key: &str, default: T) -> T
where
    L: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value '{raw}': {e}, using default: {default}");
            default
        }),
    }
}

impl Display for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "data in {}, uploads in {}, max upload {} MB",
            self.data_dir.display(),
            self.upload_root.display(),
            self.max_upload_bytes / (1024 * 1024)
        )
    }
}
