use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// A data row does not line up with the header.
    #[error("malformed record in {path} at line {line}: expected {expected} fields, found {found}")]
    MalformedRecord {
        path: PathBuf,
        line: u64,
        expected: u64,
        found: u64,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Rewriting or appending to the store failed. The file on disk is left
    /// as it was before the operation.
    #[error("failed to write {path}: {source}")]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("record id {0} already exists")]
    DuplicateId(String),

    #[error("record has no id")]
    MissingId,
}

impl StoreError {
    pub(crate) fn read(path: &std::path::Path, source: csv::Error) -> Self {
        if let csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } = source.kind()
        {
            return StoreError::MalformedRecord {
                path: path.to_path_buf(),
                line: pos.as_ref().map(|p| p.line()).unwrap_or(0),
                expected: *expected_len,
                found: *len,
            };
        }
        StoreError::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn write(path: &std::path::Path, source: impl Into<std::io::Error>) -> Self {
        StoreError::StorageWrite {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
