//! Snapshot store errors

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    /// One half of the metadata/payload pair is missing
    #[error("Snapshot file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Metadata document is not valid JSON or is missing fields
    #[error("Malformed snapshot metadata in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to encode snapshot metadata: {0}")]
    Encode(serde_json::Error),

    #[error("Invalid owner address {owner:?} in {}", path.display())]
    InvalidOwner { path: PathBuf, owner: String },

    #[error("Invalid snapshot name {0:?}")]
    InvalidName(String),
}

impl SnapshotError {
    pub(crate) fn from_io(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            SnapshotError::NotFound { path }
        } else {
            SnapshotError::Io { path, source }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SnapshotError::NotFound { .. })
    }
}
