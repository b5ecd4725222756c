//! Snapshot file error types.

use std::path::PathBuf;

/// Errors reading or writing the snapshot file.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Filesystem operation failed
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON serialization or parsing failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File parsed but is not a JSON object
    #[error("snapshot is not a JSON object")]
    NotAnObject,
}
