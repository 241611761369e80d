//! Backup error types.

use thiserror::Error;

use repovault_fetch::{FetchError, ProcessError};

/// Error type for backup operations. Any variant aborts the run.
#[derive(Debug, Error)]
pub enum BackupError {
    /// Request layer failure (transport, rate limit, retry exhaustion).
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Git clone subprocess failure.
    #[error("Clone failed: {0}")]
    Process(#[from] ProcessError),

    /// Serialization error while writing a snapshot.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error while walking a cloned working tree.
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// A downloaded asset resolved to a path without a usable filename.
    #[error("Invalid asset path: {0}")]
    InvalidPath(String),
}
