//! Fetch error types.

use thiserror::Error;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for fetch operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed at the transport level.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error while writing a download to disk.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The retry ceiling was reached without a successful response.
    ///
    /// Always a hard failure; callers never see a half-finished result.
    #[error("Request failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// How many attempts were made.
        attempts: u32,
        /// Description of the last failure.
        last: String,
    },
}

// ============================================================================
// Process Error
// ============================================================================

/// Error type for subprocess operations.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Command not found on PATH.
    #[error("Command not found: {0}")]
    NotFound(String),

    /// Non-zero exit code.
    #[error("Command exited with code {code}: {stderr}")]
    NonZeroExit {
        /// Exit code from the process.
        code: i32,
        /// Standard error output.
        stderr: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
