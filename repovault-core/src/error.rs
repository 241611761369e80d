//! Core error types for `RepoVault`.

use thiserror::Error;

/// Core error type for `RepoVault` operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
