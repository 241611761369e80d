//! Backup run configuration.

use std::path::PathBuf;

use crate::error::CoreError;

/// Configuration for one backup run.
///
/// All three fields are required; they come from CLI flags or environment
/// variables (`GITHUB_USERNAME`, `GITHUB_TOKEN`, `REPOVAULT_DEST`).
#[derive(Debug, Clone)]
pub struct BackupConfig {
    /// GitHub account whose repositories are backed up.
    pub username: String,
    /// Personal access token used for API calls and the clone URL.
    pub token: String,
    /// Destination directory. Destructively reset at the start of each run.
    pub dest: PathBuf,
}

impl BackupConfig {
    /// Creates a configuration, rejecting empty fields.
    pub fn new(
        username: impl Into<String>,
        token: impl Into<String>,
        dest: impl Into<PathBuf>,
    ) -> Result<Self, CoreError> {
        let config = Self {
            username: username.into(),
            token: token.into(),
            dest: dest.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates that no required field is empty.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.username.is_empty() {
            return Err(CoreError::InvalidConfig("username is empty".to_string()));
        }
        if self.token.is_empty() {
            return Err(CoreError::InvalidConfig("token is empty".to_string()));
        }
        if self.dest.as_os_str().is_empty() {
            return Err(CoreError::InvalidConfig(
                "destination path is empty".to_string(),
            ));
        }
        Ok(())
    }
}
