//! JSON snapshot persistence and destination reset.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::BackupError;

/// Serializes `data` as pretty JSON to `path`, creating parent
/// directories as needed.
pub async fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<(), BackupError> {
    debug!(path = %path.display(), "writing snapshot");

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_string_pretty(data)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}

/// Destructively resets the destination directory: removes it with
/// everything in it, then recreates it empty.
///
/// Irreversible. Every run starts here, which is why a run is a complete,
/// independent snapshot and why resume is not supported.
pub async fn reset_dest(dest: &Path) -> Result<(), BackupError> {
    if dest.exists() {
        warn!(path = %dest.display(), "resetting destination directory, previous contents are discarded");
        tokio::fs::remove_dir_all(dest).await?;
    }
    tokio::fs::create_dir_all(dest).await?;
    Ok(())
}
