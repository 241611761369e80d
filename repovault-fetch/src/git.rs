//! Repository cloning via the external git client.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, instrument};

use crate::error::ProcessError;

/// Handle to the system `git` binary.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
}

impl GitCli {
    /// Locates `git` on PATH.
    pub fn locate() -> Result<Self, ProcessError> {
        let program =
            which::which("git").map_err(|_| ProcessError::NotFound("git".to_string()))?;
        Ok(Self { program })
    }

    /// Uses an explicit program path instead of searching PATH.
    pub fn with_program(program: PathBuf) -> Self {
        Self { program }
    }

    /// Clones `owner/name` into `target` over HTTPS, embedding the access
    /// token as basic-auth credentials in the clone URL.
    ///
    /// Blocks until the subprocess exits; there is no timeout. A non-zero
    /// exit is terminal for the whole run. The token never reaches the
    /// logs; only the repository identifies the operation.
    #[instrument(skip(self, token), fields(owner = %owner, name = %name))]
    pub async fn clone_repo(
        &self,
        owner: &str,
        name: &str,
        token: &str,
        target: &Path,
    ) -> Result<(), ProcessError> {
        let url = format!("https://{token}@github.com/{owner}/{name}.git");

        debug!(target = %target.display(), "cloning repository");
        let output = Command::new(&self.program)
            .arg("clone")
            .arg(&url)
            .arg(target)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        let exit_code = output.status.code().unwrap_or(-1);
        if output.status.success() {
            debug!(exit_code, "clone complete");
            Ok(())
        } else {
            Err(ProcessError::NonZeroExit {
                code: exit_code,
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            })
        }
    }
}
