// Authenticated command channel: requests go through the host `cf` CLI, which owns the session.

use crate::error::ChannelError;
use std::future::Future;
use std::process::Stdio;
use tokio::process::Command;
use tracing::instrument;

/// Runs an opaque command against the platform and returns its output lines.
pub trait CommandChannel: Send + Sync + 'static {
    fn execute(
        &self,
        args: &[&str],
    ) -> impl Future<Output = Result<Vec<String>, ChannelError>> + Send;
}

/// Command channel backed by the `cf` binary (`cf curl <path>`).
#[derive(Debug, Clone)]
pub struct CfCli {
    binary: String,
}

impl CfCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for CfCli {
    fn default() -> Self {
        Self::new("cf")
    }
}

impl CommandChannel for CfCli {
    #[instrument(skip(self), fields(channel = "cf", binary = %self.binary))]
    async fn execute(&self, args: &[&str]) -> Result<Vec<String>, ChannelError> {
        // kill_on_drop: a timed-out request must not leave the child running
        let output = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ChannelError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ChannelError::Exit {
                binary: self.binary.clone(),
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_owned)
            .collect())
    }
}
