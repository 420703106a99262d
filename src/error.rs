// Typed errors for the command channel and Cloud Controller requests

use std::time::Duration;

/// Failure running a command through the host CLI.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("failed to run `{binary}`: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{binary}` exited with status {status:?}: {stderr}")]
    Exit {
        binary: String,
        status: Option<i32>,
        stderr: String,
    },
}

/// Failure fetching or decoding a Cloud Controller response.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Channel(#[from] ChannelError),
    #[error("request to {path} timed out after {timeout:?}")]
    Timeout { path: String, timeout: Duration },
    #[error("cloud controller error {error_code} ({code}): {description}")]
    Api {
        code: i64,
        error_code: String,
        description: String,
    },
    #[error("invalid JSON from {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
