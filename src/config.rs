use crate::output::OutputFormat;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Used when neither `--config` nor `CONFIG_FILE` is given and the file exists.
pub const DEFAULT_CONFIG_FILE: &str = "hall-of-shame.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub cf: CfConfig,
    pub fetch: FetchConfig,
    pub listing: ListingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CfConfig {
    /// Host CLI used as the command channel.
    pub binary: String,
}

impl Default for CfConfig {
    fn default() -> Self {
        Self {
            binary: "cf".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Max stats requests in flight at once.
    pub max_concurrency: usize,
    pub request_timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 2,
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Fail the run when listing apps fails, instead of continuing with what was listed.
    pub strict: bool,
    /// Follow `next_url` past the first page.
    pub follow_pages: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            progress: true,
        }
    }
}

impl AppConfig {
    /// Load from `path`, else `CONFIG_FILE`, else `hall-of-shame.toml` when present, else defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => match std::env::var("CONFIG_FILE") {
                Ok(p) => Some(PathBuf::from(p)),
                Err(_) => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.exists()),
            },
        };
        match path {
            Some(p) => {
                let s = std::fs::read_to_string(&p)
                    .map_err(|e| anyhow::anyhow!("reading config {}: {}", p.display(), e))?;
                Self::load_from_str(&s)
            }
            None => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.cf.binary.is_empty(), "cf.binary must be non-empty");
        anyhow::ensure!(
            self.fetch.max_concurrency > 0,
            "fetch.max_concurrency must be > 0, got {}",
            self.fetch.max_concurrency
        );
        anyhow::ensure!(
            self.fetch.request_timeout_secs > 0,
            "fetch.request_timeout_secs must be > 0, got {}",
            self.fetch.request_timeout_secs
        );
        Ok(())
    }
}
