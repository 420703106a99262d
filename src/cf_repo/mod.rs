// Cloud Controller v2 access: list apps, fetch per-instance stats.

mod parse;

use crate::cf_channel::CommandChannel;
use crate::error::FetchError;
use crate::models::{AppSearchResults, InstanceRuntimeStat, WorkloadDescriptor};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, instrument, warn};

const APPS_PATH: &str = "/v2/apps";

/// Request and listing behaviour for [`CfRepo`].
#[derive(Debug, Clone)]
pub struct CfRepoConfig {
    pub request_timeout: Duration,
    /// Return listing failures instead of degrading to the apps collected so far.
    pub strict_listing: bool,
    /// Follow `next_url` instead of reading only the first page.
    pub follow_pages: bool,
}

impl Default for CfRepoConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            strict_listing: false,
            follow_pages: false,
        }
    }
}

pub fn stats_path(guid: &str) -> String {
    format!("{APPS_PATH}/{guid}/stats")
}

pub struct CfRepo<C> {
    channel: C,
    config: CfRepoConfig,
}

impl<C: CommandChannel> CfRepo<C> {
    pub fn new(channel: C, config: CfRepoConfig) -> Self {
        Self { channel, config }
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// `cf curl <path>` with the per-request timeout; returns the joined body.
    async fn curl(&self, path: &str) -> Result<String, FetchError> {
        let timeout = self.config.request_timeout;
        let lines = tokio::time::timeout(timeout, self.channel.execute(&["curl", path]))
            .await
            .map_err(|_| FetchError::Timeout {
                path: path.to_string(),
                timeout,
            })??;
        Ok(parse::join_output(&lines))
    }

    async fn fetch_app_page(&self, path: &str) -> Result<AppSearchResults, FetchError> {
        let body = self.curl(path).await?;
        parse::parse_app_page(path, &body)
    }

    /// Lists apps visible to the current session.
    ///
    /// Lenient by default: a failed or malformed page is logged and the apps read so far are
    /// returned. With `strict_listing` the error is returned instead.
    #[instrument(skip(self), fields(repo = "cf", operation = "list_workloads"))]
    pub async fn list_workloads(&self) -> Result<Vec<WorkloadDescriptor>, FetchError> {
        let mut workloads = Vec::new();
        let mut next = Some(APPS_PATH.to_string());
        let mut pages = 0u32;
        let mut skipped_resources = 0usize;

        while let Some(path) = next.take() {
            let page = match self.fetch_app_page(&path).await {
                Ok(p) => p,
                Err(e) if !self.config.strict_listing => {
                    warn!(
                        error = %e,
                        path = %path,
                        apps_listed = workloads.len(),
                        "listing apps failed; continuing with what was listed"
                    );
                    break;
                }
                Err(e) => return Err(e),
            };
            pages += 1;
            skipped_resources += page.skipped;
            workloads.extend(page.resources.into_iter().map(WorkloadDescriptor::from));

            if self.config.follow_pages {
                next = page.next_url.filter(|url| !url.is_empty() && *url != path);
            }
        }

        debug!(pages, apps = workloads.len(), skipped_resources, "apps listed");
        Ok(workloads)
    }

    /// Fetches per-instance stats for one app, keyed by instance index ("0", "1", ...).
    #[instrument(skip(self), fields(repo = "cf", operation = "fetch_stats"))]
    pub async fn fetch_stats(
        &self,
        guid: &str,
    ) -> Result<BTreeMap<String, InstanceRuntimeStat>, FetchError> {
        let path = stats_path(guid);
        let body = self.curl(&path).await?;
        parse::parse_stats(&path, &body)
    }
}
