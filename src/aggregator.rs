// Aggregation pass: bounded fan-out over listed apps, one stats fetch per app.
// Summaries are collected into a mutex-guarded Vec; the pass returns once every task has joined.

use crate::cf_channel::CommandChannel;
use crate::cf_repo::CfRepo;
use crate::models::{InstanceRuntimeStat, InstanceState, WorkloadDescriptor, WorkloadUsageSummary};
use crate::progress::Progress;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinSet;
use tracing::Instrument;

/// Message handed to the progress sink once every app has been processed.
pub const DONE_MESSAGE: &str = "Done!";

/// Aggregation tuning.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Max stats requests in flight at once.
    pub max_concurrency: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self { max_concurrency: 2 }
    }
}

/// Why an app produced no summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    FetchFailed,
    NotRunning,
    NoInstances,
    ZeroUsage,
    TaskFailed,
}

/// Per-pass counts, logged at the end of [`run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationReport {
    pub dispatched: usize,
    pub summarized: usize,
    pub fetch_failed: usize,
    pub not_running: usize,
    pub no_instances: usize,
    pub zero_usage: usize,
    pub task_failed: usize,
}

impl AggregationReport {
    fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::FetchFailed => self.fetch_failed += 1,
            SkipReason::NotRunning => self.not_running += 1,
            SkipReason::NoInstances => self.no_instances += 1,
            SkipReason::ZeroUsage => self.zero_usage += 1,
            SkipReason::TaskFailed => self.task_failed += 1,
        }
    }

    pub fn skipped(&self) -> usize {
        self.fetch_failed + self.not_running + self.no_instances + self.zero_usage + self.task_failed
    }
}

/// Unordered summaries plus the pass report.
#[derive(Debug, Clone)]
pub struct Aggregation {
    pub summaries: Vec<WorkloadUsageSummary>,
    pub report: AggregationReport,
}

/// Reduce one app's instance stats to a summary.
///
/// Instance "0" must be RUNNING and supplies the allocation. The average divides by the
/// number of reported instances, not the declared count, using integer division.
pub fn summarize(
    workload: &WorkloadDescriptor,
    stats: &BTreeMap<String, InstanceRuntimeStat>,
) -> Result<WorkloadUsageSummary, SkipReason> {
    if stats.is_empty() {
        return Err(SkipReason::NoInstances);
    }
    let first = stats.get("0").ok_or(SkipReason::NotRunning)?;
    if first.state != InstanceState::Running {
        return Err(SkipReason::NotRunning);
    }

    let memory_alloc_bytes = first.memory_quota_bytes;
    let total_usage = stats
        .values()
        .fold(0u64, |acc, s| acc.saturating_add(s.memory_usage_bytes));
    let avg_memory_use_bytes = total_usage / stats.len() as u64;
    if avg_memory_use_bytes == 0 {
        return Err(SkipReason::ZeroUsage);
    }

    Ok(WorkloadUsageSummary {
        name: workload.name.clone(),
        guid: workload.guid.clone(),
        space_guid: workload.space_guid.clone(),
        instances: workload.instances,
        memory_alloc_bytes,
        avg_memory_use_bytes,
        ratio: memory_alloc_bytes as f64 / avg_memory_use_bytes as f64,
    })
}

/// Fetches stats for every app with at most `max_concurrency` requests in flight and
/// summarizes each. Per-app failures are skipped; progress advances once per app.
pub async fn run<C: CommandChannel>(
    repo: Arc<CfRepo<C>>,
    workloads: Vec<WorkloadDescriptor>,
    progress: Arc<dyn Progress>,
    config: &AggregatorConfig,
) -> Aggregation {
    let max_concurrency = config.max_concurrency.max(1);
    let permits = Arc::new(Semaphore::new(max_concurrency));
    let results = Arc::new(Mutex::new(Vec::with_capacity(workloads.len())));
    let mut report = AggregationReport {
        dispatched: workloads.len(),
        ..Default::default()
    };

    progress.start(workloads.len() as u64);

    let mut tasks = JoinSet::new();
    for workload in workloads {
        let repo = repo.clone();
        let permits = permits.clone();
        let results = results.clone();
        let progress = progress.clone();
        let span = tracing::debug_span!("aggregate", guid = %workload.guid, app = %workload.name);

        tasks.spawn(
            async move {
                let stats = {
                    // `permits` is never closed, so acquisition only waits
                    let _permit = permits.acquire_owned().await;
                    repo.fetch_stats(&workload.guid).await
                };
                progress.increment();

                let stats = match stats {
                    Ok(s) => s,
                    Err(e) => {
                        tracing::debug!(error = %e, operation = "fetch_stats", "skipping app");
                        return Err(SkipReason::FetchFailed);
                    }
                };

                let summary = summarize(&workload, &stats).inspect_err(|reason| {
                    tracing::debug!(?reason, instances = stats.len(), "skipping app");
                })?;
                results.lock().await.push(summary);
                Ok(())
            }
            .instrument(span),
        );
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(())) => report.summarized += 1,
            Ok(Err(reason)) => report.record_skip(reason),
            Err(e) => {
                // A panicked task never reached its increment
                progress.increment();
                tracing::warn!(error = %e, "aggregation task failed");
                report.record_skip(SkipReason::TaskFailed);
            }
        }
    }

    progress.finish(DONE_MESSAGE);

    tracing::info!(
        dispatched = report.dispatched,
        summarized = report.summarized,
        fetch_failed = report.fetch_failed,
        not_running = report.not_running,
        no_instances = report.no_instances,
        zero_usage = report.zero_usage,
        task_failed = report.task_failed,
        max_concurrency,
        "aggregation pass complete"
    );

    let summaries = std::mem::take(&mut *results.lock().await);
    Aggregation { summaries, report }
}
