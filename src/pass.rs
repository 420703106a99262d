// One aggregation pass: list apps, aggregate stats, rank.

use crate::aggregator::{self, AggregationReport, AggregatorConfig};
use crate::cf_channel::CommandChannel;
use crate::cf_repo::CfRepo;
use crate::error::FetchError;
use crate::models::WorkloadUsageSummary;
use crate::progress::Progress;
use crate::ranking;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct RankedPass {
    pub ranked: Vec<WorkloadUsageSummary>,
    pub report: AggregationReport,
}

/// Only a listing failure (strict listing) fails the pass; per-app failures are skipped.
pub async fn run_pass<C: CommandChannel>(
    repo: Arc<CfRepo<C>>,
    progress: Arc<dyn Progress>,
    config: &AggregatorConfig,
) -> Result<RankedPass, FetchError> {
    let workloads = repo.list_workloads().await?;
    let aggregation = aggregator::run(repo, workloads, progress, config).await;
    Ok(RankedPass {
        ranked: ranking::rank(aggregation.summaries),
        report: aggregation.report,
    })
}
