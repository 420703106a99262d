// Ranking: most over-provisioned apps first.

use crate::models::WorkloadUsageSummary;
use std::cmp::Ordering;

/// Sort descending by ratio. Ties fall back to name, then guid, so output is stable across runs.
pub fn rank(mut summaries: Vec<WorkloadUsageSummary>) -> Vec<WorkloadUsageSummary> {
    summaries.sort_by(compare);
    summaries
}

fn compare(a: &WorkloadUsageSummary, b: &WorkloadUsageSummary) -> Ordering {
    b.ratio
        .total_cmp(&a.ratio)
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.guid.cmp(&b.guid))
}
