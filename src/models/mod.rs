// Domain models: listed apps, instance stats, aggregated summaries

mod instance;
mod summary;
mod workload;

pub use instance::{
    AppInstanceStat, InstanceRuntimeStat, InstanceState, InstanceStatDetail, InstanceUsage,
};
pub use summary::{TABLE_HEADERS, WorkloadUsageSummary};
pub use workload::{
    AppSearchEntity, AppSearchMetadata, AppSearchResource, AppSearchResults, WorkloadDescriptor,
};
