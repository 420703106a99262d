// Per-instance runtime stats models (/v2/apps/{guid}/stats)

use serde::Deserialize;

/// App instance state as reported by the Cloud Controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InstanceState {
    Running,
    Starting,
    Crashed,
    Down,
    #[default]
    Unknown,
}

impl InstanceState {
    /// Parse from a Cloud Controller state string (e.g. "RUNNING", "crashed").
    pub fn from_cf(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "RUNNING" => InstanceState::Running,
            "STARTING" => InstanceState::Starting,
            "CRASHED" => InstanceState::Crashed,
            "DOWN" => InstanceState::Down,
            _ => InstanceState::Unknown,
        }
    }
}

/// One instance entry of the stats endpoint. Only the fields the ranking reads are decoded;
/// `null` and missing both mean zero.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppInstanceStat {
    pub state: Option<String>,
    pub stats: Option<InstanceStatDetail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstanceStatDetail {
    pub mem_quota: Option<u64>,
    pub usage: Option<InstanceUsage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstanceUsage {
    pub mem: Option<u64>,
}

/// Runtime sample of one instance: state, memory quota and resident usage in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceRuntimeStat {
    pub state: InstanceState,
    pub memory_quota_bytes: u64,
    pub memory_usage_bytes: u64,
}

impl From<&AppInstanceStat> for InstanceRuntimeStat {
    fn from(s: &AppInstanceStat) -> Self {
        let detail = s.stats.as_ref();
        Self {
            state: s
                .state
                .as_deref()
                .map(InstanceState::from_cf)
                .unwrap_or_default(),
            memory_quota_bytes: detail.and_then(|d| d.mem_quota).unwrap_or_default(),
            memory_usage_bytes: detail
                .and_then(|d| d.usage.as_ref())
                .and_then(|u| u.mem)
                .unwrap_or_default(),
        }
    }
}
