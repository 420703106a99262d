// Aggregated per-app memory summary

use serde::Serialize;

/// Column headers for the ranked table, in row order.
pub const TABLE_HEADERS: [&str; 5] = ["Name", "Space", "Alloc", "AvgUse", "Ratio"];

/// One app's allocated-vs-used memory. Only built when the average usage is non-zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadUsageSummary {
    pub name: String,
    pub guid: String,
    pub space_guid: String,
    pub instances: u32,
    pub memory_alloc_bytes: u64,
    pub avg_memory_use_bytes: u64,
    pub ratio: f64,
}

impl WorkloadUsageSummary {
    /// Table row matching [`TABLE_HEADERS`]; ratio is fixed-point with six decimals.
    pub fn table_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.space_guid.clone(),
            self.memory_alloc_bytes.to_string(),
            self.avg_memory_use_bytes.to_string(),
            format!("{:.6}", self.ratio),
        ]
    }
}
