// Render the ranked summaries as a table or JSON.

use crate::models::{TABLE_HEADERS, WorkloadUsageSummary};
use clap::ValueEnum;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Pretty-printed JSON array
    Json,
}

/// Header row is always present, even with no apps.
pub fn render_table(summaries: &[WorkloadUsageSummary]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        TABLE_HEADERS
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
    );
    for s in summaries {
        table.add_row(s.table_row());
    }
    table.to_string()
}

pub fn render(format: OutputFormat, summaries: &[WorkloadUsageSummary]) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(summaries)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(summaries)?),
    }
}
