use anyhow::Result;
use crate::report::annotation::InsightReport;

/// Render a report as pretty-printed JSON
pub fn render(report: &InsightReport) -> Result<String> {
    let json = serde_json::to_string_pretty(report)?;
    Ok(json)
}
