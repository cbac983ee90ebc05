use crate::models::ViolationReport;
use serde_json::Result;

pub fn format_json_report(report: &ViolationReport) -> Result<String> {
    serde_json::to_string_pretty(report)
}
