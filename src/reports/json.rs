//! JSON report formatting.

use crate::pipeline::AssessmentReport;
use crate::scoring::Gap;
use serde_json::json;

/// Format a full assessment report as pretty JSON with a tool envelope.
#[must_use]
pub fn format_report_json(report: &AssessmentReport) -> String {
    let output = json!({
        "tool": "readiness-tools",
        "version": env!("CARGO_PKG_VERSION"),
        "report": report,
    });
    serde_json::to_string_pretty(&output).unwrap_or_default()
}

/// Format a roadmap on its own as pretty JSON.
#[must_use]
pub fn format_roadmap_json(roadmap: &[Gap]) -> String {
    let output = json!({
        "tool": "readiness-tools",
        "version": env!("CARGO_PKG_VERSION"),
        "roadmap": roadmap,
    });
    serde_json::to_string_pretty(&output).unwrap_or_default()
}
