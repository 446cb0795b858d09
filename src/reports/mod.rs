//! Report generation for assessment results.
//!
//! Two formats are supported:
//! - JSON: structured data for programmatic integration
//! - Summary: compact shell-friendly output

mod json;
mod summary;

pub use json::{format_report_json, format_roadmap_json};
pub use summary::{format_report_summary, format_roadmap_summary};

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema)]
pub enum ReportFormat {
    /// Auto-detect: summary on a TTY, JSON otherwise
    #[default]
    Auto,
    /// Structured JSON output
    Json,
    /// Brief summary output
    Summary,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Auto => write!(f, "auto"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Summary => write!(f, "summary"),
        }
    }
}
