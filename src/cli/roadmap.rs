//! Roadmap command handler.
//!
//! Implements the `roadmap` subcommand: the prioritised remediation plan
//! without the full assessment report around it. Always a preview run.

use crate::baseline::MemoryBaselineStore;
use crate::model::builtin_catalogue;
use crate::pipeline::{
    auto_detect_format, exit_codes, load_answers, load_catalogue, load_profile, run_assessment,
    write_output, OutputTarget,
};
use crate::reports::{format_roadmap_json, format_roadmap_summary, ReportFormat};
use crate::scoring::EvaluateOptions;
use anyhow::Result;
use std::path::PathBuf;

/// Run the roadmap command, returning the desired exit code.
pub fn run_roadmap(
    catalogue_path: Option<PathBuf>,
    profile_path: Option<PathBuf>,
    answers_path: PathBuf,
    output: ReportFormat,
    output_file: Option<PathBuf>,
    no_color: bool,
) -> Result<i32> {
    let catalogue = match &catalogue_path {
        Some(path) => load_catalogue(path)?,
        None => builtin_catalogue(),
    };
    let profile = match &profile_path {
        Some(path) => load_profile(path)?,
        None => Default::default(),
    };
    let answers = load_answers(&answers_path)?;

    // Roadmap runs never persist anything
    let store = MemoryBaselineStore::default();
    let report = run_assessment(
        &catalogue,
        &answers,
        &profile,
        &EvaluateOptions::default(),
        &store,
        true,
    )?;

    let target = OutputTarget::from_option(output_file);
    let format = auto_detect_format(output, &target);
    let colored = crate::pipeline::should_use_color(no_color) && target.is_terminal();
    let output_text = match format {
        ReportFormat::Json => format_roadmap_json(&report.roadmap),
        _ => format_roadmap_summary(&report.roadmap, colored),
    };
    write_output(&output_text, &target, false)?;

    Ok(exit_codes::SUCCESS)
}
