//! Score command handler.
//!
//! Implements the `score` subcommand: load inputs, evaluate, report.

use crate::baseline::FileBaselineStore;
use crate::error::ReadinessError;
use crate::model::builtin_catalogue;
use crate::pipeline::{
    auto_detect_format, exit_codes, load_answers, load_catalogue, load_profile, write_output,
    OutputTarget,
};
use crate::reports::{format_report_json, format_report_summary, ReportFormat};
use crate::scoring::EvaluateOptions;
use anyhow::Result;
use std::path::PathBuf;

/// Score command configuration
pub struct ScoreConfig {
    /// Catalogue file; the built-in catalogue when absent
    pub catalogue_path: Option<PathBuf>,
    /// Organisation profile; an empty profile when absent
    pub profile_path: Option<PathBuf>,
    pub answers_path: PathBuf,
    pub output: ReportFormat,
    pub output_file: Option<PathBuf>,
    /// Count unanswered in-scope questions against the score
    pub include_unanswered: bool,
    /// Compute without touching the baseline store
    pub preview: bool,
    /// Fail (exit 1) when the overall ratio is below this value
    pub min_score: Option<f64>,
    pub baseline_path: Option<PathBuf>,
    pub no_color: bool,
}

/// Run the score command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_score(config: ScoreConfig) -> Result<i32> {
    if let Some(threshold) = config.min_score {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ReadinessError::config(format!(
                "--min-score must be between 0 and 1, got {threshold}"
            ))
            .into());
        }
    }

    let catalogue = match &config.catalogue_path {
        Some(path) => load_catalogue(path)?,
        None => builtin_catalogue(),
    };
    let profile = match &config.profile_path {
        Some(path) => load_profile(path)?,
        None => Default::default(),
    };
    let answers = load_answers(&config.answers_path)?;

    tracing::info!(
        questions = catalogue.len(),
        answers = answers.len(),
        preview = config.preview,
        "running assessment"
    );

    let store = FileBaselineStore::new(
        config
            .baseline_path
            .clone()
            .unwrap_or_else(FileBaselineStore::default_path),
    );
    let options = EvaluateOptions {
        exclude_unanswered: !config.include_unanswered,
    };
    let report = crate::pipeline::run_assessment(
        &catalogue,
        &answers,
        &profile,
        &options,
        &store,
        config.preview,
    )?;

    let target = OutputTarget::from_option(config.output_file.clone());
    let format = auto_detect_format(config.output, &target);
    let colored = crate::pipeline::should_use_color(config.no_color) && target.is_terminal();
    let output_text = match format {
        ReportFormat::Json => format_report_json(&report),
        _ => format_report_summary(&report, colored),
    };
    write_output(&output_text, &target, false)?;

    if let Some(threshold) = config.min_score {
        if report.overall.latest < threshold {
            tracing::error!(
                "Overall score {:.4} is below minimum threshold {:.4}",
                report.overall.latest,
                threshold
            );
            return Ok(exit_codes::BELOW_THRESHOLD);
        }
    }

    Ok(exit_codes::SUCCESS)
}
