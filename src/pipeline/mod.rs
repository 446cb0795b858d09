//! Pipeline orchestration for assessment runs.
//!
//! Shared load → evaluate → shape logic for the CLI command handlers: input
//! loading with path context, the report shaping layer (ratio rounding,
//! baseline injection), and the one-shot baseline capture rule.

mod output;

pub use output::{auto_detect_format, should_use_color, write_output, OutputTarget};

use crate::baseline::{BaselineSnapshot, BaselineStore};
use crate::error::{ReadinessError, Result};
use crate::model::{parse_catalogue, OrganisationProfile, Question, ResponseRecord};
use crate::scoring::{evaluate, EvaluateOptions, Gap, ScoredItem};
use chrono::Utc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// Overall score fell below the requested threshold
    pub const BELOW_THRESHOLD: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 2;
}

/// Completion ratio at which the baseline is captured.
pub const BASELINE_CAPTURE_THRESHOLD: f64 = 0.8;

/// Overall score with the captured baseline alongside.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallReport {
    pub latest: f64,
    pub baseline: Option<f64>,
    pub numerator: f64,
    pub denominator: f64,
}

/// Per-theme score with its baseline counterpart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeReport {
    pub theme: String,
    pub latest: f64,
    pub baseline: Option<f64>,
    pub answered: usize,
    pub in_scope: usize,
}

/// The shaped assessment: evaluation output plus completion and baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReport {
    pub overall: OverallReport,
    /// answered / in-scope, in `[0, 1]`
    pub completion_ratio: f64,
    pub answered_count: usize,
    pub in_scope_count: usize,
    pub preview: bool,
    /// Set on the run that captured the baseline
    pub baseline_captured: bool,
    pub themes: Vec<ThemeReport>,
    pub items: Vec<ScoredItem>,
    pub gaps: Vec<Gap>,
    pub roadmap: Vec<Gap>,
}

/// Load a question catalogue from a file.
pub fn load_catalogue(path: &Path) -> Result<Vec<Question>> {
    let content =
        fs::read_to_string(path).map_err(|err| ReadinessError::io(path, err))?;
    parse_catalogue(&content)
}

/// Load an organisation profile from a file.
pub fn load_profile(path: &Path) -> Result<OrganisationProfile> {
    let content =
        fs::read_to_string(path).map_err(|err| ReadinessError::io(path, err))?;
    Ok(serde_json::from_str(&content)?)
}

/// Load an answer set from a file.
pub fn load_answers(path: &Path) -> Result<Vec<ResponseRecord>> {
    let content =
        fs::read_to_string(path).map_err(|err| ReadinessError::io(path, err))?;
    Ok(serde_json::from_str(&content)?)
}

/// Evaluate and shape one assessment run.
///
/// The baseline is captured exactly once: the first non-preview run whose
/// completion ratio reaches [`BASELINE_CAPTURE_THRESHOLD`] with a non-empty
/// denominator writes the snapshot; every later run only reads it. Preview
/// runs never touch the store.
pub fn run_assessment(
    catalogue: &[Question],
    responses: &[ResponseRecord],
    profile: &OrganisationProfile,
    options: &EvaluateOptions,
    store: &dyn BaselineStore,
    preview: bool,
) -> Result<AssessmentReport> {
    let assessment = evaluate(catalogue, responses, profile, options);

    // The capture decision uses the raw ratio; rounding is presentation only
    let raw_completion = if assessment.in_scope_count > 0 {
        assessment.answered_count as f64 / assessment.in_scope_count as f64
    } else {
        0.0
    };
    let completion_ratio = round4(raw_completion);
    let overall_latest = round4(assessment.overall.latest);

    let mut baseline = store.read()?;
    let mut baseline_captured = false;
    if !preview
        && !baseline.is_captured()
        && raw_completion >= BASELINE_CAPTURE_THRESHOLD
        && assessment.overall.denominator > 0.0
    {
        let mut themes = IndexMap::new();
        for theme in &assessment.themes {
            themes.insert(theme.theme.clone(), round4(theme.latest));
        }
        baseline = BaselineSnapshot {
            overall: Some(overall_latest),
            themes,
            captured_at: Some(Utc::now()),
        };
        store.write(&baseline)?;
        baseline_captured = true;
        tracing::info!(overall = overall_latest, "baseline captured");
    }

    let themes = assessment
        .themes
        .iter()
        .map(|theme| ThemeReport {
            theme: theme.theme.clone(),
            latest: round4(theme.latest),
            baseline: baseline.themes.get(&theme.theme).copied(),
            answered: theme.answered,
            in_scope: theme.in_scope,
        })
        .collect();

    Ok(AssessmentReport {
        overall: OverallReport {
            latest: overall_latest,
            baseline: baseline.overall,
            numerator: assessment.overall.numerator,
            denominator: assessment.overall.denominator,
        },
        completion_ratio,
        answered_count: assessment.answered_count,
        in_scope_count: assessment.in_scope_count,
        preview,
        baseline_captured,
        themes,
        items: assessment.items,
        gaps: assessment.gaps,
        roadmap: assessment.roadmap,
    })
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
