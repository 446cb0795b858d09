//! **Weighted compliance-readiness scoring for questionnaire-based assessments.**
//!
//! `readiness-tools` takes a question catalogue, an organisation profile and a
//! set of answers, and computes a weighted readiness score together with a
//! prioritised remediation roadmap. It powers both a command-line interface
//! and a Rust library for embedding the scoring engine in other services.
//!
//! ## Key Features
//!
//! - **Profile-aware scoping**: questions carry scope rules (`equals`, `in`,
//!   `intersects`, ...) evaluated against the organisation profile, so a
//!   cloud-only startup is never graded on data-centre controls.
//! - **Two answer models**: tri-state (`yes` / `partial` / `no`) and 1-5
//!   maturity levels, with evidence-verified maturity 4 counting as fully
//!   optimised. `not_applicable` always scores full marks.
//! - **Weighted aggregation**: each question contributes
//!   `scope × criticality × impact`, rolled up overall and per theme.
//!   Unanswered questions are excluded from the denominator by default.
//! - **Gap analysis and roadmap**: every shortfall becomes a gap with a
//!   severity band and a scaled effort estimate, ordered into a
//!   dependency-aware remediation plan.
//! - **Baseline tracking**: the first sufficiently complete assessment is
//!   captured as a baseline so later reports can show progress against it.
//!
//! ## Getting Started
//!
//! ```
//! use readiness_tools::model::{builtin_catalogue, OrganisationProfile};
//! use readiness_tools::scoring::{evaluate, EvaluateOptions};
//!
//! let catalogue = builtin_catalogue();
//! let profile = OrganisationProfile::default();
//! let assessment = evaluate(&catalogue, &[], &profile, &EvaluateOptions::default());
//!
//! assert!(assessment.gaps.len() <= catalogue.len());
//! ```
//!
//! ## Modules
//!
//! - **[`model`]**: catalogue, profile and response types.
//! - **[`scoring`]**: the pure evaluation engine.
//! - **[`baseline`]**: first-milestone snapshot persistence.
//! - **[`pipeline`]**: load → evaluate → shape orchestration for the CLI.
//! - **[`reports`]**: JSON and terminal summary formatting.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Cast safety: usize↔f64 casts appear in ratio math on bounded counts
    clippy::cast_precision_loss,
    // Doc completeness: # Errors / # Panics sections are not maintained everywhere
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod baseline;
pub mod cli;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod reports;
pub mod scoring;

// Re-export main types for convenience
pub use baseline::{BaselineSnapshot, BaselineStore, FileBaselineStore, MemoryBaselineStore};
pub use error::{ReadinessError, Result};
pub use model::{builtin_catalogue, parse_catalogue, OrganisationProfile, Question, ResponseRecord};
pub use pipeline::{run_assessment, AssessmentReport};
pub use reports::ReportFormat;
pub use scoring::{evaluate, Assessment, Band, EvaluateOptions, Gap, SeverityLabel};
