//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod baseline;
mod roadmap;
mod score;

pub use baseline::{run_baseline_reset, run_baseline_show};
pub use roadmap::run_roadmap;
pub use score::{run_score, ScoreConfig};
