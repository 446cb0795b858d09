//! Baseline command handlers.
//!
//! `baseline show` prints the captured snapshot; `baseline reset` clears it
//! so the next qualifying assessment captures a fresh one.

use crate::baseline::{BaselineStore, FileBaselineStore};
use crate::pipeline::exit_codes;
use anyhow::Result;
use std::path::PathBuf;

fn store_at(path: Option<PathBuf>) -> FileBaselineStore {
    FileBaselineStore::new(path.unwrap_or_else(FileBaselineStore::default_path))
}

/// Run `baseline show`, returning the desired exit code.
pub fn run_baseline_show(baseline_path: Option<PathBuf>) -> Result<i32> {
    let store = store_at(baseline_path);
    let snapshot = store.read()?;
    if snapshot.is_captured() {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("No baseline captured yet ({})", store.path().display());
    }
    Ok(exit_codes::SUCCESS)
}

/// Run `baseline reset`, returning the desired exit code.
pub fn run_baseline_reset(baseline_path: Option<PathBuf>) -> Result<i32> {
    let store = store_at(baseline_path);
    store.reset()?;
    tracing::info!(path = %store.path().display(), "baseline cleared");
    println!("Baseline cleared");
    Ok(exit_codes::SUCCESS)
}
