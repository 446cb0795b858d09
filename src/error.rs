//! Unified error types for readiness-tools.
//!
//! The scoring engine itself never fails on data it cannot interpret — it
//! degrades to the safest interpretation (unanswered, zero fraction, open
//! scope). Errors exist only at the boundary: loading input files, persisting
//! the baseline, and invalid command configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for readiness-tools operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReadinessError {
    /// Errors while loading catalogue, profile or answer files
    #[error("Failed to load input: {context}")]
    Input {
        context: String,
        #[source]
        source: InputErrorKind,
    },

    /// Errors reading or writing the baseline snapshot
    #[error("Baseline store error: {0}")]
    Baseline(String),

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Specific input error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum InputErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Empty catalogue provided")]
    EmptyCatalogue,
}

/// Convenient Result type for readiness-tools operations
pub type Result<T> = std::result::Result<T, ReadinessError>;

impl ReadinessError {
    /// Create an input error with context
    pub fn input(context: impl Into<String>, source: InputErrorKind) -> Self {
        Self::Input {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a baseline store error
    pub fn baseline(message: impl Into<String>) -> Self {
        Self::Baseline(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<std::io::Error> for ReadinessError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for ReadinessError {
    fn from(err: serde_json::Error) -> Self {
        Self::input(
            "JSON deserialization",
            InputErrorKind::InvalidJson(err.to_string()),
        )
    }
}
