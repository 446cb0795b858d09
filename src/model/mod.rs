//! Data model for readiness assessments.
//!
//! The catalogue is the fixed, externally supplied set of audit questions;
//! the organisation profile and response records are supplied per evaluation.
//! All wire names are camelCase to match the catalogue and answer file
//! formats.

mod catalogue;
mod profile;
mod response;

pub use catalogue::*;
pub use profile::*;
pub use response::*;
