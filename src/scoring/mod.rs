//! Readiness scoring engine.
//!
//! The engine is a pure, synchronous computation: one [`evaluate`] call fully
//! consumes its inputs and returns an [`Assessment`] with no shared mutable
//! state. Baseline persistence happens in the result-shaping layer
//! ([`crate::pipeline`]), never here.
//!
//! # Usage
//!
//! ```
//! use readiness_tools::model::{builtin_catalogue, OrganisationProfile};
//! use readiness_tools::scoring::{evaluate, EvaluateOptions};
//!
//! let catalogue = builtin_catalogue();
//! let profile = OrganisationProfile::default();
//! let assessment = evaluate(&catalogue, &[], &profile, &EvaluateOptions::default());
//!
//! assert_eq!(assessment.answered_count, 0);
//! println!("overall {:.2}", assessment.overall.latest);
//! ```

mod aggregate;
mod answer;
mod gaps;
mod roadmap;
mod scope;

pub use aggregate::{
    evaluate, Assessment, EvaluateOptions, OverallScore, ScoredItem, ThemeScore,
};
pub use answer::{fraction_for_response, MATURITY_FRACTIONS};
pub use gaps::{gap_for_item, Band, Gap, SeverityLabel};
pub use roadmap::prioritise;
pub use scope::resolve_scope_factor;
