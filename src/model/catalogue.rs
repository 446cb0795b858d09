//! Question catalogue data structures.
//!
//! A catalogue is an ordered list of [`Question`] records, loaded once at
//! startup and read-only thereafter. Scope rules are declarative: an operator
//! enum plus a typed payload, evaluated by a single dispatch function in
//! [`crate::scoring::scope`].

use crate::error::{InputErrorKind, ReadinessError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum AnswerType {
    /// yes / partial / no tri-state
    #[serde(rename = "yes_no_partial")]
    YesNoPartial,
    /// Five-level maturity scale (1 = initial .. 5 = optimised)
    #[serde(rename = "maturity_1_5")]
    Maturity1To5,
}

/// A raw answer value: tri-state answers arrive as strings, maturity levels
/// as numbers (or numeric strings from older clients).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(f64),
    Text(String),
}

impl AnswerValue {
    /// Interpret the value as a maturity level, if it parses as one.
    #[must_use]
    pub fn as_level(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    /// The textual form of the answer, if it is textual.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            Self::Number(_) => None,
        }
    }

    /// Whether the answer is an empty string (treated as unanswered).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }
}

/// One selectable option presented for a question.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnswerOption {
    pub value: AnswerValue,
    pub label: String,
}

/// Static weighting of a question.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Weight {
    /// Multiplier expressing how critical the control is (positive)
    pub criticality: f64,
    /// Business impact of the control (positive)
    pub impact: f64,
    /// Scope factor applied when the question is in scope (default 1)
    #[serde(default = "default_scope")]
    pub default_scope: f64,
}

fn default_scope() -> f64 {
    1.0
}

/// Estimated remediation effort for closing the question completely.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Effort {
    /// Technical effort (relative units)
    pub tech: f64,
    /// People/process effort (relative units)
    pub people: f64,
    /// Elapsed time estimate in weeks
    pub time: TimeRange,
}

/// Min/max elapsed-time estimate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub struct TimeRange {
    pub min: f64,
    pub max: f64,
}

/// Scope-rule operator.
///
/// Unrecognised operators deserialize to [`RuleOperator::Unrecognised`] and
/// evaluate as passed (fail-open): the catalogue is a trusted, internally
/// authored artifact, so an operator this build does not know is assumed to
/// be satisfied rather than silently descoping the question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum RuleOperator {
    Equals,
    NotEquals,
    Includes,
    In,
    LengthGreaterThan,
    Intersects,
    #[serde(other)]
    Unrecognised,
}

/// Typed payload for a scope rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RuleValue {
    Flag(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

/// A single scope rule: compares `profile[field]` against `value` using
/// `operator`. All rules on a question must pass for it to stay in scope.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScopeRule {
    pub field: String,
    pub operator: RuleOperator,
    pub value: RuleValue,
}

/// A single audit question, immutable once the catalogue is loaded.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Unique id, e.g. "CL6-1" or "A12-4"
    pub id: String,
    /// Standard clause reference
    #[serde(default)]
    pub clause: String,
    /// Control name
    #[serde(default)]
    pub control: String,
    /// Scoring theme the question rolls up into
    pub theme: String,
    /// Question text shown to the respondent
    pub text: String,
    pub answer_type: AnswerType,
    #[serde(default)]
    pub options: Vec<AnswerOption>,
    pub weight: Weight,
    pub effort: Effort,
    /// Remediation guidance surfaced on gaps
    #[serde(default)]
    pub action_guidance: String,
    /// Ids of questions that should be remediated first. Not required to be
    /// acyclic, and may reference ids outside the catalogue.
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub scope_rules: Vec<ScopeRule>,
}

/// Default catalogue bundled with the tool (ISO 27001-style readiness set).
static DEFAULT_CATALOGUE: &str = include_str!("../../data/catalogue.json");

/// Parse a catalogue from a JSON string.
pub fn parse_catalogue(json: &str) -> Result<Vec<Question>> {
    let questions: Vec<Question> = serde_json::from_str(json)?;
    if questions.is_empty() {
        return Err(ReadinessError::input(
            "catalogue",
            InputErrorKind::EmptyCatalogue,
        ));
    }
    Ok(questions)
}

/// The embedded default catalogue.
///
/// # Panics
///
/// Panics if the bundled `data/catalogue.json` is invalid, which is a build
/// defect rather than a runtime condition.
#[must_use]
pub fn builtin_catalogue() -> Vec<Question> {
    #[allow(clippy::expect_used)]
    parse_catalogue(DEFAULT_CATALOGUE).expect("bundled catalogue is valid")
}

/// Generate a JSON Schema for the catalogue file format.
#[must_use]
pub fn catalogue_json_schema() -> String {
    let schema = schemars::schema_for!(Vec<Question>);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalogue_parses() {
        let catalogue = builtin_catalogue();
        assert!(!catalogue.is_empty());
        // Every dependency that resolves must point at a real question
        let ids: Vec<&str> = catalogue.iter().map(|q| q.id.as_str()).collect();
        for question in &catalogue {
            for dep in &question.dependencies {
                assert!(
                    ids.contains(&dep.as_str()),
                    "{} depends on unknown {dep}",
                    question.id
                );
            }
        }
    }

    #[test]
    fn test_unknown_operator_deserializes_fail_open() {
        let rule: ScopeRule = serde_json::from_str(
            r#"{ "field": "industry", "operator": "matchesRegex", "value": "fin.*" }"#,
        )
        .unwrap();
        assert_eq!(rule.operator, RuleOperator::Unrecognised);
    }

    #[test]
    fn test_default_scope_defaults_to_one() {
        let weight: Weight =
            serde_json::from_str(r#"{ "criticality": 1.5, "impact": 4 }"#).unwrap();
        assert!((weight.default_scope - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_catalogue_rejected() {
        assert!(parse_catalogue("[]").is_err());
    }

    #[test]
    fn test_answer_value_level_parsing() {
        assert_eq!(AnswerValue::Number(4.0).as_level(), Some(4.0));
        assert_eq!(AnswerValue::Text("3".to_string()).as_level(), Some(3.0));
        assert_eq!(AnswerValue::Text("high".to_string()).as_level(), None);
    }

    #[test]
    fn test_catalogue_schema_is_json() {
        let schema = catalogue_json_schema();
        let value: serde_json::Value = serde_json::from_str(&schema).unwrap();
        assert!(value.get("$schema").is_some());
    }
}
