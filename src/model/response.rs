//! Per-question response records.

use super::AnswerValue;
use serde::{Deserialize, Deserializer, Serialize};

/// A normalised evidence reference attached to an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Evidence {
    /// A link to externally hosted evidence
    Url { href: String },
    /// A previously uploaded file
    File {
        id: String,
        #[serde(default)]
        name: String,
    },
}

/// A respondent's record for one question. Records are supplied per
/// evaluation call and never mutated by the engine; a missing record means
/// the question was never answered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponseRecord {
    /// Id of the question this record answers
    pub id: String,
    pub answer: Option<AnswerValue>,
    pub notes: String,
    #[serde(deserialize_with = "deserialize_evidence")]
    pub evidence: Vec<Evidence>,
    /// Set when an auditor has verified the attached evidence; promotes
    /// maturity level 4 answers to a full score
    pub evidence_verified: bool,
    /// Explicitly skipped questions score as unanswered
    pub skipped: bool,
}

/// Evidence arrives either as a list of typed entries, or — from older
/// clients — as a bare string which is coerced to a single url entry.
/// Strings inside the list get the same coercion.
fn deserialize_evidence<'de, D>(deserializer: D) -> Result<Vec<Evidence>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Entry {
        Typed(Evidence),
        Bare(String),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Field {
        Many(Vec<Entry>),
        One(String),
    }

    let coerce = |entry: Entry| match entry {
        Entry::Typed(evidence) => evidence,
        Entry::Bare(href) => Evidence::Url { href },
    };

    Ok(match Field::deserialize(deserializer)? {
        Field::Many(entries) => entries.into_iter().map(coerce).collect(),
        Field::One(href) if href.is_empty() => Vec::new(),
        Field::One(href) => vec![Evidence::Url { href }],
    })
}
