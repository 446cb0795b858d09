//! Gap detection and remediation-effort estimation.
//!
//! Every in-scope item whose fraction falls short of 1 produces a [`Gap`]
//! carrying a severity score (effective weight × fraction gap) and an effort
//! estimate scaled down in proportion to how much of the control remains.

use super::aggregate::ScoredItem;
use crate::model::{Effort, Evidence, Question, TimeRange};
use serde::{Deserialize, Serialize};

/// Roadmap band — the dominant sort key for the roadmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Band {
    #[serde(rename = "Quick Win")]
    QuickWin,
    Medium,
    #[serde(rename = "Long-term")]
    LongTerm,
}

impl Band {
    /// Fixed roadmap ordering: quick wins first, long-term last.
    pub const ORDER: [Band; 3] = [Band::QuickWin, Band::Medium, Band::LongTerm];

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::QuickWin => "Quick Win",
            Self::Medium => "Medium",
            Self::LongTerm => "Long-term",
        }
    }
}

/// Human-facing severity label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeverityLabel {
    Critical,
    High,
    Medium,
    Low,
}

impl SeverityLabel {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// An in-scope question whose answer leaves a remediation gap.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gap {
    pub id: String,
    /// Control name
    pub title: String,
    /// Question text
    pub description: String,
    /// Remediation guidance from the catalogue
    pub action: String,
    pub theme: String,
    pub severity_score: f64,
    pub band: Band,
    pub severity_label: SeverityLabel,
    /// Remediation effort scaled by the fraction gap
    pub effort: Effort,
    pub dependencies: Vec<String>,
    pub fraction_gap: f64,
    pub notes: String,
    pub evidence: Vec<Evidence>,
}

/// Band thresholds, evaluated in order; first match wins.
fn severity_band(score: f64) -> (Band, SeverityLabel) {
    if score >= 6.0 {
        (Band::QuickWin, SeverityLabel::Critical)
    } else if score >= 3.0 {
        (Band::QuickWin, SeverityLabel::High)
    } else if score >= 1.5 {
        (Band::Medium, SeverityLabel::Medium)
    } else {
        (Band::LongTerm, SeverityLabel::Low)
    }
}

/// Scale the base effort estimate by the fraction gap. The 0.5-week floor on
/// the time range guarantees a non-zero estimate even for nearly-closed gaps.
fn scale_effort(base: &Effort, fraction_gap: f64) -> Effort {
    Effort {
        tech: round1(base.tech * fraction_gap),
        people: round1(base.people * fraction_gap),
        time: TimeRange {
            min: round1(base.time.min * fraction_gap).max(0.5),
            max: round1(base.time.max * fraction_gap).max(0.5),
        },
    }
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Build the gap for a scored item, if one exists. Out-of-scope items and
/// fully satisfied answers yield no gap; an unanswered in-scope item gaps at
/// the full fraction of 1.
#[must_use]
pub fn gap_for_item(question: &Question, item: &ScoredItem) -> Option<Gap> {
    if !item.in_scope {
        return None;
    }
    let fraction_gap = match item.fraction {
        Some(fraction) => 1.0 - fraction,
        None => 1.0,
    };
    if fraction_gap <= 0.0 {
        return None;
    }
    let severity_score = round2(item.effective_weight * fraction_gap);
    let (band, severity_label) = severity_band(severity_score);
    Some(Gap {
        id: question.id.clone(),
        title: question.control.clone(),
        description: question.text.clone(),
        action: question.action_guidance.clone(),
        theme: question.theme.clone(),
        severity_score,
        band,
        severity_label,
        effort: scale_effort(&question.effort, fraction_gap),
        dependencies: question.dependencies.clone(),
        fraction_gap,
        notes: item.notes.clone(),
        evidence: item.evidence.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_thresholds() {
        assert_eq!(severity_band(7.5), (Band::QuickWin, SeverityLabel::Critical));
        assert_eq!(severity_band(6.0), (Band::QuickWin, SeverityLabel::Critical));
        assert_eq!(severity_band(4.0), (Band::QuickWin, SeverityLabel::High));
        assert_eq!(severity_band(3.0), (Band::QuickWin, SeverityLabel::High));
        assert_eq!(severity_band(2.0), (Band::Medium, SeverityLabel::Medium));
        assert_eq!(severity_band(1.5), (Band::Medium, SeverityLabel::Medium));
        assert_eq!(severity_band(1.49), (Band::LongTerm, SeverityLabel::Low));
        assert_eq!(severity_band(0.0), (Band::LongTerm, SeverityLabel::Low));
    }

    #[test]
    fn test_effort_scaling_and_floor() {
        let base = Effort {
            tech: 4.0,
            people: 3.0,
            time: TimeRange { min: 2.0, max: 4.0 },
        };
        let scaled = scale_effort(&base, 0.5);
        assert_eq!(scaled.tech, 2.0);
        assert_eq!(scaled.people, 1.5);
        assert_eq!(scaled.time.min, 1.0);
        assert_eq!(scaled.time.max, 2.0);

        // Nearly closed gap: time floors at half a week
        let nearly = scale_effort(&base, 0.1);
        assert_eq!(nearly.time.min, 0.5);
        assert_eq!(nearly.time.max, 0.5);
    }

    #[test]
    fn test_band_serialization_names() {
        assert_eq!(
            serde_json::to_string(&Band::QuickWin).unwrap(),
            "\"Quick Win\""
        );
        assert_eq!(
            serde_json::to_string(&Band::LongTerm).unwrap(),
            "\"Long-term\""
        );
    }
}
