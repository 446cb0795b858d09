//! Weighted aggregation: per-item scoring and theme/overall rollups.

use super::answer::fraction_for_response;
use super::gaps::{gap_for_item, Gap};
use super::roadmap::prioritise;
use super::scope::resolve_scope_factor;
use crate::model::{AnswerValue, Evidence, OrganisationProfile, Question, ResponseRecord};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Knobs for a single evaluation pass.
#[derive(Debug, Clone)]
pub struct EvaluateOptions {
    /// When set, unanswered in-scope questions are removed from the
    /// denominator so the score reflects only what has been assessed.
    /// When unset they count against the score at fraction zero.
    pub exclude_unanswered: bool,
}

impl Default for EvaluateOptions {
    fn default() -> Self {
        Self {
            exclude_unanswered: true,
        }
    }
}

/// One question, fully scored against a profile and response set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredItem {
    pub id: String,
    pub clause: String,
    pub control: String,
    pub theme: String,
    pub text: String,
    pub criticality: f64,
    pub impact: f64,
    pub default_scope: f64,
    pub scope_factor: f64,
    pub effective_weight: f64,
    pub in_scope: bool,
    /// `None` means unanswered (missing, skipped, or empty)
    pub fraction: Option<f64>,
    pub answered: bool,
    pub skipped: bool,
    pub answer: Option<AnswerValue>,
    /// fraction × effective weight; zero while unanswered
    pub contribution: f64,
    /// This item's share of the denominator under the active options
    pub weight_for_denominator: f64,
    pub notes: String,
    pub evidence: Vec<Evidence>,
    pub evidence_verified: bool,
    pub dependencies: Vec<String>,
}

/// Overall weighted score with its raw components.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallScore {
    pub latest: f64,
    pub numerator: f64,
    pub denominator: f64,
}

/// Per-theme rollup, in catalogue order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeScore {
    pub theme: String,
    pub latest: f64,
    pub answered: usize,
    pub in_scope: usize,
}

/// The full result of one evaluation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub overall: OverallScore,
    pub answered_count: usize,
    pub in_scope_count: usize,
    pub themes: Vec<ThemeScore>,
    pub items: Vec<ScoredItem>,
    pub gaps: Vec<Gap>,
    pub roadmap: Vec<Gap>,
}

#[derive(Default)]
struct ThemeAccumulator {
    numerator: f64,
    denominator: f64,
    answered: usize,
    in_scope: usize,
}

/// Score a response set against a catalogue for one organisation profile.
///
/// Items are scored in catalogue order; responses whose id matches no
/// catalogue question are ignored. A zero denominator (everything out of
/// scope or nothing answered under `exclude_unanswered`) yields an overall
/// ratio of zero rather than NaN.
#[must_use]
pub fn evaluate(
    catalogue: &[Question],
    responses: &[ResponseRecord],
    profile: &OrganisationProfile,
    options: &EvaluateOptions,
) -> Assessment {
    let by_id: HashMap<&str, &ResponseRecord> = responses
        .iter()
        .map(|record| (record.id.as_str(), record))
        .collect();
    let excluded: BTreeSet<String> = profile.excluded_controls.iter().cloned().collect();

    let mut items = Vec::with_capacity(catalogue.len());
    let mut themes: IndexMap<String, ThemeAccumulator> = IndexMap::new();
    let mut numerator = 0.0;
    let mut denominator = 0.0;

    for question in catalogue {
        let response = by_id.get(question.id.as_str()).copied();
        let scope_factor = resolve_scope_factor(question, profile, &excluded);
        let effective_weight =
            scope_factor * question.weight.criticality * question.weight.impact;
        let in_scope = effective_weight > 0.0;
        // Fraction is reported even for out-of-scope items; only the
        // contribution is gated on scope (effective weight is 0 anyway)
        let fraction = fraction_for_response(question, response);
        let answered = in_scope && fraction.is_some();
        let contribution = fraction.unwrap_or(0.0) * effective_weight;
        let counts_in_denominator = in_scope && (answered || !options.exclude_unanswered);
        let weight_for_denominator = if counts_in_denominator {
            effective_weight
        } else {
            0.0
        };

        numerator += contribution;
        denominator += weight_for_denominator;

        let theme = themes.entry(question.theme.clone()).or_default();
        theme.numerator += contribution;
        theme.denominator += weight_for_denominator;
        if answered {
            theme.answered += 1;
        }
        if in_scope {
            theme.in_scope += 1;
        }

        let item = ScoredItem {
            id: question.id.clone(),
            clause: question.clause.clone(),
            control: question.control.clone(),
            theme: question.theme.clone(),
            text: question.text.clone(),
            criticality: question.weight.criticality,
            impact: question.weight.impact,
            default_scope: question.weight.default_scope,
            scope_factor,
            effective_weight,
            in_scope,
            fraction,
            answered,
            skipped: response.is_some_and(|record| record.skipped),
            answer: response.and_then(|record| record.answer.clone()),
            contribution,
            weight_for_denominator,
            notes: response.map(|record| record.notes.clone()).unwrap_or_default(),
            evidence: response
                .map(|record| record.evidence.clone())
                .unwrap_or_default(),
            evidence_verified: response.is_some_and(|record| record.evidence_verified),
            dependencies: question.dependencies.clone(),
        };
        items.push(item);
    }

    tracing::debug!(
        numerator,
        denominator,
        items = items.len(),
        "aggregation complete"
    );

    let gaps: Vec<Gap> = catalogue
        .iter()
        .zip(&items)
        .filter_map(|(question, item)| gap_for_item(question, item))
        .collect();
    let roadmap = prioritise(&gaps);

    let themes = themes
        .into_iter()
        .map(|(theme, acc)| ThemeScore {
            theme,
            latest: ratio(acc.numerator, acc.denominator),
            answered: acc.answered,
            in_scope: acc.in_scope,
        })
        .collect();

    Assessment {
        overall: OverallScore {
            latest: ratio(numerator, denominator),
            numerator,
            denominator,
        },
        answered_count: items.iter().filter(|item| item.answered).count(),
        in_scope_count: items.iter().filter(|item| item.in_scope).count(),
        themes,
        items,
        gaps,
        roadmap,
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_catalogue;

    fn catalogue() -> Vec<Question> {
        parse_catalogue(
            r#"[
                {
                    "id": "Q1",
                    "clause": "5.1",
                    "control": "Policies",
                    "theme": "Governance",
                    "text": "Is there a policy?",
                    "answerType": "yes_no_partial",
                    "weight": { "criticality": 1.0, "impact": 4 },
                    "effort": { "tech": 1, "people": 2, "time": { "min": 1, "max": 2 } },
                    "actionGuidance": "Write the policy."
                },
                {
                    "id": "Q2",
                    "clause": "8.1",
                    "control": "Asset inventory",
                    "theme": "Technology",
                    "text": "Is there an inventory?",
                    "answerType": "yes_no_partial",
                    "weight": { "criticality": 1.0, "impact": 4 },
                    "effort": { "tech": 2, "people": 1, "time": { "min": 2, "max": 4 } },
                    "actionGuidance": "Build the inventory.",
                    "dependencies": ["Q1"]
                },
                {
                    "id": "Q3",
                    "clause": "9.1",
                    "control": "Access control",
                    "theme": "Technology",
                    "text": "Is access controlled?",
                    "answerType": "yes_no_partial",
                    "weight": { "criticality": 1.0, "impact": 4 },
                    "effort": { "tech": 3, "people": 2, "time": { "min": 2, "max": 6 } },
                    "actionGuidance": "Roll out access control."
                }
            ]"#,
        )
        .unwrap()
    }

    fn answer(id: &str, value: &str) -> ResponseRecord {
        ResponseRecord {
            id: id.to_string(),
            answer: Some(AnswerValue::Text(value.to_string())),
            ..ResponseRecord::default()
        }
    }

    #[test]
    fn test_two_equal_weights_average() {
        let responses = vec![answer("Q1", "yes"), answer("Q2", "no"), answer("Q3", "no")];
        let assessment = evaluate(
            &catalogue(),
            &responses,
            &OrganisationProfile::default(),
            &EvaluateOptions::default(),
        );
        // 4 of 12 weighted points
        assert!((assessment.overall.latest - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(assessment.answered_count, 3);
        assert_eq!(assessment.in_scope_count, 3);
    }

    #[test]
    fn test_unanswered_excluded_from_denominator_by_default() {
        // yes + partial answered, one unanswered: (4 + 2) / 8 = 0.75
        let responses = vec![answer("Q1", "yes"), answer("Q2", "partial")];
        let assessment = evaluate(
            &catalogue(),
            &responses,
            &OrganisationProfile::default(),
            &EvaluateOptions::default(),
        );
        assert!((assessment.overall.numerator - 6.0).abs() < 1e-9);
        assert!((assessment.overall.denominator - 8.0).abs() < 1e-9);
        assert!((assessment.overall.latest - 0.75).abs() < 1e-9);
        assert_eq!(assessment.answered_count, 2);

        // Strict mode keeps the unanswered weight in the denominator
        let strict = evaluate(
            &catalogue(),
            &responses,
            &OrganisationProfile::default(),
            &EvaluateOptions {
                exclude_unanswered: false,
            },
        );
        assert!((strict.overall.denominator - 12.0).abs() < 1e-9);
        assert!((strict.overall.latest - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_theme_rollup_in_catalogue_order() {
        let responses = vec![answer("Q1", "yes"), answer("Q2", "partial"), answer("Q3", "yes")];
        let assessment = evaluate(
            &catalogue(),
            &responses,
            &OrganisationProfile::default(),
            &EvaluateOptions::default(),
        );
        assert_eq!(assessment.themes.len(), 2);
        assert_eq!(assessment.themes[0].theme, "Governance");
        assert!((assessment.themes[0].latest - 1.0).abs() < 1e-9);
        assert_eq!(assessment.themes[1].theme, "Technology");
        assert!((assessment.themes[1].latest - 0.75).abs() < 1e-9);
        assert_eq!(assessment.themes[1].answered, 2);
        assert_eq!(assessment.themes[1].in_scope, 2);
    }

    #[test]
    fn test_excluded_control_drops_out_entirely() {
        let responses = vec![answer("Q1", "yes"), answer("Q2", "yes"), answer("Q3", "yes")];
        let profile = OrganisationProfile {
            excluded_controls: vec!["Q3".to_string()],
            ..OrganisationProfile::default()
        };
        let assessment = evaluate(
            &catalogue(),
            &responses,
            &profile,
            &EvaluateOptions::default(),
        );
        assert_eq!(assessment.in_scope_count, 2);
        assert!((assessment.overall.denominator - 8.0).abs() < 1e-9);
        let q3 = &assessment.items[2];
        assert!(!q3.in_scope);
        // The answer's fraction is still reported; it just carries no weight
        assert_eq!(q3.fraction, Some(1.0));
        assert!(!q3.answered);
        assert_eq!(q3.effective_weight, 0.0);
        // No gap for the excluded item
        assert!(assessment.gaps.iter().all(|gap| gap.id != "Q3"));
    }

    #[test]
    fn test_descoped_answered_item_keeps_fraction() {
        let json = r#"[
            {
                "id": "Q1", "clause": "14.2", "control": "Outsourcing",
                "theme": "Suppliers", "text": "Supervised?",
                "answerType": "yes_no_partial",
                "weight": { "criticality": 1.0, "impact": 4 },
                "effort": { "tech": 1, "people": 1, "time": { "min": 1, "max": 2 } },
                "actionGuidance": "Review contracts.",
                "scopeRules": [
                    { "field": "industry", "operator": "equals", "value": "Finance" }
                ]
            }
        ]"#;
        let catalogue = parse_catalogue(json).unwrap();
        let responses = vec![answer("Q1", "yes")];
        let profile = OrganisationProfile {
            industry: Some("SaaS".to_string()),
            ..OrganisationProfile::default()
        };
        let assessment = evaluate(
            &catalogue,
            &responses,
            &profile,
            &EvaluateOptions::default(),
        );

        let item = &assessment.items[0];
        assert!(!item.in_scope);
        assert_eq!(item.fraction, Some(1.0));
        // answered requires scope, so counts and denominator stay empty
        assert!(!item.answered);
        assert_eq!(assessment.answered_count, 0);
        assert_eq!(assessment.overall.denominator, 0.0);
    }

    #[test]
    fn test_unknown_response_ids_are_ignored() {
        let responses = vec![answer("Q1", "yes"), answer("GHOST", "yes")];
        let assessment = evaluate(
            &catalogue(),
            &responses,
            &OrganisationProfile::default(),
            &EvaluateOptions::default(),
        );
        assert_eq!(assessment.answered_count, 1);
        assert_eq!(assessment.items.len(), 3);
    }

    #[test]
    fn test_empty_denominator_scores_zero() {
        let profile = OrganisationProfile {
            excluded_controls: vec!["Q1".into(), "Q2".into(), "Q3".into()],
            ..OrganisationProfile::default()
        };
        let assessment = evaluate(
            &catalogue(),
            &[],
            &profile,
            &EvaluateOptions::default(),
        );
        assert_eq!(assessment.overall.latest, 0.0);
        assert_eq!(assessment.overall.denominator, 0.0);
        assert!(assessment.gaps.is_empty());
    }

    #[test]
    fn test_gaps_and_roadmap_populated() {
        // Q1 unanswered, Q2 partial, Q3 no: three gaps, roadmap honours the
        // Q2 → Q1 dependency inside the same band.
        let responses = vec![answer("Q2", "partial"), answer("Q3", "no")];
        let assessment = evaluate(
            &catalogue(),
            &responses,
            &OrganisationProfile::default(),
            &EvaluateOptions::default(),
        );
        assert_eq!(assessment.gaps.len(), 3);
        assert_eq!(assessment.roadmap.len(), 3);
        let position = |id: &str| {
            assessment
                .roadmap
                .iter()
                .position(|gap| gap.id == id)
                .unwrap()
        };
        assert!(position("Q1") < position("Q2"));
    }
}
