//! Scope resolution: decides whether a question counts for a given profile.
//!
//! Scope is binary once rules are present: every rule must pass (logical
//! AND), and a passing question contributes its `defaultScope`. There is no
//! graduated scoping.

use crate::model::{FieldValue, OrganisationProfile, Question, RuleOperator, RuleValue, ScopeRule};
use std::collections::BTreeSet;

/// Resolve the scope factor for a question, in `[0, 1]`.
///
/// Explicit exclusions win over everything else; a question with no rules
/// keeps its default scope unconditionally.
#[must_use]
pub fn resolve_scope_factor(
    question: &Question,
    profile: &OrganisationProfile,
    excluded_ids: &BTreeSet<String>,
) -> f64 {
    if excluded_ids.contains(&question.id) {
        return 0.0;
    }
    let default_scope = question.weight.default_scope;
    if question.scope_rules.is_empty() {
        return default_scope;
    }
    let in_scope = question
        .scope_rules
        .iter()
        .all(|rule| rule_passes(rule, profile));
    if in_scope {
        default_scope
    } else {
        0.0
    }
}

/// Evaluate one rule against the profile.
fn rule_passes(rule: &ScopeRule, profile: &OrganisationProfile) -> bool {
    let value = profile.field(&rule.field);
    match rule.operator {
        RuleOperator::Equals => values_equal(value, &rule.value),
        RuleOperator::NotEquals => !values_equal(value, &rule.value),
        RuleOperator::Includes => includes(value, &rule.value),
        RuleOperator::In => is_member(value, &rule.value),
        RuleOperator::LengthGreaterThan => length_greater_than(value, &rule.value),
        RuleOperator::Intersects => intersects(value, &rule.value),
        // Trusted catalogue: an operator this build does not recognise is
        // treated as satisfied rather than descoping the question.
        RuleOperator::Unrecognised => {
            tracing::debug!(field = %rule.field, "unrecognised scope operator, passing");
            true
        }
    }
}

fn values_equal(value: Option<FieldValue<'_>>, expected: &RuleValue) -> bool {
    match (value, expected) {
        (Some(FieldValue::Text(text)), RuleValue::Text(want)) => text == want,
        (Some(FieldValue::Flag(flag)), RuleValue::Flag(want)) => flag == *want,
        _ => false,
    }
}

/// `includes`: array-contains, string equality, or key truthiness for
/// map-like values.
fn includes(value: Option<FieldValue<'_>>, expected: &RuleValue) -> bool {
    let RuleValue::Text(want) = expected else {
        return false;
    };
    match value {
        Some(FieldValue::List(items)) => items.iter().any(|item| item == want),
        Some(FieldValue::Text(text)) => text == want,
        Some(FieldValue::Map(map)) => map.get(want).copied().unwrap_or(false),
        _ => false,
    }
}

/// `in`: the profile value is a member of the rule's list.
fn is_member(value: Option<FieldValue<'_>>, expected: &RuleValue) -> bool {
    let RuleValue::List(allowed) = expected else {
        return false;
    };
    match value {
        Some(FieldValue::Text(text)) => allowed.iter().any(|item| item == text),
        _ => false,
    }
}

fn length_greater_than(value: Option<FieldValue<'_>>, expected: &RuleValue) -> bool {
    let RuleValue::Number(min) = expected else {
        return false;
    };
    let length = match value {
        Some(FieldValue::List(items)) => items.len(),
        Some(FieldValue::Text(text)) => text.len(),
        _ => return false,
    };
    (length as f64) > *min
}

fn intersects(value: Option<FieldValue<'_>>, expected: &RuleValue) -> bool {
    let RuleValue::List(wanted) = expected else {
        return false;
    };
    match value {
        Some(FieldValue::List(items)) => items.iter().any(|item| wanted.contains(item)),
        _ => false,
    }
}
