//! Answer normalisation: raw response → maturity fraction.

use crate::model::{AnswerType, AnswerValue, Question, ResponseRecord};

/// Maturity level → fraction mapping for five-level questions.
/// Indexed by level 1..=5.
pub const MATURITY_FRACTIONS: [f64; 5] = [0.2, 0.4, 0.65, 0.85, 1.0];

/// Map a raw response to a maturity fraction in `[0, 1]`, or `None` when the
/// question is unanswered (no record, explicitly skipped, or empty answer).
///
/// This function is total: any answer it cannot interpret scores 0.0 rather
/// than failing. A literal `not_applicable` answer always scores 1.0,
/// independent of the answer type. Maturity level 4 combined with verified
/// evidence is promoted to 1.0: verified "embedded" maturity is treated as
/// equivalent to "optimised".
#[must_use]
pub fn fraction_for_response(question: &Question, response: Option<&ResponseRecord>) -> Option<f64> {
    let record = response?;
    if record.skipped {
        return None;
    }
    let answer = record.answer.as_ref()?;
    if answer.is_empty() {
        return None;
    }
    if answer.as_text() == Some("not_applicable") {
        return Some(1.0);
    }
    let fraction = match question.answer_type {
        AnswerType::YesNoPartial => tri_state_fraction(answer),
        AnswerType::Maturity1To5 => maturity_fraction(answer, record.evidence_verified),
    };
    Some(fraction)
}

fn tri_state_fraction(answer: &AnswerValue) -> f64 {
    match answer.as_text() {
        Some("yes") => 1.0,
        Some("partial") => 0.5,
        // "no" and anything unexpected score zero
        _ => 0.0,
    }
}

fn maturity_fraction(answer: &AnswerValue, evidence_verified: bool) -> f64 {
    let Some(level) = answer.as_level() else {
        // Numeric parse failure scores zero rather than erroring
        return 0.0;
    };
    if level.fract() != 0.0 {
        return 0.0;
    }
    match level as i64 {
        4 if evidence_verified => 1.0,
        level @ 1..=5 => MATURITY_FRACTIONS[(level - 1) as usize],
        _ => 0.0,
    }
}
