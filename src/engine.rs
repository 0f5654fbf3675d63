//! # Evaluation Engine
//! Pure, testable logic that maps `(transcript, expected, confidence)` →
//! `Evaluation`. No I/O, suitable for unit tests and offline evaluation.
//!
//! Policy: `overall = (similarity + confidence) / 2` (unweighted average, as
//! the quiz reports it); band lower bounds are inclusive, so exactly 0.8 is
//! SUCCESS and exactly 0.6 is PARTIAL. Confidence outside [0,1] is clamped
//! before use, never rejected.

use crate::feedback::FeedbackConfig;
use crate::similarity::{edit_distance, normalize, similarity};
use crate::verdict::{clamp01, Attempt, Evaluation, FeedbackTier};

/// Overall score at or above this is SUCCESS.
pub const SUCCESS_THRESHOLD: f32 = 0.8;
/// Overall score in [PARTIAL_THRESHOLD, SUCCESS_THRESHOLD) is PARTIAL.
pub const PARTIAL_THRESHOLD: f32 = 0.6;

/// Map a (similarity, confidence) pair to its feedback tier.
///
/// Both inputs are clamped to [0,1] first, so the combined score can never
/// leave the unit interval.
pub fn classify(similarity: f32, confidence: f32) -> FeedbackTier {
    let overall = (clamp01(similarity) + clamp01(confidence)) / 2.0;
    if overall >= SUCCESS_THRESHOLD {
        FeedbackTier::Success
    } else if overall >= PARTIAL_THRESHOLD {
        FeedbackTier::Partial
    } else {
        FeedbackTier::NeedsImprovement
    }
}

/// Same logic as the `/evaluate` handler but purely functional for testing.
pub fn evaluate(attempt: &Attempt, feedback: &FeedbackConfig) -> Evaluation {
    let sim = similarity(&attempt.transcript, &attempt.expected);
    let conf = clamp01(attempt.confidence);
    let overall = (sim + conf) / 2.0;
    let tier = classify(sim, conf);

    let mut eval =
        Evaluation::new(tier, sim, conf, overall).with_message(feedback.message_for(tier));

    // Evidence: either the exact-match note or the raw distance facts.
    let nt = normalize(&attempt.transcript);
    let ne = normalize(&attempt.expected);
    if nt == ne {
        eval = eval.with_reason("transcript matches the expected phrase after normalization");
    } else {
        let dist = edit_distance(&nt, &ne);
        let span = nt.chars().count().max(ne.chars().count());
        eval = eval.with_reason(format!(
            "edit distance {} over {} characters (similarity {:.2})",
            dist, span, sim
        ));
    }
    eval = eval.with_reason(format!(
        "overall {:.2} = (similarity {:.2} + confidence {:.2}) / 2",
        overall, sim, conf
    ));

    eval
}
