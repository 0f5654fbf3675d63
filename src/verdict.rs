//! verdict.rs — result types for pronunciation-attempt evaluation.
//!
//! Standardized output shape for SUCCESS/PARTIAL/NEEDS_IMPROVEMENT plus the
//! component scores and human-readable reasons, so the quiz UI can render
//! feedback without recomputing anything.

use serde::{Deserialize, Serialize};

/// Quality band for one evaluated attempt.
/// Ordered: `Success > Partial > NeedsImprovement`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedbackTier {
    NeedsImprovement,
    Partial,
    Success,
}

impl FeedbackTier {
    /// Stable wire/metrics label (`SUCCESS`, `PARTIAL`, `NEEDS_IMPROVEMENT`).
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackTier::Success => "SUCCESS",
            FeedbackTier::Partial => "PARTIAL",
            FeedbackTier::NeedsImprovement => "NEEDS_IMPROVEMENT",
        }
    }
}

/// One recorded attempt at a phrase, as reported by the speech-to-text
/// collaborator. `confidence` is the engine's self-reported certainty; the
/// scale is taken as-is (already [0,1]-normalized upstream).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attempt {
    pub transcript: String,
    pub expected: String,
    pub confidence: f32,
}

impl Attempt {
    pub fn new(transcript: impl Into<String>, expected: impl Into<String>, confidence: f32) -> Self {
        Self {
            transcript: transcript.into(),
            expected: expected.into(),
            confidence,
        }
    }
}

/// Complete evaluation of one attempt, including explainability.
/// This is the shape the `/evaluate` endpoint returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub tier: FeedbackTier,
    /// Text similarity of transcript vs. expected phrase, [0.0, 1.0].
    pub similarity: f32,
    /// Transcription confidence after clamping, [0.0, 1.0].
    pub confidence: f32,
    /// Unweighted average of similarity and confidence, [0.0, 1.0].
    pub overall: f32,
    /// Canned feedback message for the tier.
    pub message: String,
    /// Short evidence lines (e.g. edit distance, exact-match note).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<String>,
}

impl Evaluation {
    /// Skeletal evaluation with the given tier and scores; message and
    /// reasons are filled by the engine.
    pub fn new(tier: FeedbackTier, similarity: f32, confidence: f32, overall: f32) -> Self {
        Self {
            tier,
            similarity: clamp01(similarity),
            confidence: clamp01(confidence),
            overall: clamp01(overall),
            message: String::new(),
            reasons: Vec::new(),
        }
    }

    /// Sets the canned message (builder style).
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Adds one evidence line (builder style).
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reasons.push(reason.into());
        self
    }
}

/// Clamp to [0.0, 1.0].
pub(crate) fn clamp01(x: f32) -> f32 {
    if x < 0.0 {
        0.0
    } else if x > 1.0 {
        1.0
    } else {
        x
    }
}
