//! # Drill Score Stub
//! Simulated pitch/pronunciation scoring for the recording drill. The quiz
//! shows these numbers after a take is saved; real acoustic analysis is out
//! of scope, so the draw is a uniform 70..=100, kept well away from the
//! similarity core.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::feedback::FeedbackConfig;

pub const MIN_SCORE: u32 = 70;
pub const MAX_SCORE: u32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillScores {
    pub pitch: u32,
    pub pronunciation: u32,
    /// Banded drill-feedback text for the pitch score.
    pub feedback: String,
}

/// Draw simulated scores and attach the matching feedback band.
pub fn draw_scores(feedback: &FeedbackConfig) -> DrillScores {
    let mut rng = rand::rng();
    let pitch = rng.random_range(MIN_SCORE..=MAX_SCORE);
    let pronunciation = rng.random_range(MIN_SCORE..=MAX_SCORE);
    DrillScores {
        pitch,
        pronunciation,
        feedback: feedback.pitch_feedback(pitch),
    }
}
