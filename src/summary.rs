//! # Session Summary
//! Pure aggregation of per-lesson drill scores into the final results view:
//! overall percentage, proficiency level, and study recommendations.
//! No I/O; the `/summary` handler is a thin wrapper over `summarize`.

use serde::{Deserialize, Serialize};

use crate::feedback::FeedbackConfig;

/// Scores recorded for one completed lesson, as percentages (0–100).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LessonScore {
    pub pitch: u32,
    pub pronunciation: u32,
}

/// Final results for a quiz run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    /// Rounded mean of the two component averages.
    pub overall: u32,
    pub avg_pitch: f32,
    pub avg_pronunciation: f32,
    pub level: String,
    pub recommendations: Vec<String>,
}

/// Aggregate recorded lesson scores. An empty slice yields the zero summary
/// (overall 0, lowest level, no recommendations).
pub fn summarize(scores: &[LessonScore], feedback: &FeedbackConfig) -> Summary {
    if scores.is_empty() {
        return Summary {
            overall: 0,
            avg_pitch: 0.0,
            avg_pronunciation: 0.0,
            level: feedback.level_for(0),
            recommendations: Vec::new(),
        };
    }

    let n = scores.len() as f32;
    let avg_pitch = scores.iter().map(|s| s.pitch as f32).sum::<f32>() / n;
    let avg_pronunciation = scores.iter().map(|s| s.pronunciation as f32).sum::<f32>() / n;
    let overall = ((avg_pitch + avg_pronunciation) / 2.0).round() as u32;

    Summary {
        overall,
        avg_pitch,
        avg_pronunciation,
        level: feedback.level_for(overall),
        recommendations: feedback.recommendations_for(avg_pitch, avg_pronunciation, overall),
    }
}
