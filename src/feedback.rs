//! # Feedback Configuration
//!
//! Configurable feedback content for the quiz:
//!
//! - canned per-tier messages shown after an evaluated attempt,
//! - pitch drill-feedback bands (text per score range),
//! - study recommendations driven by average scores,
//! - the proficiency level scale for the final summary.
//!
//! Loads from a JSON file; any missing piece falls back to the built-in
//! seed with the trainer's stock texts. Designed to be
//! simple, testable, and resilient to partial configs.

use serde::Deserialize;
use std::{fs, path::Path};

use crate::verdict::FeedbackTier;

/// Feedback content, loaded from JSON or defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackConfig {
    /// Per-tier messages keyed by wire name (`SUCCESS`, `PARTIAL`, ...).
    #[serde(default)]
    pub messages: Vec<TierMessage>,
    /// Drill-feedback bands, matched top-down by `min_score`.
    #[serde(default)]
    pub pitch_bands: Vec<PitchBand>,
    /// Proficiency levels, matched top-down by `min_percent`.
    #[serde(default)]
    pub levels: Vec<LevelBand>,
    #[serde(default)]
    pub recommendations: RecommendationRules,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TierMessage {
    pub tier: FeedbackTier,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PitchBand {
    pub min_score: u32,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LevelBand {
    pub min_percent: u32,
    pub name: String,
}

/// Study-tip rules for the final summary. Component averages below the
/// threshold contribute their tips; `fallback_tips` apply when nothing else
/// fired.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRules {
    #[serde(default = "default_component_threshold")]
    pub component_threshold: f32,
    #[serde(default = "default_overall_threshold")]
    pub overall_threshold: u32,
    #[serde(default)]
    pub pitch_tips: Vec<String>,
    #[serde(default)]
    pub pronunciation_tips: Vec<String>,
    #[serde(default)]
    pub overall_tips: Vec<String>,
    #[serde(default)]
    pub fallback_tips: Vec<String>,
}

fn default_component_threshold() -> f32 {
    80.0
}

fn default_overall_threshold() -> u32 {
    70
}

impl Default for RecommendationRules {
    fn default() -> Self {
        Self {
            component_threshold: default_component_threshold(),
            overall_threshold: default_overall_threshold(),
            pitch_tips: Vec::new(),
            pronunciation_tips: Vec::new(),
            overall_tips: Vec::new(),
            fallback_tips: Vec::new(),
        }
    }
}

impl FeedbackConfig {
    /// Load configuration from a JSON file.
    /// Falls back to `default_seed()` on error.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(path) {
            Ok(s) => serde_json::from_str(&s).unwrap_or_else(|_| Self::default_seed()),
            Err(_) => Self::default_seed(),
        }
    }

    /// Canned message for a tier; unconfigured tiers use the seed texts.
    pub fn message_for(&self, tier: FeedbackTier) -> String {
        self.messages
            .iter()
            .find(|m| m.tier == tier)
            .map(|m| m.message.clone())
            .unwrap_or_else(|| seed_message(tier).to_string())
    }

    /// Drill-feedback text for a pitch score (0–100), highest band first.
    pub fn pitch_feedback(&self, score: u32) -> String {
        let bands: &[PitchBand] = if self.pitch_bands.is_empty() {
            &SEED_PITCH_BANDS
        } else {
            &self.pitch_bands
        };
        let mut sorted: Vec<&PitchBand> = bands.iter().collect();
        sorted.sort_by(|a, b| b.min_score.cmp(&a.min_score));
        sorted
            .into_iter()
            .find(|b| score >= b.min_score)
            .map(|b| b.text.clone())
            .unwrap_or_default()
    }

    /// Proficiency level name for an overall percentage.
    pub fn level_for(&self, percent: u32) -> String {
        let levels: &[LevelBand] = if self.levels.is_empty() {
            &SEED_LEVELS
        } else {
            &self.levels
        };
        let mut sorted: Vec<&LevelBand> = levels.iter().collect();
        sorted.sort_by(|a, b| b.min_percent.cmp(&a.min_percent));
        sorted
            .into_iter()
            .find(|l| percent >= l.min_percent)
            .map(|l| l.name.clone())
            .unwrap_or_else(|| "Beginner".to_string())
    }

    /// Study recommendations for the final summary.
    ///
    /// Order matches the trainer: pitch tips, then pronunciation tips, then
    /// overall tips; the fallback applies only when nothing fired.
    pub fn recommendations_for(
        &self,
        avg_pitch: f32,
        avg_pronunciation: f32,
        overall: u32,
    ) -> Vec<String> {
        let r = self.rules();
        let mut out = Vec::new();

        if avg_pitch < r.component_threshold {
            out.extend(r.pitch_tips.iter().cloned());
        }
        if avg_pronunciation < r.component_threshold {
            out.extend(r.pronunciation_tips.iter().cloned());
        }
        if overall < r.overall_threshold {
            out.extend(r.overall_tips.iter().cloned());
        }
        if out.is_empty() {
            out.extend(r.fallback_tips.iter().cloned());
        }
        out
    }

    fn rules(&self) -> RecommendationRules {
        let mut r = self.recommendations.clone();
        if r.pitch_tips.is_empty()
            && r.pronunciation_tips.is_empty()
            && r.overall_tips.is_empty()
            && r.fallback_tips.is_empty()
        {
            r = seed_rules();
        }
        r
    }

    /// Built-in seed with the trainer's stock feedback content.
    /// Used as fallback if no config is found.
    pub fn default_seed() -> Self {
        Self {
            messages: vec![
                TierMessage {
                    tier: FeedbackTier::Success,
                    message: seed_message(FeedbackTier::Success).to_string(),
                },
                TierMessage {
                    tier: FeedbackTier::Partial,
                    message: seed_message(FeedbackTier::Partial).to_string(),
                },
                TierMessage {
                    tier: FeedbackTier::NeedsImprovement,
                    message: seed_message(FeedbackTier::NeedsImprovement).to_string(),
                },
            ],
            pitch_bands: SEED_PITCH_BANDS.to_vec(),
            levels: SEED_LEVELS.to_vec(),
            recommendations: seed_rules(),
        }
    }
}

fn seed_message(tier: FeedbackTier) -> &'static str {
    match tier {
        FeedbackTier::Success => "Bravo! Excellent pronunciation!",
        FeedbackTier::Partial => "Good attempt! Keep practicing for better accuracy.",
        FeedbackTier::NeedsImprovement => {
            "Oops! Try again. Listen to the reference voices and practice more."
        }
    }
}

static SEED_PITCH_BANDS: once_cell::sync::Lazy<Vec<PitchBand>> = once_cell::sync::Lazy::new(|| {
    vec![
        PitchBand {
            min_score: 90,
            text: "素晴らしい！Perfect pitch pattern! Your accent is very natural.".to_string(),
        },
        PitchBand {
            min_score: 80,
            text: "Good job! Your pitch pattern was mostly correct. Try to emphasize the contrast more."
                .to_string(),
        },
        PitchBand {
            min_score: 70,
            text: "Fair attempt. Focus on the high-low pattern contrast.".to_string(),
        },
        PitchBand {
            min_score: 0,
            text: "Keep practicing! Listen to the correct pronunciation and try again.".to_string(),
        },
    ]
});

static SEED_LEVELS: once_cell::sync::Lazy<Vec<LevelBand>> = once_cell::sync::Lazy::new(|| {
    vec![
        LevelBand { min_percent: 90, name: "Advanced".to_string() },
        LevelBand { min_percent: 80, name: "Upper Intermediate".to_string() },
        LevelBand { min_percent: 70, name: "Intermediate".to_string() },
        LevelBand { min_percent: 60, name: "Lower Intermediate".to_string() },
        LevelBand { min_percent: 0, name: "Beginner".to_string() },
    ]
});

fn seed_rules() -> RecommendationRules {
    RecommendationRules {
        component_threshold: 80.0,
        overall_threshold: 70,
        pitch_tips: vec![
            "Practice pitch patterns daily with native speaker recordings".to_string(),
            "Focus on the high-low contrast in はし (bridge vs chopsticks)".to_string(),
            "Work on distinguishing あめ (rain vs candy) by pitch alone".to_string(),
        ],
        pronunciation_tips: vec![
            "Practice the long vowel difference in びょういん vs びよういん".to_string(),
            "Record yourself and compare with native speakers".to_string(),
        ],
        overall_tips: vec![
            "Consider taking structured Japanese pronunciation lessons".to_string(),
            "Practice daily with pitch accent exercises".to_string(),
        ],
        fallback_tips: vec![
            "Continue practicing to maintain your excellent level".to_string(),
            "Try more challenging pitch accent patterns".to_string(),
        ],
    }
}
