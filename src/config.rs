// src/config.rs
//! Service configuration: history capacity, feedback config location, and
//! the speech-recognition language tag handed to the UI collaborator.
//! Loaded from TOML with an env-var path override; every field has a safe
//! default so a missing file never blocks startup.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_TRAINER_CONFIG_PATH: &str = "config/trainer.toml";
pub const ENV_TRAINER_CONFIG_PATH: &str = "TRAINER_CONFIG_PATH";

#[derive(Debug, Clone, Deserialize)]
pub struct TrainerConfig {
    /// Bound on the in-memory evaluation history.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    /// JSON file with feedback content overrides (optional on disk).
    #[serde(default = "default_feedback_path")]
    pub feedback_path: String,
    /// BCP-47 tag the UI passes to its speech-recognition collaborator.
    #[serde(default = "default_recognition_lang")]
    pub recognition_lang: String,
}

fn default_history_capacity() -> usize {
    2000
}

fn default_feedback_path() -> String {
    "config/feedback.json".to_string()
}

fn default_recognition_lang() -> String {
    "ja-JP".to_string()
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
            feedback_path: default_feedback_path(),
            recognition_lang: default_recognition_lang(),
        }
    }
}

impl TrainerConfig {
    /// Parse configuration from an explicit TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading trainer config from {}", path.display()))?;
        let cfg = toml::from_str(&raw)
            .with_context(|| format!("parsing trainer config {}", path.display()))?;
        Ok(cfg)
    }

    /// Resolve the config path ($TRAINER_CONFIG_PATH, then the default
    /// location) and load it; missing or malformed files fall back to
    /// defaults with a warning.
    pub fn from_env() -> Self {
        let path = std::env::var(ENV_TRAINER_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_TRAINER_CONFIG_PATH));

        match Self::load_from_file(&path) {
            Ok(cfg) => cfg,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "trainer config not loaded; using defaults"
                );
                Self::default()
            }
        }
    }
}
