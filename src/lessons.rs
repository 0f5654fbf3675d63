//! # Lesson Catalog
//!
//! The fixed phrase list the quiz walks through, embedded at compile time
//! (`lessons.json`) and parsed once. Also owns the derived lesson content:
//! human labels for lesson kinds, per-mora pitch marks parsed from the
//! `pitch_pattern` string, and the reference voice clip table.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static CATALOG: Lazy<LessonCatalog> = Lazy::new(|| {
    let raw = include_str!("../lessons.json");
    LessonCatalog::from_json(raw).expect("valid embedded lesson catalog")
});

/// `H`/`L`-only pattern; anything else (e.g. `TBD` for user-input lessons)
/// yields no pitch marks.
static PITCH_PATTERN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[HL]+$").expect("pitch pattern regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LessonKind {
    PitchAccent,
    PitchHomophone,
    VowelContrast,
    UserInput,
}

impl LessonKind {
    /// Human label shown above the phrase card.
    pub fn label(&self) -> &'static str {
        match self {
            LessonKind::PitchAccent => "Pitch Accent Training",
            LessonKind::PitchHomophone => "Pitch Homophone Practice",
            LessonKind::VowelContrast => "Vowel Contrast Training",
            LessonKind::UserInput => "Custom Phrase Practice",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub kind: LessonKind,
    pub phrase: String,
    pub pitch_pattern: String,
    pub meaning: String,
    pub example_sentence: String,
    pub instruction: String,
    pub full_instruction: String,
}

/// Pitch level of one mora.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PitchLevel {
    H,
    L,
}

/// One bar of the pitch visualization: mora index plus H/L level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchMark {
    pub index: usize,
    pub level: PitchLevel,
}

impl Lesson {
    /// Per-mora pitch marks, or empty when the pattern is undefined
    /// (user-input lessons carry `TBD`).
    pub fn pitch_marks(&self) -> Vec<PitchMark> {
        if !PITCH_PATTERN_RE.is_match(&self.pitch_pattern) {
            return Vec::new();
        }
        self.pitch_pattern
            .chars()
            .enumerate()
            .map(|(index, c)| PitchMark {
                index,
                level: if c == 'H' { PitchLevel::H } else { PitchLevel::L },
            })
            .collect()
    }

    /// Reference clips recorded for this lesson, one per voice.
    pub fn voice_clips(&self) -> Vec<VoiceClip> {
        VOICES
            .iter()
            .map(|(voice, name, label)| VoiceClip {
                voice: voice.to_string(),
                label: label.to_string(),
                file: format!("voices/{}-{}.wav", self.id, name),
            })
            .collect()
    }
}

/// (short id, recorded voice name, UI label)
const VOICES: [(&str, &str, &str); 3] = [
    ("man1", "fenrir-man1", "Man 1"),
    ("lady1", "zephyr-lady1", "Lady 1"),
    ("lady2", "despina-lady2", "Lady 2"),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceClip {
    pub voice: String,
    pub label: String,
    pub file: String,
}

#[derive(Debug, Clone)]
pub struct LessonCatalog {
    lessons: Vec<Lesson>,
}

impl LessonCatalog {
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let lessons: Vec<Lesson> = serde_json::from_str(raw)?;
        Ok(Self { lessons })
    }

    /// The embedded catalog.
    pub fn builtin() -> &'static LessonCatalog {
        &CATALOG
    }

    pub fn all(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn get(&self, id: &str) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id == id)
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_parses_and_is_nonempty() {
        let c = LessonCatalog::builtin();
        assert!(!c.is_empty());
        assert_eq!(c.len(), 4);
    }

    #[test]
    fn lesson_ids_are_unique() {
        let c = LessonCatalog::builtin();
        let mut ids: Vec<&str> = c.all().iter().map(|l| l.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), c.len());
    }

    #[test]
    fn lookup_by_id() {
        let c = LessonCatalog::builtin();
        let l = c.get("bridge-crossing").expect("bridge-crossing exists");
        assert_eq!(l.phrase, "橋を渡る");
        assert_eq!(l.kind, LessonKind::PitchAccent);
        assert!(c.get("no-such-lesson").is_none());
    }

    #[test]
    fn kind_labels_match_ui() {
        assert_eq!(LessonKind::PitchAccent.label(), "Pitch Accent Training");
        assert_eq!(LessonKind::UserInput.label(), "Custom Phrase Practice");
    }

    #[test]
    fn pitch_marks_follow_the_pattern() {
        let c = LessonCatalog::builtin();
        let l = c.get("bridge-crossing").unwrap();
        let marks = l.pitch_marks();
        assert_eq!(marks.len(), 4);
        assert_eq!(marks[0].level, PitchLevel::H);
        assert!(marks[1..].iter().all(|m| m.level == PitchLevel::L));
        assert_eq!(marks[3].index, 3);
    }

    #[test]
    fn undefined_pattern_yields_no_marks() {
        let c = LessonCatalog::builtin();
        let l = c.get("user-custom").unwrap();
        assert!(l.pitch_marks().is_empty());
    }

    #[test]
    fn defined_patterns_are_well_formed() {
        for l in LessonCatalog::builtin().all() {
            if l.pitch_pattern != "TBD" {
                assert!(
                    !l.pitch_marks().is_empty(),
                    "lesson {} has malformed pattern {}",
                    l.id,
                    l.pitch_pattern
                );
            }
        }
    }

    #[test]
    fn voice_clips_use_recorded_names() {
        let c = LessonCatalog::builtin();
        let clips = c.get("hospital-visit").unwrap().voice_clips();
        assert_eq!(clips.len(), 3);
        assert_eq!(clips[0].file, "voices/hospital-visit-fenrir-man1.wav");
        assert_eq!(clips[1].file, "voices/hospital-visit-zephyr-lady1.wav");
        assert_eq!(clips[2].voice, "lady2");
    }
}
