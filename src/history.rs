//! history.rs — bounded in-memory log of recent evaluations for diagnostics.
//! Process-local only; cross-session persistence stays out of scope.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::verdict::{Evaluation, FeedbackTier};

#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub ts: DateTime<Utc>,
    pub tier: FeedbackTier,
    pub similarity: f32,
    pub confidence: f32,
    pub overall: f32,
    /// Lesson id when the attempt targeted a catalog lesson.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson_id: Option<String>,
}

#[derive(Debug)]
pub struct History {
    inner: Mutex<Vec<HistoryEntry>>,
    cap: usize,
}

impl History {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            inner: Mutex::new(Vec::with_capacity(cap.min(10_000))),
            cap: cap.min(10_000),
        }
    }

    pub fn push(&self, eval: &Evaluation, lesson_id: Option<&str>) {
        let entry = HistoryEntry {
            ts: Utc::now(),
            tier: eval.tier,
            similarity: eval.similarity,
            confidence: eval.confidence,
            overall: eval.overall,
            lesson_id: lesson_id.map(|s| s.to_string()),
        };

        let mut v = self.inner.lock().expect("history mutex poisoned");
        v.push(entry);
        if v.len() > self.cap {
            let excess = v.len() - self.cap;
            v.drain(0..excess);
        }
    }

    pub fn snapshot_last_n(&self, n: usize) -> Vec<HistoryEntry> {
        let v = self.inner.lock().expect("history mutex poisoned");
        let len = v.len();
        let start = len.saturating_sub(n);
        v[start..].to_vec()
    }
}
