// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod config;
pub mod drill;
pub mod engine;
pub mod feedback;
pub mod history;
pub mod lessons;
pub mod metrics;
pub mod similarity;
pub mod summary;
pub mod verdict;

// ---- Re-exports for stable public API ----
// The scoring core: `pronunciation_trainer::similarity(...)` etc.
pub use crate::engine::{classify, evaluate, PARTIAL_THRESHOLD, SUCCESS_THRESHOLD};
pub use crate::similarity::{edit_distance, normalize, similarity, similarity_with};
pub use crate::verdict::{Attempt, Evaluation, FeedbackTier};

// Router construction for bins/tests: `pronunciation_trainer::create_router(state)`.
pub use crate::api::{create_router, AppState};
