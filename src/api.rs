use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use shuttle_axum::axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::TrainerConfig;
use crate::drill::{self, DrillScores};
use crate::engine;
use crate::feedback::FeedbackConfig;
use crate::history::{History, HistoryEntry};
use crate::lessons::{Lesson, LessonCatalog, PitchMark, VoiceClip};
use crate::metrics::Metrics;
use crate::similarity;
use crate::summary::{summarize, LessonScore, Summary};
use crate::verdict::{Attempt, Evaluation};

#[derive(Clone)]
pub struct AppState {
    catalog: &'static LessonCatalog,
    feedback: Arc<RwLock<FeedbackConfig>>,
    history: Arc<History>,
    config: Arc<TrainerConfig>,
}

impl AppState {
    pub fn from_config(config: TrainerConfig) -> Self {
        let feedback = FeedbackConfig::load_from_file(&config.feedback_path);
        Self {
            catalog: LessonCatalog::builtin(),
            feedback: Arc::new(RwLock::new(feedback)),
            history: Arc::new(History::with_capacity(config.history_capacity)),
            config: Arc::new(config),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/lessons", get(list_lessons))
        .route("/lessons/{id}", get(get_lesson))
        .route("/lessons/{id}/voices", get(get_lesson_voices))
        .route("/evaluate", post(evaluate_attempt))
        .route("/drill", post(drill_feedback))
        .route("/summary", post(quiz_summary))
        .route("/debug/history", get(debug_history))
        .route("/debug/config", get(debug_config))
        .route("/debug/similarity", get(debug_similarity))
        .route("/admin/reload-feedback", get(admin_reload_feedback))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
        .merge(Metrics::global().router())
}

/// Lesson plus the derived content the quiz card renders.
#[derive(serde::Serialize)]
struct LessonOut {
    #[serde(flatten)]
    lesson: Lesson,
    kind_label: &'static str,
    pitch_marks: Vec<PitchMark>,
}

impl LessonOut {
    fn from(lesson: &Lesson) -> Self {
        Self {
            kind_label: lesson.kind.label(),
            pitch_marks: lesson.pitch_marks(),
            lesson: lesson.clone(),
        }
    }
}

async fn list_lessons(State(state): State<AppState>) -> Json<Vec<LessonOut>> {
    Json(state.catalog.all().iter().map(LessonOut::from).collect())
}

async fn get_lesson(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LessonOut>, (StatusCode, String)> {
    state
        .catalog
        .get(&id)
        .map(|l| Json(LessonOut::from(l)))
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("unknown lesson '{id}'")))
}

async fn get_lesson_voices(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<VoiceClip>>, (StatusCode, String)> {
    state
        .catalog
        .get(&id)
        .map(|l| Json(l.voice_clips()))
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("unknown lesson '{id}'")))
}

#[derive(serde::Deserialize)]
struct EvaluateReq {
    /// Catalog lesson providing the expected phrase; wins over `expected`.
    #[serde(default)]
    lesson_id: Option<String>,
    /// Free-form expected phrase (custom-phrase practice).
    #[serde(default)]
    expected: Option<String>,
    transcript: String,
    confidence: f32,
}

async fn evaluate_attempt(
    State(state): State<AppState>,
    Json(body): Json<EvaluateReq>,
) -> Result<Json<Evaluation>, (StatusCode, String)> {
    let expected = match (&body.lesson_id, &body.expected) {
        (Some(id), _) => state
            .catalog
            .get(id)
            .map(|l| l.phrase.clone())
            .ok_or_else(|| (StatusCode::NOT_FOUND, format!("unknown lesson '{id}'")))?,
        (None, Some(phrase)) => phrase.clone(),
        (None, None) => {
            return Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                "either 'lesson_id' or 'expected' is required".to_string(),
            ))
        }
    };

    let attempt = Attempt::new(body.transcript, expected, body.confidence);
    let eval = {
        let guard = state.feedback.read().expect("rwlock poisoned");
        engine::evaluate(&attempt, &guard)
    };

    state.history.push(&eval, body.lesson_id.as_deref());
    Metrics::global().record_evaluation(eval.tier);
    dev_log_evaluation(&attempt.transcript, &eval);

    Ok(Json(eval))
}

#[derive(serde::Deserialize)]
struct DrillReq {
    lesson_id: String,
}

async fn drill_feedback(
    State(state): State<AppState>,
    Json(body): Json<DrillReq>,
) -> Result<Json<DrillScores>, (StatusCode, String)> {
    if state.catalog.get(&body.lesson_id).is_none() {
        return Err((
            StatusCode::NOT_FOUND,
            format!("unknown lesson '{}'", body.lesson_id),
        ));
    }
    let scores = {
        let guard = state.feedback.read().expect("rwlock poisoned");
        drill::draw_scores(&guard)
    };
    Ok(Json(scores))
}

async fn quiz_summary(
    State(state): State<AppState>,
    Json(scores): Json<Vec<LessonScore>>,
) -> Json<Summary> {
    let guard = state.feedback.read().expect("rwlock poisoned");
    Json(summarize(&scores, &guard))
}

async fn debug_history(State(state): State<AppState>) -> Json<Vec<HistoryEntry>> {
    Json(state.history.snapshot_last_n(10))
}

#[derive(serde::Serialize)]
struct ConfigInfo {
    recognition_lang: String,
    history_capacity: usize,
    total_lessons: usize,
}

async fn debug_config(State(state): State<AppState>) -> Json<ConfigInfo> {
    Json(ConfigInfo {
        recognition_lang: state.config.recognition_lang.clone(),
        history_capacity: state.config.history_capacity,
        total_lessons: state.catalog.len(),
    })
}

async fn debug_similarity(Query(q): Query<HashMap<String, String>>) -> String {
    let transcript = q.get("transcript").cloned().unwrap_or_default();
    let expected = q.get("expected").cloned().unwrap_or_default();
    let sim = similarity::similarity(&transcript, &expected);
    let dist = similarity::edit_distance(
        &similarity::normalize(&transcript),
        &similarity::normalize(&expected),
    );
    format!("similarity={sim:.3} distance={dist}")
}

async fn admin_reload_feedback(State(state): State<AppState>) -> String {
    let fresh = FeedbackConfig::load_from_file(&state.config.feedback_path);
    match state.feedback.write() {
        Ok(mut w) => {
            *w = fresh;
            "reloaded".to_string()
        }
        Err(_) => "failed: lock poisoned".to_string(),
    }
}

// Dev logging gate: TRAINER_DEV_LOG=1 AND dev env (debug build or
// SHUTTLE_ENV in {local, development, dev}).
fn dev_logging_enabled() -> bool {
    let on = std::env::var("TRAINER_DEV_LOG").ok().as_deref() == Some("1");
    if !on {
        return false;
    }
    if cfg!(debug_assertions) {
        return true;
    }
    matches!(
        std::env::var("SHUTTLE_ENV")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "local" | "development" | "dev"
    )
}

fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

/// Minimal, anonymized dev logger for evaluations.
/// Never log the raw transcript. Only hashed id + numeric scores.
fn dev_log_evaluation(transcript: &str, eval: &Evaluation) {
    if !dev_logging_enabled() {
        return;
    }
    let id = anon_hash(transcript);
    info!(
        target: "evaluate",
        %id,
        tier = eval.tier.as_str(),
        similarity = eval.similarity,
        confidence = eval.confidence,
        overall = eval.overall,
    );
}
