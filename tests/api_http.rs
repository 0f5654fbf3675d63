// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - GET /lessons, /lessons/{id}, /lessons/{id}/voices
// - POST /evaluate (contract, 404, 422)
// - POST /drill, POST /summary
// - GET /debug/similarity

use serde_json::json;
use serde_json::Value as Json;
use shuttle_axum::axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt as _; // for `oneshot`

use pronunciation_trainer::config::TrainerConfig;
use pronunciation_trainer::{create_router, AppState};

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

/// Build the same Router the binary uses.
fn test_router() -> Router {
    let state = AppState::from_config(TrainerConfig::default());
    create_router(state)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Json) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("build GET request");
    let resp = app.oneshot(req).await.expect("oneshot GET");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    let v = serde_json::from_slice(&bytes).unwrap_or(Json::Null);
    (status, v)
}

async fn post_json(app: Router, uri: &str, payload: Json) -> (StatusCode, Json) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("build POST request");
    let resp = app.oneshot(req).await.expect("oneshot POST");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    let v = serde_json::from_slice(&bytes).unwrap_or(Json::Null);
    (status, v)
}

#[tokio::test]
async fn api_health_returns_200_and_ok_body() {
    let app = test_router();

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");

    let resp = app.oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK, "health should be 200");

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    let body = String::from_utf8(bytes).expect("utf8");
    assert_eq!(body.trim(), "ok", "health body should be 'ok'");
}

#[tokio::test]
async fn api_lessons_lists_the_full_catalog() {
    let (status, v) = get_json(test_router(), "/lessons").await;
    assert_eq!(status, StatusCode::OK);
    let arr = v.as_array().expect("lessons must be an array");
    assert_eq!(arr.len(), 4, "catalog has four lessons");

    let first = &arr[0];
    assert_eq!(first["id"], json!("bridge-crossing"));
    assert_eq!(first["kind"], json!("pitch-accent"));
    assert_eq!(first["kind_label"], json!("Pitch Accent Training"));
    assert!(first["pitch_marks"].is_array());
    assert_eq!(first["pitch_marks"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn api_lesson_lookup_and_404() {
    let (status, v) = get_json(test_router(), "/lessons/rain-beautiful").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["phrase"], json!("雨の音が美しい"));

    let (status, _) = get_json(test_router(), "/lessons/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn api_lesson_voices_use_recorded_names() {
    let (status, v) = get_json(test_router(), "/lessons/bridge-crossing/voices").await;
    assert_eq!(status, StatusCode::OK);
    let clips = v.as_array().expect("voices must be an array");
    assert_eq!(clips.len(), 3);
    assert_eq!(
        clips[0]["file"],
        json!("voices/bridge-crossing-fenrir-man1.wav")
    );
}

#[tokio::test]
async fn api_evaluate_returns_expected_json_fields() {
    let payload = json!({
        "lesson_id": "bridge-crossing",
        "transcript": "橋を渡る",
        "confidence": 0.9
    });
    let (status, v) = post_json(test_router(), "/evaluate", payload).await;
    assert!(status.is_success(), "POST /evaluate should be 2xx, got {status}");

    // Contract checks for UI consumers
    assert!(v.get("tier").is_some(), "missing 'tier'");
    assert!(v.get("similarity").is_some(), "missing 'similarity'");
    assert!(v.get("confidence").is_some(), "missing 'confidence'");
    assert!(v.get("overall").is_some(), "missing 'overall'");
    assert!(v.get("message").is_some(), "missing 'message'");

    assert_eq!(v["tier"], json!("SUCCESS"));
    let sim = v["similarity"].as_f64().unwrap();
    assert!((sim - 1.0).abs() < 1e-6, "exact transcript must score 1.0");
    assert_eq!(v["message"], json!("Bravo! Excellent pronunciation!"));
}

#[tokio::test]
async fn api_evaluate_with_free_form_expected_phrase() {
    let payload = json!({
        "expected": "hello",
        "transcript": "hallo",
        "confidence": 0.5
    });
    let (status, v) = post_json(test_router(), "/evaluate", payload).await;
    assert!(status.is_success());
    assert_eq!(v["tier"], json!("PARTIAL"));
    let overall = v["overall"].as_f64().unwrap();
    assert!((overall - 0.65).abs() < 1e-4, "overall ~0.65, got {overall}");
}

#[tokio::test]
async fn api_evaluate_unknown_lesson_is_404() {
    let payload = json!({
        "lesson_id": "no-such-lesson",
        "transcript": "x",
        "confidence": 0.5
    });
    let (status, _) = post_json(test_router(), "/evaluate", payload).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn api_evaluate_without_expected_is_422() {
    let payload = json!({ "transcript": "x", "confidence": 0.5 });
    let (status, _) = post_json(test_router(), "/evaluate", payload).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn api_drill_scores_stay_in_band() {
    for _ in 0..10 {
        let payload = json!({ "lesson_id": "hospital-visit" });
        let (status, v) = post_json(test_router(), "/drill", payload).await;
        assert!(status.is_success());
        let pitch = v["pitch"].as_u64().unwrap();
        let pron = v["pronunciation"].as_u64().unwrap();
        assert!((70..=100).contains(&pitch), "pitch {pitch} out of band");
        assert!((70..=100).contains(&pron), "pronunciation {pron} out of band");
        assert!(v["feedback"].as_str().is_some_and(|s| !s.is_empty()));
    }
}

#[tokio::test]
async fn api_summary_aggregates_scores() {
    let payload = json!([
        { "pitch": 90, "pronunciation": 95 },
        { "pitch": 92, "pronunciation": 99 }
    ]);
    let (status, v) = post_json(test_router(), "/summary", payload).await;
    assert!(status.is_success());
    assert_eq!(v["overall"], json!(94));
    assert_eq!(v["level"], json!("Advanced"));
    assert!(v["recommendations"].is_array());
}

#[tokio::test]
async fn api_debug_similarity_reports_both_numbers() {
    let req = Request::builder()
        .method("GET")
        .uri("/debug/similarity?transcript=hallo&expected=hello")
        .body(Body::empty())
        .expect("build GET /debug/similarity");
    let resp = test_router()
        .oneshot(req)
        .await
        .expect("oneshot /debug/similarity");
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    let body = String::from_utf8(bytes).expect("utf8");
    assert!(
        body.contains("similarity=0.800") && body.contains("distance=1"),
        "unexpected debug body: {body}"
    );
}
