use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use axum::Router;
use portal::api::router;
use portal::catalog::{Catalog, sample_events};
use portal::db::{MemoryRecordStore, RecordStore, SubmissionRepository};
use portal::gemini::NoopAnalysisClient;
use portal::services::{AssignmentHelper, PortalService};
use portal::state::AppState;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn app() -> Router {
    let store: Arc<dyn RecordStore> = Arc::new(MemoryRecordStore::new());
    let portal = PortalService::load(Catalog::sample(), sample_events(), store.clone())
        .await
        .expect("Failed to load portal");
    let helper = AssignmentHelper::new(
        Arc::new(NoopAnalysisClient),
        SubmissionRepository::submissions(store),
    );

    router(AppState {
        portal: Arc::new(portal),
        helper: Arc::new(helper),
        db: None,
    })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(match body {
            Some(v) => Body::from(v.to_string()),
            None => Body::empty(),
        })
        .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

#[tokio::test]
async fn test_health() {
    let app = app().await;
    let (status, _) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_course_search() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/courses?q=quantum", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["code"], "PHYS201");

    let (status, _) = send(&app, "GET", "/courses/404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_enrollment_conflict_returns_409() {
    let app = app().await;

    let (status, body) = send(&app, "POST", "/enrollment", Some(json!({"course_id": "1", "block_id": "1-b1"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_cost"], 6200);

    let (status, body) = send(&app, "POST", "/enrollment", Some(json!({"course_id": "2", "block_id": "2-b1"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Time Conflict");

    let (_, blocks) = send(&app, "GET", "/courses/2/blocks", None).await;
    assert_eq!(blocks[0]["status"], "conflict");
    assert_eq!(blocks[2]["status"], "full");

    let (status, body) = send(&app, "DELETE", "/enrollment/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_cost"], 0);
}

#[tokio::test]
async fn test_checkout() {
    let app = app().await;

    let (status, _) = send(&app, "POST", "/enrollment/checkout", Some(json!({"method": "GCash"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    send(&app, "POST", "/enrollment", Some(json!({"course_id": "4", "block_id": "4-b2"}))).await;
    let (status, body) = send(&app, "POST", "/enrollment/checkout", Some(json!({"method": "BDO"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_cost"], 3600);
    assert_eq!(body["method"], "BDO");
}

#[tokio::test]
async fn test_calendar_month() {
    let app = app().await;

    let (status, body) = send(&app, "GET", "/calendar/2024/3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["days_in_month"], 31);

    let day = body["days"]["20"].as_array().expect("day 20");
    assert!(day.iter().any(|i| i["kind"] == "assignment" && i["title"] == "CS301: Complexity Lab"));

    let (status, _) = send(&app, "GET", "/calendar/2024/13", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_profile_update_and_reset() {
    let app = app().await;

    let (status, body) = send(&app, "PUT", "/profile", Some(json!({"major": "Mathematics", "year": 4}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["major"], "Mathematics");
    assert_eq!(body["name"], "Alex Sterling");

    let (_, body) = send(&app, "POST", "/profile/reset", None).await;
    assert_eq!(body["year"], 3);
}

#[tokio::test]
async fn test_helper_flow() {
    let app = app().await;

    let (status, _) = send(&app, "POST", "/helper/analyze", Some(json!({"tool": "image", "data": "AAAA"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "POST",
        "/helper/analyze",
        Some(json!({"tool": "image", "data": "AAAA", "prompt": "check my work"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["succeeded"], false);

    let (status, _) = send(
        &app,
        "POST",
        "/helper/submissions",
        Some(json!({"tool": "image", "analysis": "Looks correct", "student_notes": "week 3"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, history) = send(&app, "GET", "/helper/submissions", None).await;
    assert_eq!(history[0]["analysis"], "Looks correct");
}
