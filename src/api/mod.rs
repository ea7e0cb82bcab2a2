use axum::Json;
use axum::extract::{Path, Query};
use axum::routing::{delete, post};
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::Deserialize;

use crate::calendar::MonthView;
use crate::enrollment::EnrollmentSummary;
use crate::error::AppError;
use crate::models::*;
use crate::services::{AnalysisOutcome, BlockView, CourseDetail, Receipt};
use crate::state::AppState;

#[derive(Deserialize)]
struct CourseQueryParams {
    #[serde(default)]
    q: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/courses", get(list_courses))
        .route("/courses/{id}", get(get_course))
        .route("/courses/{id}/blocks", get(list_blocks))
        .route("/events", get(list_events))
        .route("/calendar/{year}/{month}", get(get_calendar))
        .route("/enrollment", get(get_enrollment).post(select_block))
        .route("/enrollment/checkout", post(checkout))
        .route("/enrollment/{course_id}", delete(drop_course))
        .route("/profile", get(get_profile).put(update_profile))
        .route("/profile/reset", post(reset_profile))
        .route("/helper/analyze", post(analyze))
        .route("/helper/transcribe", post(transcribe))
        .route("/helper/submissions", get(list_submissions).post(submit))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    if let Some(db) = &state.db {
        db.ping().await?;
    }
    Ok(StatusCode::OK)
}

async fn list_courses(
    State(state): State<AppState>,
    Query(params): Query<CourseQueryParams>
) -> Json<Vec<Course>> {
    Json(state.portal.search_courses(&params.q).await)
}

async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>
) -> Result<Json<CourseDetail>, AppError> {
    Ok(Json(state.portal.course_detail(&id).await?))
}

async fn list_blocks(
    State(state): State<AppState>,
    Path(id): Path<String>
) -> Result<Json<Vec<BlockView>>, AppError> {
    Ok(Json(state.portal.block_views(&id).await?))
}

async fn list_events(State(state): State<AppState>) -> Json<Vec<SchoolEvent>> {
    Json(state.portal.events().to_vec())
}

async fn get_calendar(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>
) -> Result<Json<MonthView>, AppError> {
    Ok(Json(state.portal.month_view(year, month)?))
}

async fn get_enrollment(State(state): State<AppState>) -> Json<EnrollmentSummary> {
    Json(state.portal.summary().await)
}

async fn select_block(
    State(state): State<AppState>,
    Json(req): Json<EnrollRequest>
) -> Result<Json<EnrollmentSummary>, AppError> {
    let summary = state.portal.select_block(&req.course_id, &req.block_id).await?;
    Ok(Json(summary))
}

async fn drop_course(
    State(state): State<AppState>,
    Path(course_id): Path<String>
) -> Result<Json<EnrollmentSummary>, AppError> {
    Ok(Json(state.portal.drop_course(&course_id).await?))
}

async fn checkout(
    State(state): State<AppState>,
    Json(req): Json<CheckoutRequest>
) -> Result<Json<Receipt>, AppError> {
    Ok(Json(state.portal.checkout(req.method).await?))
}

async fn get_profile(State(state): State<AppState>) -> Json<Student> {
    Json(state.portal.profile().await)
}

async fn update_profile(
    State(state): State<AppState>,
    Json(req): Json<ProfileUpdate>
) -> Result<Json<Student>, AppError> {
    Ok(Json(state.portal.update_profile(req).await?))
}

async fn reset_profile(State(state): State<AppState>) -> Result<Json<Student>, AppError> {
    Ok(Json(state.portal.reset_profile().await?))
}

async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>
) -> Result<Json<AnalysisOutcome>, AppError> {
    let outcome = state.helper.analyze(req.tool, &req.media, &req.prompt).await?;
    Ok(Json(outcome))
}

async fn transcribe(
    State(state): State<AppState>,
    Json(media): Json<MediaUpload>
) -> Result<Json<AnalysisOutcome>, AppError> {
    Ok(Json(state.helper.transcribe(&media).await?))
}

async fn list_submissions(State(state): State<AppState>) -> Result<Json<Vec<AssignmentSubmission>>, AppError> {
    Ok(Json(state.helper.history().await?))
}

async fn submit(
    State(state): State<AppState>,
    Json(req): Json<SubmitRequest>
) -> Result<(StatusCode, Json<AssignmentSubmission>), AppError> {
    let submission = state
        .helper
        .submit(req.tool, &req.analysis, &req.student_notes)
        .await?;
    Ok((StatusCode::CREATED, Json(submission)))
}
