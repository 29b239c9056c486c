//! Lesson Routes - Shared lesson content

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};

use tutor::{LessonPlan, OwnerScope};

use super::{ApiError, ErrorResponse};
use crate::models::{
    IngestLessonRequest, IngestLessonResponse, MemoryResponse, SearchMemoriesRequest,
    DEFAULT_SEARCH_LIMIT,
};
use crate::AppState;

/// Ingest lesson content
#[utoipa::path(
    post,
    path = "/api/lessons",
    request_body = IngestLessonRequest,
    responses(
        (status = 200, description = "Lesson stored", body = IngestLessonResponse),
        (status = 400, description = "Empty lesson id or content", body = ErrorResponse),
        (status = 500, description = "Embedding or storage failure", body = ErrorResponse)
    ),
    tag = "Lessons"
)]
pub async fn ingest_lesson(
    State(state): State<AppState>,
    payload: Result<Json<IngestLessonRequest>, JsonRejection>,
) -> Result<Json<IngestLessonResponse>, ApiError> {
    let Json(payload) = payload?;

    let plan: LessonPlan = payload.into();
    let interaction = state
        .memory
        .add_lesson_content(&plan.lesson_id, plan.content, plan.title, plan.level)
        .await?;

    Ok(Json(IngestLessonResponse {
        lesson_id: plan.lesson_id,
        interaction_id: interaction.id,
    }))
}

/// Search lesson content
#[utoipa::path(
    post,
    path = "/api/lessons/search",
    request_body = SearchMemoriesRequest,
    responses(
        (status = 200, description = "Closest lesson content first", body = Vec<MemoryResponse>),
        (status = 500, description = "Embedding or search failure", body = ErrorResponse)
    ),
    tag = "Lessons"
)]
pub async fn search_lessons(
    State(state): State<AppState>,
    payload: Result<Json<SearchMemoriesRequest>, JsonRejection>,
) -> Result<Json<Vec<MemoryResponse>>, ApiError> {
    let Json(payload) = payload?;

    let results = state
        .memory
        .retrieve_scored(
            &OwnerScope::Lesson,
            &payload.query,
            payload.limit.unwrap_or(DEFAULT_SEARCH_LIMIT),
        )
        .await?;

    Ok(Json(results.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/lessons", post(ingest_lesson))
        .route("/api/lessons/search", post(search_lessons))
}
