//! Quiz Routes - Quiz generation and score submission

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    routing::post,
    Json, Router,
};

use super::{ApiError, ErrorResponse};
use crate::models::{QuizQuery, QuizResponse, QuizSubmission, UserProfileResponse};
use crate::AppState;

/// Generate a quiz on a topic
#[utoipa::path(
    post,
    path = "/api/quiz/{topic}",
    params(
        ("topic" = String, Path, description = "Quiz topic"),
        QuizQuery
    ),
    responses(
        (status = 200, description = "Generated quiz; malformed questions are dropped", body = QuizResponse),
        (status = 400, description = "Parameters out of range", body = ErrorResponse),
        (status = 500, description = "Model failure", body = ErrorResponse)
    ),
    tag = "Quiz"
)]
pub async fn generate_quiz(
    State(state): State<AppState>,
    Path(topic): Path<String>,
    query: Result<Query<QuizQuery>, QueryRejection>,
) -> Result<Json<QuizResponse>, ApiError> {
    let Query(query) = query?;

    let quiz = state
        .tutor_service
        .generate_quiz(&topic, query.difficulty, query.num_questions)
        .await?;

    Ok(Json(QuizResponse {
        quiz: quiz.into_iter().map(Into::into).collect(),
    }))
}

/// Submit a quiz score
#[utoipa::path(
    post,
    path = "/api/quiz/submit",
    request_body = QuizSubmission,
    responses(
        (status = 200, description = "Score stored", body = UserProfileResponse),
        (status = 400, description = "Score outside 0-100", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Quiz"
)]
pub async fn submit_quiz(
    State(state): State<AppState>,
    payload: Result<Json<QuizSubmission>, JsonRejection>,
) -> Result<Json<UserProfileResponse>, ApiError> {
    let Json(payload) = payload?;

    if let Some(taken_at) = payload.timestamp {
        tracing::debug!("Quiz on {} taken at {}", payload.topic, taken_at);
    }

    let profile = state
        .user_service
        .submit_quiz_score(&payload.user_id, &payload.topic, payload.score)
        .await?;

    Ok(Json(profile.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/quiz/submit", post(submit_quiz))
        .route("/api/quiz/:topic", post(generate_quiz))
}
