//! Chat Routes - Tutoring exchange
//!
//! HTTP handlers that delegate to TutorService for business logic.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};

use super::{ApiError, ErrorResponse};
use crate::models::{ChatRequest, ChatResponse};
use crate::AppState;

/// Ask the tutor a question
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Tutor response", body = ChatResponse),
        (status = 400, description = "Empty message or user id", body = ErrorResponse),
        (status = 500, description = "Model or memory store failure", body = ErrorResponse)
    ),
    tag = "Chat"
)]
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(payload) = payload?;

    let level = state.user_service.level_for_chat(&payload.user_id).await?;

    let response = state
        .tutor_service
        .answer(
            &payload.user_id,
            &payload.message,
            level,
            payload.context.as_deref(),
        )
        .await?;

    Ok(Json(ChatResponse { response }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/chat", post(chat))
}
