//! User Routes - Learner profiles and progress
//!
//! HTTP handlers that delegate to UserService for business logic.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{get, post, put},
    Json, Router,
};

use super::{ApiError, ErrorResponse};
use crate::models::{
    CompleteLessonRequest, CreateUserQuery, CreateUserResponse, UpdateLevelRequest,
    UserProfileResponse,
};
use crate::AppState;

/// Create a learner
#[utoipa::path(
    post,
    path = "/api/users",
    params(CreateUserQuery),
    responses(
        (status = 200, description = "User created", body = CreateUserResponse),
        (status = 400, description = "Empty name", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    query: Result<Query<CreateUserQuery>, QueryRejection>,
) -> Result<Json<CreateUserResponse>, ApiError> {
    let Query(query) = query?;

    let profile = state.user_service.create(query.name).await?;

    Ok(Json(CreateUserResponse {
        user_id: profile.user_id,
    }))
}

/// Get a learner profile
#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    params(
        ("user_id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserProfileResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserProfileResponse>, ApiError> {
    let profile = state
        .user_service
        .get(&user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(profile.into()))
}

/// Set a learner's level
#[utoipa::path(
    put,
    path = "/api/users/{user_id}/level",
    params(
        ("user_id" = String, Path, description = "User ID")
    ),
    request_body = UpdateLevelRequest,
    responses(
        (status = 200, description = "Level updated", body = UserProfileResponse),
        (status = 400, description = "Level below 1", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn update_level(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    payload: Result<Json<UpdateLevelRequest>, JsonRejection>,
) -> Result<Json<UserProfileResponse>, ApiError> {
    let Json(payload) = payload?;

    let profile = state
        .user_service
        .set_level(&user_id, payload.level)
        .await?;

    Ok(Json(profile.into()))
}

/// Mark a lesson as completed
#[utoipa::path(
    post,
    path = "/api/users/{user_id}/lessons",
    params(
        ("user_id" = String, Path, description = "User ID")
    ),
    request_body = CompleteLessonRequest,
    responses(
        (status = 200, description = "Lesson recorded", body = UserProfileResponse),
        (status = 400, description = "Empty lesson id", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn complete_lesson(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    payload: Result<Json<CompleteLessonRequest>, JsonRejection>,
) -> Result<Json<UserProfileResponse>, ApiError> {
    let Json(payload) = payload?;

    let profile = state
        .user_service
        .complete_lesson(&user_id, &payload.lesson_id)
        .await?;

    Ok(Json(profile.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/users", post(create_user))
        .route("/api/users/:user_id", get(get_user))
        .route("/api/users/:user_id/level", put(update_level))
        .route("/api/users/:user_id/lessons", post(complete_lesson))
}
