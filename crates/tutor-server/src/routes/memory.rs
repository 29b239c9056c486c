//! Memory Routes - Personal interaction recall

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::post,
    Json, Router,
};

use tutor::OwnerScope;

use super::{ApiError, ErrorResponse};
use crate::models::{MemoryResponse, SearchMemoriesRequest, DEFAULT_SEARCH_LIMIT};
use crate::AppState;

/// Search a learner's past exchanges
#[utoipa::path(
    post,
    path = "/api/users/{user_id}/memories/search",
    params(
        ("user_id" = String, Path, description = "User ID")
    ),
    request_body = SearchMemoriesRequest,
    responses(
        (status = 200, description = "Closest exchanges first", body = Vec<MemoryResponse>),
        (status = 500, description = "Embedding or search failure", body = ErrorResponse)
    ),
    tag = "Memory"
)]
pub async fn search_memories(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    payload: Result<Json<SearchMemoriesRequest>, JsonRejection>,
) -> Result<Json<Vec<MemoryResponse>>, ApiError> {
    let Json(payload) = payload?;

    let results = state
        .memory
        .retrieve_scored(
            &OwnerScope::user(user_id),
            &payload.query,
            payload.limit.unwrap_or(DEFAULT_SEARCH_LIMIT),
        )
        .await?;

    Ok(Json(results.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/users/:user_id/memories/search", post(search_memories))
}
