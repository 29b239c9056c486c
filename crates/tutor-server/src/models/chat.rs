//! Chat - One tutoring exchange

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Chat request
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub message: String,
    pub user_id: String,
    /// Extra context appended to what the tutor recalls on its own
    #[serde(default)]
    pub context: Option<String>,
}

/// Chat response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub response: String,
}
