//! Memory - Scored recall from the interaction store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use tutor::ScoredInteraction;

/// Default number of results for memory and lesson searches
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Search request
#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchMemoriesRequest {
    pub query: String,
    /// Maximum results (default 5)
    pub limit: Option<usize>,
}

/// One recalled interaction
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MemoryResponse {
    pub id: Uuid,
    pub owner_scope: String,
    pub text: String,
    #[schema(value_type = Object)]
    pub metadata: serde_json::Value,
    /// Similarity to the query, higher is closer
    pub score: f32,
    pub created_at: DateTime<Utc>,
}

impl From<ScoredInteraction> for MemoryResponse {
    fn from(scored: ScoredInteraction) -> Self {
        let interaction = scored.interaction;
        Self {
            id: interaction.id,
            owner_scope: interaction.owner_scope.key(),
            metadata: serde_json::to_value(&interaction.metadata)
                .unwrap_or_else(|_| serde_json::json!({})),
            text: interaction.text,
            score: scored.score,
            created_at: interaction.created_at,
        }
    }
}
