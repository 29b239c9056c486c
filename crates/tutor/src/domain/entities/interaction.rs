//! Interaction - One unit of tutoring memory
//!
//! Pure domain entity without infrastructure dependencies.
//! The embedding vector is derived at write time and owned by the repository.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{MetadataValue, OwnerScope};

/// Open metadata map attached to an interaction
pub type InteractionMetadata = BTreeMap<String, MetadataValue>;

/// Metadata key carrying the interaction kind (`qa`, `lesson`)
pub const METADATA_TYPE: &str = "type";

/// Interaction - A piece of stored text with its owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// Unique identifier (also the vector point id)
    pub id: Uuid,
    /// Who this interaction belongs to; fixed at creation
    pub owner_scope: OwnerScope,
    /// Literal content, embedded and returned verbatim
    pub text: String,
    /// Additional scalar metadata (type, level, lesson_id, ...)
    #[serde(default)]
    pub metadata: InteractionMetadata,
    /// When this interaction was recorded
    pub created_at: DateTime<Utc>,
}

impl Interaction {
    /// Create a new interaction with generated ID and timestamp
    pub fn new(owner_scope: OwnerScope, text: String, metadata: InteractionMetadata) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_scope,
            text,
            metadata,
            created_at: Utc::now(),
        }
    }

    /// Format a tutoring exchange the way it is stored in memory
    pub fn format_exchange(question: &str, answer: &str) -> String {
        format!("Q: {}\nA: {}", question, answer)
    }
}

/// Interaction returned from a similarity search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredInteraction {
    pub interaction: Interaction,
    /// Similarity score reported by the backend (higher is closer)
    pub score: f32,
}
