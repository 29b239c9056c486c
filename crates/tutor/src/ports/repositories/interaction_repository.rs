//! Interaction Repository Port
//!
//! Abstract interface for the vector-indexed interaction store.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, Interaction, OwnerScope, ScoredInteraction};

/// Repository interface for Interaction entities
///
/// Implementations must apply the scope constraint inside the similarity
/// search itself. Searching broadly and filtering afterwards can return
/// fewer than `limit` results for a scope that has more, and is not allowed.
#[async_trait]
pub trait InteractionRepository: Send + Sync {
    /// Persist an interaction with its embedding vector
    async fn add(&self, interaction: &Interaction, embedding: Vec<f32>) -> Result<(), DomainError>;

    /// Nearest interactions within exactly `scope`, most similar first
    async fn search(
        &self,
        scope: &OwnerScope,
        query_vector: Vec<f32>,
        limit: usize,
    ) -> Result<Vec<ScoredInteraction>, DomainError>;
}
