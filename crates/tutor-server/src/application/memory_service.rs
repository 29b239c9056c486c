//! Interaction Memory (Use Case)
//!
//! Records interactions with their embeddings and retrieves the closest
//! ones for a scope. Embedding and nearest-neighbour search are delegated
//! to the injected ports; a failing embedding service fails the call.

use std::sync::Arc;

use tutor::domain::METADATA_TYPE;
use tutor::{
    DomainError, EmbeddingService, Interaction, InteractionMetadata, InteractionRepository,
    OwnerScope, ScoredInteraction,
};

/// Metadata `type` value for lesson content
pub const LESSON_TYPE: &str = "lesson";

/// Durable, scope-filtered associative memory
pub struct InteractionMemory {
    repo: Arc<dyn InteractionRepository>,
    embedding: Arc<dyn EmbeddingService>,
}

impl InteractionMemory {
    pub fn new(repo: Arc<dyn InteractionRepository>, embedding: Arc<dyn EmbeddingService>) -> Self {
        Self { repo, embedding }
    }

    /// Embed and persist one interaction
    pub async fn record(
        &self,
        owner_scope: OwnerScope,
        text: String,
        metadata: InteractionMetadata,
    ) -> Result<Interaction, DomainError> {
        let embedding = self.embedding.embed(&text).await?;
        let interaction = Interaction::new(owner_scope, text, metadata);

        self.repo.add(&interaction, embedding).await?;

        tracing::debug!(
            "Recorded interaction {} in {}",
            interaction.id,
            interaction.owner_scope
        );

        Ok(interaction)
    }

    /// Up to `k` texts from `owner_scope` closest to `query`, most similar first.
    /// An empty result means there is no prior context.
    pub async fn retrieve(
        &self,
        owner_scope: &OwnerScope,
        query: &str,
        k: usize,
    ) -> Result<Vec<String>, DomainError> {
        Ok(self
            .retrieve_scored(owner_scope, query, k)
            .await?
            .into_iter()
            .map(|r| r.interaction.text)
            .collect())
    }

    /// Same as [`Self::retrieve`], keeping the interaction and its score
    pub async fn retrieve_scored(
        &self,
        owner_scope: &OwnerScope,
        query: &str,
        k: usize,
    ) -> Result<Vec<ScoredInteraction>, DomainError> {
        if k == 0 {
            return Ok(Vec::new());
        }

        let query_vector = self.embedding.embed(query).await?;
        let results = self.repo.search(owner_scope, query_vector, k).await?;

        tracing::debug!("Retrieved {} interactions from {}", results.len(), owner_scope);

        Ok(results)
    }

    /// Store lesson content in the shared lesson scope
    pub async fn add_lesson_content(
        &self,
        lesson_id: &str,
        content: String,
        title: Option<String>,
        level: Option<i32>,
    ) -> Result<Interaction, DomainError> {
        if lesson_id.trim().is_empty() {
            return Err(DomainError::Validation("lesson_id must not be empty".to_string()));
        }
        if content.trim().is_empty() {
            return Err(DomainError::Validation("content must not be empty".to_string()));
        }

        let mut metadata = InteractionMetadata::new();
        metadata.insert(METADATA_TYPE.to_string(), LESSON_TYPE.into());
        metadata.insert("lesson_id".to_string(), lesson_id.trim().into());
        if let Some(title) = title {
            metadata.insert("title".to_string(), title.into());
        }
        if let Some(level) = level {
            metadata.insert("level".to_string(), level.into());
        }

        let interaction = self.record(OwnerScope::Lesson, content, metadata).await?;
        tracing::info!("Ingested lesson {} as {}", lesson_id, interaction.id);

        Ok(interaction)
    }
}
