//! In-memory implementation of InteractionRepository
//!
//! Brute-force cosine search over a vector held behind an async RwLock.
//! Nothing survives a restart; used for local development without Qdrant
//! and as the store behind the service tests.

use std::cmp::Ordering;

use async_trait::async_trait;
use tokio::sync::RwLock;

use tutor::{DomainError, Interaction, InteractionRepository, OwnerScope, ScoredInteraction};

struct StoredInteraction {
    scope_key: String,
    interaction: Interaction,
    embedding: Vec<f32>,
}

/// Volatile interaction store
#[derive(Default)]
pub struct InMemoryInteractionRepository {
    entries: RwLock<Vec<StoredInteraction>>,
}

impl InMemoryInteractionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait]
impl InteractionRepository for InMemoryInteractionRepository {
    async fn add(&self, interaction: &Interaction, embedding: Vec<f32>) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;

        if let Some(first) = entries.first() {
            if first.embedding.len() != embedding.len() {
                return Err(DomainError::Repository(format!(
                    "Embedding dimension mismatch: expected {}, got {}",
                    first.embedding.len(),
                    embedding.len()
                )));
            }
        }

        entries.push(StoredInteraction {
            scope_key: interaction.owner_scope.key(),
            interaction: interaction.clone(),
            embedding,
        });

        Ok(())
    }

    async fn search(
        &self,
        scope: &OwnerScope,
        query_vector: Vec<f32>,
        limit: usize,
    ) -> Result<Vec<ScoredInteraction>, DomainError> {
        let scope_key = scope.key();
        let entries = self.entries.read().await;

        let mut results: Vec<ScoredInteraction> = entries
            .iter()
            .filter(|e| e.scope_key == scope_key)
            .map(|e| ScoredInteraction {
                interaction: e.interaction.clone(),
                score: cosine_similarity(&e.embedding, &query_vector),
            })
            .collect();

        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        results.truncate(limit);

        Ok(results)
    }
}
