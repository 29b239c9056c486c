//! Ollama Embedding Service
//!
//! Vector generation for the interaction memory via `POST /api/embeddings`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use tutor::{DomainError, EmbeddingService};

use super::{endpoint, error_from_response};

/// Embedding service backed by Ollama
#[derive(Clone)]
pub struct OllamaEmbedding {
    client: Client,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

impl OllamaEmbedding {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl EmbeddingService for OllamaEmbedding {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        let request = EmbeddingRequest {
            model: &self.model,
            prompt: text,
        };

        let response = self
            .client
            .post(endpoint(&self.base_url, "/api/embeddings"))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                DomainError::ExternalService(format!("Failed to reach embedding service: {e}"))
            })?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body: EmbeddingResponse = response.json().await.map_err(|e| {
            DomainError::ExternalService(format!("Failed to parse embedding response: {e}"))
        })?;

        if body.embedding.is_empty() {
            return Err(DomainError::ExternalService(
                "No embedding returned".to_string(),
            ));
        }

        Ok(body.embedding)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}
