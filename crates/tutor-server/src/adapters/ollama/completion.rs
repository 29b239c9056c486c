//! Ollama Completion Service
//!
//! Single-prompt, non-streaming generation via `POST /api/generate`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use tutor::{CompletionOptions, CompletionResponse, CompletionService, DomainError};

use super::{endpoint, error_from_response};

/// Completion service backed by Ollama
#[derive(Clone)]
pub struct OllamaCompletion {
    client: Client,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions<'a>,
}

#[derive(Serialize)]
struct GenerateOptions<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<&'a [String]>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    model: String,
    response: String,
    #[serde(default)]
    prompt_eval_count: Option<u32>,
    #[serde(default)]
    eval_count: Option<u32>,
}

impl OllamaCompletion {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl CompletionService for OllamaCompletion {
    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: options.temperature,
                num_predict: options.max_tokens,
                stop: options.stop_sequences.as_deref(),
            },
        };

        tracing::debug!("Requesting completion from {} ({} chars)", self.model, prompt.len());

        let response = self
            .client
            .post(endpoint(&self.base_url, "/api/generate"))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                DomainError::ExternalService(format!("Failed to reach completion service: {e}"))
            })?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body: GenerateResponse = response.json().await.map_err(|e| {
            DomainError::ExternalService(format!("Failed to parse completion response: {e}"))
        })?;

        Ok(CompletionResponse {
            content: body.response,
            model: body.model,
            prompt_tokens: body.prompt_eval_count,
            completion_tokens: body.eval_count,
        })
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}
