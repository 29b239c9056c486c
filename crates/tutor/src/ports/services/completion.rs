//! Completion Service Port
//!
//! Abstract interface for single-prompt text completion against a
//! locally hosted language model.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Options for a completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionOptions {
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Temperature (0.0 - 2.0)
    pub temperature: Option<f32>,
    /// Stop sequences
    pub stop_sequences: Option<Vec<String>>,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            max_tokens: None,
            temperature: Some(0.7),
            stop_sequences: None,
        }
    }
}

/// Response from a completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated text, verbatim
    pub content: String,
    /// Model that generated the response
    pub model: String,
    /// Tokens in the prompt, when the backend reports it
    pub prompt_tokens: Option<u32>,
    /// Tokens generated, when the backend reports it
    pub completion_tokens: Option<u32>,
}

/// Text completion interface
///
/// The tutor treats the model as opaque: a prompt goes in, text comes out,
/// and nothing about the text is validated.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Generate a completion for a single prompt
    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError>;

    /// Get the model ID being used
    fn model_id(&self) -> &str;
}
