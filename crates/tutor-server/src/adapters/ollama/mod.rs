//! Ollama Adapters
//!
//! Embedding and completion against a locally hosted Ollama server.

mod completion;
mod embedding;

pub use completion::OllamaCompletion;
pub use embedding::OllamaEmbedding;

use reqwest::Response;
use serde::Deserialize;
use tutor::DomainError;

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Turn a non-success response into an ExternalService error
async fn error_from_response(response: Response) -> DomainError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.error)
        .unwrap_or(body);

    DomainError::ExternalService(format!("Ollama API error ({}): {}", status, message))
}
