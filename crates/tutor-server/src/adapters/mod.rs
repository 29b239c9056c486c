//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod memory;
pub mod ollama;
pub mod qdrant;
pub mod sqlite;

// Re-exports
pub use memory::InMemoryInteractionRepository;
pub use ollama::{OllamaCompletion, OllamaEmbedding};
pub use qdrant::QdrantInteractionRepository;
pub use sqlite::SqliteUserRepository;
