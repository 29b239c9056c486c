//! Qdrant Repository Implementations

mod interaction_repository;

pub use interaction_repository::QdrantInteractionRepository;
