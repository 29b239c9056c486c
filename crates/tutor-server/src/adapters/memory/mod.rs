//! In-Process Repository Implementations

mod interaction_repository;

pub use interaction_repository::InMemoryInteractionRepository;
