//! Tutor Domain Library
//!
//! Core domain types and interfaces for the Tutor personalised tutoring service.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (Interaction, UserProfile, QuizQuestion, LessonPlan)
//!   - `value_objects/`: Immutable value types (OwnerScope, MetadataValue)
//!   - `services/`: Pure domain services (conversation window, prompts, quiz parsing)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!   - `services/`: External service interfaces (embedding, completion)
//!
//! # Usage
//!
//! ```rust,ignore
//! use tutor::domain::{Interaction, OwnerScope};
//! use tutor::ports::{InteractionRepository, EmbeddingService};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    build_quiz_prompt, build_tutor_prompt, parse_quiz, ConversationWindow, DomainError, Exchange,
    Interaction, InteractionMetadata, LessonPlan, MetadataValue, OwnerScope, QuizQuestion,
    ScoredInteraction, UserProfile,
};
pub use ports::{
    CompletionOptions, CompletionResponse, CompletionService, EmbeddingService,
    InteractionRepository, UserRepository,
};
