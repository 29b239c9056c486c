//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! repositories and external services.

mod memory_service;
mod tutor_service;
mod user_service;

pub use memory_service::InteractionMemory;
pub use tutor_service::{TutorConfig, TutorService};
pub use user_service::UserService;
