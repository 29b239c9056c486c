//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod interaction_repository;
mod user_repository;

pub use interaction_repository::*;
pub use user_repository::*;
