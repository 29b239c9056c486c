//! Tutor API Data Models
//!
//! - Chat: tutoring exchanges
//! - User: learner profiles and progress
//! - Quiz: generated quizzes and score submission
//! - Lesson: lesson ingestion
//! - Memory: scored recall from the interaction store

mod chat;
mod lesson;
mod memory;
mod quiz;
mod user;

pub use chat::*;
pub use lesson::*;
pub use memory::*;
pub use quiz::*;
pub use user::*;
