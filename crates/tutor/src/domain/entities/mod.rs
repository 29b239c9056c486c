//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Interaction: A stored memory unit (Q/A exchange or lesson content)
//! - UserProfile: A learner and their progress
//! - QuizQuestion: One parsed multiple-choice question
//! - LessonPlan: Lesson content submitted for ingestion

mod interaction;
mod lesson;
mod quiz;
mod user_profile;

pub use interaction::*;
pub use lesson::*;
pub use quiz::*;
pub use user_profile::*;
