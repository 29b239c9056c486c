//! LessonPlan - Lesson content ingested into shared memory

use serde::{Deserialize, Serialize};

/// Lesson content submitted for ingestion into the lesson scope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonPlan {
    pub lesson_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub level: Option<i32>,
    pub content: String,
}
