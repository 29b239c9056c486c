//! Lesson - Lesson content ingestion

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use tutor::LessonPlan;

/// Lesson ingestion request
#[derive(Debug, Deserialize, ToSchema)]
pub struct IngestLessonRequest {
    pub lesson_id: String,
    pub title: Option<String>,
    pub level: Option<i32>,
    pub content: String,
}

impl From<IngestLessonRequest> for LessonPlan {
    fn from(req: IngestLessonRequest) -> Self {
        Self {
            lesson_id: req.lesson_id,
            title: req.title,
            level: req.level,
            content: req.content,
        }
    }
}

/// Lesson ingestion response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IngestLessonResponse {
    pub lesson_id: String,
    /// Id of the stored interaction
    pub interaction_id: Uuid,
}
