//! User - Learner profile DTOs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use tutor::UserProfile;

/// Query for `POST /api/users`
#[derive(Debug, Deserialize, IntoParams)]
pub struct CreateUserQuery {
    /// Display name of the learner
    pub name: String,
}

/// Create user response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateUserResponse {
    pub user_id: Uuid,
}

/// Full learner profile
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserProfileResponse {
    pub user_id: Uuid,
    pub name: String,
    pub current_level: i32,
    pub completed_lessons: Vec<String>,
    /// Topic -> score in percent
    #[schema(value_type = Object)]
    pub quiz_scores: BTreeMap<String, f64>,
    /// Mean of `quiz_scores`, absent before the first quiz
    pub average_score: Option<f64>,
    #[schema(value_type = Object)]
    pub learning_preferences: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl From<UserProfile> for UserProfileResponse {
    fn from(profile: UserProfile) -> Self {
        let average_score = profile.average_score();
        Self {
            user_id: profile.user_id,
            name: profile.name,
            current_level: profile.current_level,
            completed_lessons: profile.completed_lessons.into_iter().collect(),
            quiz_scores: profile.quiz_scores,
            average_score,
            learning_preferences: profile.learning_preferences,
            created_at: profile.created_at,
            last_active: profile.last_active,
        }
    }
}

/// Update level request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateLevelRequest {
    pub level: i32,
}

/// Complete lesson request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CompleteLessonRequest {
    pub lesson_id: String,
}
