//! UserProfile - A learner and their progress
//!
//! Pure domain entity without infrastructure dependencies.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::DomainError;

/// Level every new learner starts at
pub const DEFAULT_LEVEL: i32 = 1;

/// UserProfile - Learner identity, level and scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: Uuid,
    pub name: String,
    pub current_level: i32,
    pub completed_lessons: BTreeSet<String>,
    /// Topic -> score in percent (0-100); the latest submission wins
    pub quiz_scores: BTreeMap<String, f64>,
    pub learning_preferences: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl UserProfile {
    /// Create a new profile with generated ID and timestamps
    pub fn new(name: String) -> Result<Self, DomainError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::Validation("name must not be empty".to_string()));
        }

        let now = Utc::now();
        Ok(Self {
            user_id: Uuid::new_v4(),
            name,
            current_level: DEFAULT_LEVEL,
            completed_lessons: BTreeSet::new(),
            quiz_scores: BTreeMap::new(),
            learning_preferences: serde_json::json!({}),
            created_at: now,
            last_active: now,
        })
    }

    pub fn set_level(&mut self, level: i32) -> Result<(), DomainError> {
        if level < DEFAULT_LEVEL {
            return Err(DomainError::Validation(format!(
                "level must be at least {}, got {}",
                DEFAULT_LEVEL, level
            )));
        }
        self.current_level = level;
        self.touch();
        Ok(())
    }

    /// Mark a lesson as completed. Returns false if it already was.
    pub fn complete_lesson(&mut self, lesson_id: &str) -> Result<bool, DomainError> {
        let lesson_id = lesson_id.trim();
        if lesson_id.is_empty() {
            return Err(DomainError::Validation("lesson_id must not be empty".to_string()));
        }
        self.touch();
        Ok(self.completed_lessons.insert(lesson_id.to_string()))
    }

    pub fn record_quiz_score(&mut self, topic: &str, score: f64) -> Result<(), DomainError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(DomainError::Validation("topic must not be empty".to_string()));
        }
        if !(0.0..=100.0).contains(&score) {
            return Err(DomainError::Validation(format!(
                "score must be between 0 and 100, got {}",
                score
            )));
        }
        self.quiz_scores.insert(topic.to_string(), score);
        self.touch();
        Ok(())
    }

    /// Mean of all recorded quiz scores
    pub fn average_score(&self) -> Option<f64> {
        if self.quiz_scores.is_empty() {
            return None;
        }
        Some(self.quiz_scores.values().sum::<f64>() / self.quiz_scores.len() as f64)
    }

    pub fn touch(&mut self) {
        self.last_active = Utc::now();
    }
}
