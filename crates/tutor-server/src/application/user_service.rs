//! User Application Service (Use Case)
//!
//! Orchestrates profile operations over the UserRepository port.

use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use tutor::domain::DEFAULT_LEVEL;
use tutor::{DomainError, UserProfile, UserRepository};

/// Application service for learner profiles.
///
/// Profile mutations are read-modify-write over whole rows, so they run
/// one at a time under `writes`.
pub struct UserService<R: UserRepository> {
    repo: Arc<R>,
    writes: Mutex<()>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            writes: Mutex::new(()),
        }
    }

    /// Create a new learner at the default level
    pub async fn create(&self, name: String) -> Result<UserProfile, DomainError> {
        let profile = UserProfile::new(name)?;
        let saved = self.repo.save(&profile).await?;

        tracing::info!("Created user: {} ({})", saved.name, saved.user_id);

        Ok(saved)
    }

    /// Get a profile by ID. Ids that are not UUIDs cannot exist.
    pub async fn get(&self, user_id: &str) -> Result<Option<UserProfile>, DomainError> {
        match Uuid::parse_str(user_id.trim()) {
            Ok(id) => self.repo.find_by_id(id).await,
            Err(_) => Ok(None),
        }
    }

    /// Load, change and save one profile while holding the write lock
    async fn update<F>(&self, user_id: &str, change: F) -> Result<UserProfile, DomainError>
    where
        F: FnOnce(&mut UserProfile) -> Result<(), DomainError>,
    {
        let _guard = self.writes.lock().await;
        let mut profile = self
            .get(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", user_id))?;
        change(&mut profile)?;
        self.repo.save(&profile).await
    }

    /// Set the learner's level
    pub async fn set_level(&self, user_id: &str, level: i32) -> Result<UserProfile, DomainError> {
        self.update(user_id, |profile| profile.set_level(level)).await
    }

    /// Mark a lesson as completed
    pub async fn complete_lesson(
        &self,
        user_id: &str,
        lesson_id: &str,
    ) -> Result<UserProfile, DomainError> {
        self.update(user_id, |profile| {
            if !profile.complete_lesson(lesson_id)? {
                tracing::debug!("Lesson {} already completed by {}", lesson_id, user_id);
            }
            Ok(())
        })
        .await
    }

    /// Store a quiz score in percent; the latest score per topic wins
    pub async fn submit_quiz_score(
        &self,
        user_id: &str,
        topic: &str,
        score: f64,
    ) -> Result<UserProfile, DomainError> {
        let saved = self
            .update(user_id, |profile| profile.record_quiz_score(topic, score))
            .await?;

        tracing::info!("Quiz score {} on {} for user {}", score, topic, user_id);

        Ok(saved)
    }

    /// Level to tutor a chat message at. Known learners are marked active;
    /// unknown ids chat at the default level without a profile.
    pub async fn level_for_chat(&self, user_id: &str) -> Result<i32, DomainError> {
        let _guard = self.writes.lock().await;
        match self.get(user_id).await? {
            Some(mut profile) => {
                profile.touch();
                let saved = self.repo.save(&profile).await?;
                Ok(saved.current_level)
            }
            None => {
                tracing::debug!("No profile for {}, using level {}", user_id, DEFAULT_LEVEL);
                Ok(DEFAULT_LEVEL)
            }
        }
    }
}
