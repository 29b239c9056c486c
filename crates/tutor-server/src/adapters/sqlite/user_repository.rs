//! SQLite implementation of UserRepository

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use uuid::Uuid;

use tutor::{DomainError, UserProfile, UserRepository};

/// Open the profile database, creating the file and its directory if needed,
/// and run pending migrations.
pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    use anyhow::Context;

    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid DATABASE_URL: {database_url}"))?
        .create_if_missing(true);

    if let Some(dir) = options.get_filename().parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create database directory {:?}", dir))?;
        }
    }

    let pool = SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .context("Failed to open profile database")?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    Ok(pool)
}

/// SQLite implementation of UserRepository
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: String,
    name: String,
    current_level: i32,
    completed_lessons: String,
    quiz_scores: String,
    learning_preferences: String,
    created_at: DateTime<Utc>,
    last_active: DateTime<Utc>,
}

impl TryFrom<UserRow> for UserProfile {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let corrupt = |field: &str, e: &dyn std::fmt::Display| {
            DomainError::Repository(format!("Corrupt {} for user {}: {}", field, row.user_id, e))
        };

        Ok(Self {
            user_id: Uuid::parse_str(&row.user_id).map_err(|e| corrupt("user_id", &e))?,
            completed_lessons: serde_json::from_str(&row.completed_lessons)
                .map_err(|e| corrupt("completed_lessons", &e))?,
            quiz_scores: serde_json::from_str(&row.quiz_scores)
                .map_err(|e| corrupt("quiz_scores", &e))?,
            learning_preferences: serde_json::from_str(&row.learning_preferences)
                .map_err(|e| corrupt("learning_preferences", &e))?,
            name: row.name,
            current_level: row.current_level,
            created_at: row.created_at,
            last_active: row.last_active,
        })
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, DomainError> {
    serde_json::to_string(value).map_err(|e| DomainError::Repository(e.to_string()))
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserProfile>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM user_profiles WHERE user_id = ?")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        row.map(TryInto::try_into).transpose()
    }

    async fn save(&self, profile: &UserProfile) -> Result<UserProfile, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO user_profiles
                (user_id, name, current_level, completed_lessons, quiz_scores,
                 learning_preferences, created_at, last_active)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (user_id) DO UPDATE SET
                name = excluded.name,
                current_level = excluded.current_level,
                completed_lessons = excluded.completed_lessons,
                quiz_scores = excluded.quiz_scores,
                learning_preferences = excluded.learning_preferences,
                last_active = excluded.last_active
            RETURNING *
            "#,
        )
        .bind(profile.user_id.to_string())
        .bind(&profile.name)
        .bind(profile.current_level)
        .bind(to_json(&profile.completed_lessons)?)
        .bind(to_json(&profile.quiz_scores)?)
        .bind(to_json(&profile.learning_preferences)?)
        .bind(profile.created_at)
        .bind(profile.last_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        row.try_into()
    }
}
