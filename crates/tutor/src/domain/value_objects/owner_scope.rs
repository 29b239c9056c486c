//! OwnerScope - Who an interaction belongs to

use serde::{Deserialize, Serialize};

const USER_PREFIX: &str = "user:";
const LESSON_KEY: &str = "lesson";

/// Ownership of a stored interaction.
///
/// Personal memory is keyed by user id; lesson content lives in a single
/// shared scope. The scope key is what the similarity search filters on, so
/// two scopes are equal exactly when their keys are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum OwnerScope {
    User(String),
    Lesson,
}

impl OwnerScope {
    pub fn user(user_id: impl Into<String>) -> Self {
        Self::User(user_id.into())
    }

    /// Stable string key stored alongside each vector
    pub fn key(&self) -> String {
        match self {
            OwnerScope::User(id) => format!("{USER_PREFIX}{id}"),
            OwnerScope::Lesson => LESSON_KEY.to_string(),
        }
    }
}

impl std::fmt::Display for OwnerScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.key())
    }
}

impl std::str::FromStr for OwnerScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == LESSON_KEY {
            return Ok(OwnerScope::Lesson);
        }
        match s.strip_prefix(USER_PREFIX) {
            Some(id) if !id.is_empty() => Ok(OwnerScope::User(id.to_string())),
            _ => Err(format!("Unknown owner scope: {}", s)),
        }
    }
}
