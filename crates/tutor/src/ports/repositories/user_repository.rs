//! User Repository Port
//!
//! Abstract interface for UserProfile persistence operations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, UserProfile};

/// Repository interface for UserProfile entities
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a profile by user ID
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserProfile>, DomainError>;

    /// Save a profile (insert or update)
    async fn save(&self, profile: &UserProfile) -> Result<UserProfile, DomainError>;
}
