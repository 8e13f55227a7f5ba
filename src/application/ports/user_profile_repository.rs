use async_trait::async_trait;

use crate::domain::{UserId, UserProfile};

use super::RepositoryError;

#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    /// Inserts or replaces the profile stored under `profile.user_id`.
    async fn upsert(&self, profile: &UserProfile) -> Result<(), RepositoryError>;

    async fn get(&self, user_id: &UserId) -> Result<Option<UserProfile>, RepositoryError>;
}
