use std::sync::Arc;

use crate::application::ports::{RepositoryError, UserProfileRepository};
use crate::domain::{UserId, UserProfile};

pub struct ProfileService {
    repository: Arc<dyn UserProfileRepository>,
}

impl ProfileService {
    pub fn new(repository: Arc<dyn UserProfileRepository>) -> Self {
        Self { repository }
    }

    /// Last write wins; earlier values for the same id are replaced wholesale.
    #[tracing::instrument(skip(self, display_name), fields(user_id = %user_id))]
    pub async fn save(
        &self,
        user_id: UserId,
        display_name: String,
        age: u32,
    ) -> Result<UserProfile, RepositoryError> {
        let profile = UserProfile::new(user_id, display_name, age);
        self.repository.upsert(&profile).await?;
        tracing::info!("User profile stored");
        Ok(profile)
    }

    pub async fn find(&self, user_id: &UserId) -> Result<Option<UserProfile>, RepositoryError> {
        self.repository.get(user_id).await
    }
}
