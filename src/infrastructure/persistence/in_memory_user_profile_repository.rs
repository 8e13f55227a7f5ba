use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{RepositoryError, UserProfileRepository};
use crate::domain::{UserId, UserProfile};

/// Process-local profile store, used when no database is configured.
#[derive(Default)]
pub struct InMemoryUserProfileRepository {
    profiles: RwLock<HashMap<UserId, UserProfile>>,
}

impl InMemoryUserProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserProfileRepository for InMemoryUserProfileRepository {
    async fn upsert(&self, profile: &UserProfile) -> Result<(), RepositoryError> {
        self.profiles
            .write()
            .await
            .insert(profile.user_id.clone(), profile.clone());
        Ok(())
    }

    async fn get(&self, user_id: &UserId) -> Result<Option<UserProfile>, RepositoryError> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn later_upsert_replaces_earlier_profile() {
        let repository = InMemoryUserProfileRepository::new();
        let user_id = UserId::parse("someone@example.com").unwrap();

        repository
            .upsert(&UserProfile::new(user_id.clone(), "First".to_string(), 20))
            .await
            .unwrap();
        repository
            .upsert(&UserProfile::new(user_id.clone(), "Second".to_string(), 21))
            .await
            .unwrap();

        let stored = repository.get(&user_id).await.unwrap().unwrap();
        assert_eq!(stored.display_name, "Second");
        assert_eq!(stored.age, 21);
    }
}
