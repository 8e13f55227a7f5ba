use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use crate::application::ports::{RepositoryError, UserProfileRepository};
use crate::domain::{UserId, UserProfile};

pub struct PgUserProfileRepository {
    pool: PgPool,
}

impl PgUserProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserProfileRow {
    user_id: String,
    display_name: String,
    age: i32,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserProfileRow> for UserProfile {
    type Error = RepositoryError;

    fn try_from(row: UserProfileRow) -> Result<Self, Self::Error> {
        let user_id =
            UserId::parse(row.user_id).map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
        let age = u32::try_from(row.age)
            .map_err(|_| RepositoryError::QueryFailed(format!("negative age: {}", row.age)))?;

        Ok(UserProfile {
            user_id,
            display_name: row.display_name,
            age,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl UserProfileRepository for PgUserProfileRepository {
    #[instrument(skip(self, profile), fields(user_id = %profile.user_id))]
    async fn upsert(&self, profile: &UserProfile) -> Result<(), RepositoryError> {
        let age = i32::try_from(profile.age)
            .map_err(|_| RepositoryError::QueryFailed(format!("age out of range: {}", profile.age)))?;

        sqlx::query(
            r#"
            INSERT INTO user_profiles (user_id, display_name, age, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE
            SET display_name = EXCLUDED.display_name,
                age = EXCLUDED.age,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(profile.user_id.as_str())
        .bind(&profile.display_name)
        .bind(age)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn get(&self, user_id: &UserId) -> Result<Option<UserProfile>, RepositoryError> {
        let row = sqlx::query_as::<_, UserProfileRow>(
            r#"
            SELECT user_id, display_name, age, updated_at
            FROM user_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        row.map(UserProfile::try_from).transpose()
    }
}
