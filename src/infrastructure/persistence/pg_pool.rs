use std::time::Duration;

use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::{info, instrument, warn};

use crate::application::ports::RepositoryError;
use crate::presentation::config::DatabaseSettings;

/// Wait before retry number `retry` (zero-based), doubling from `initial`.
pub fn retry_delay(initial: Duration, retry: u32) -> Duration {
    initial.saturating_mul(2u32.saturating_pow(retry))
}

/// Connects to PostgreSQL, retrying with exponential back-off as configured
/// in `database.connect_retries` and `database.connect_backoff_ms`.
#[instrument(skip(url, settings), fields(max_connections = settings.max_connections))]
pub async fn create_pool(url: &str, settings: &DatabaseSettings) -> Result<PgPool, RepositoryError> {
    let initial = Duration::from_millis(settings.connect_backoff_ms);
    let mut retry = 0;

    loop {
        let error = match PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect(url)
            .await
        {
            Ok(pool) => {
                info!(retries = retry, "PostgreSQL connection pool established");
                return Ok(pool);
            }
            Err(e) => e,
        };

        if retry >= settings.connect_retries {
            return Err(RepositoryError::ConnectionFailed(error.to_string()));
        }

        let delay = retry_delay(initial, retry);
        retry += 1;
        warn!(
            error = %error,
            retries_left = settings.connect_retries - retry,
            delay_ms = delay.as_millis(),
            "PostgreSQL connection failed, retrying"
        );
        tokio::time::sleep(delay).await;
    }
}

#[instrument(skip(pool))]
pub async fn run_migrations(pool: &PgPool) -> Result<(), RepositoryError> {
    sqlx::migrate!()
        .run(pool)
        .await
        .map_err(|e| RepositoryError::MigrationFailed(e.to_string()))?;
    info!("Database migrations applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_delay_doubles_from_the_initial_backoff() {
        let initial = Duration::from_millis(250);

        assert_eq!(retry_delay(initial, 0), Duration::from_millis(250));
        assert_eq!(retry_delay(initial, 1), Duration::from_millis(500));
        assert_eq!(retry_delay(initial, 3), Duration::from_millis(2000));
    }

    #[test]
    fn retry_delay_saturates_instead_of_overflowing() {
        assert_eq!(retry_delay(Duration::MAX, 40), Duration::MAX);
    }
}
