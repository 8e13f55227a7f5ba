mod in_memory_user_profile_repository;
mod pg_pool;
mod pg_user_profile_repository;

pub use in_memory_user_profile_repository::InMemoryUserProfileRepository;
pub use pg_pool::{create_pool, run_migrations};
pub use pg_user_profile_repository::PgUserProfileRepository;
