mod file_loader;
mod llm_client;
mod repository_error;
mod user_profile_repository;

pub use file_loader::{FileLoader, FileLoaderError};
pub use llm_client::{LlmClient, LlmClientError};
pub use repository_error::RepositoryError;
pub use user_profile_repository::UserProfileRepository;
