use std::sync::Arc;

use crate::application::ports::{FileLoader, LlmClient};
use crate::application::services::{ChatService, DocumentService, ProfileService};
use crate::presentation::config::Settings;

pub struct AppState<F, L>
where
    F: FileLoader,
    L: LlmClient,
{
    pub document_service: Arc<DocumentService<F>>,
    pub chat_service: Arc<ChatService<F, L>>,
    pub profile_service: Arc<ProfileService>,
    pub settings: Settings,
}

impl<F, L> Clone for AppState<F, L>
where
    F: FileLoader,
    L: LlmClient,
{
    fn clone(&self) -> Self {
        Self {
            document_service: Arc::clone(&self.document_service),
            chat_service: Arc::clone(&self.chat_service),
            profile_service: Arc::clone(&self.profile_service),
            settings: self.settings.clone(),
        }
    }
}
