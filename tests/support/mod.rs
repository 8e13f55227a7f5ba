#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use pdfchat::application::ports::{
    FileLoader, FileLoaderError, LlmClient, LlmClientError, UserProfileRepository,
};
use pdfchat::application::services::{ChatService, DocumentService, ProfileService};
use pdfchat::domain::{ChatMessage, ExtractedText};
use pdfchat::infrastructure::persistence::InMemoryUserProfileRepository;
use pdfchat::presentation::config::{
    ChatSettings, DatabaseSettings, LlmSettings, LoggingSettings, ServerSettings, Settings,
    UploadSettings,
};
use pdfchat::presentation::{AppState, create_router};

pub const PAGE_BREAK: char = '\x0c';
pub const BROKEN_MARKER: &str = "%BROKEN";
pub const BAD_PAGE_MARKER: &str = "!BADPAGE";

/// Treats bytes as UTF-8 with form feeds between pages.
pub struct StubFileLoader;

#[async_trait::async_trait]
impl FileLoader for StubFileLoader {
    async fn extract_text(&self, data: &[u8]) -> Result<ExtractedText, FileLoaderError> {
        let text = String::from_utf8(data.to_vec())
            .map_err(|e| FileLoaderError::ParseFailed(e.to_string()))?;

        if text.starts_with(BROKEN_MARKER) {
            return Err(FileLoaderError::ParseFailed("missing xref table".to_string()));
        }

        let mut pages = Vec::new();
        for (index, page) in text.split(PAGE_BREAK).enumerate() {
            if page.contains(BAD_PAGE_MARKER) {
                return Err(FileLoaderError::PageExtractionFailed {
                    page: index + 1,
                    reason: "unsupported font encoding".to_string(),
                });
            }
            pages.push(page.to_string());
        }

        Ok(ExtractedText::new(pages))
    }
}

pub enum ScriptedReply {
    Reply(String),
    Fail,
}

/// Records every completion request and answers from a script, falling back
/// to numbered replies once the script runs out.
#[derive(Default)]
pub struct RecordingLlmClient {
    requests: Mutex<Vec<Vec<ChatMessage>>>,
    script: Mutex<VecDeque<ScriptedReply>>,
}

impl RecordingLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(script: Vec<ScriptedReply>) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            script: Mutex::new(script.into()),
        }
    }

    pub fn requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl LlmClient for RecordingLlmClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmClientError> {
        let call_number = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(messages.to_vec());
            requests.len()
        };

        match self.script.lock().unwrap().pop_front() {
            Some(ScriptedReply::Reply(reply)) => Ok(reply),
            Some(ScriptedReply::Fail) => Err(LlmClientError::RateLimited),
            None => Ok(format!("reply {}", call_number)),
        }
    }
}

/// A seed document on disk for the stub loader.
pub fn seed_document(pages: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let content = pages.join(&PAGE_BREAK.to_string());
    file.write_all(content.as_bytes()).unwrap();
    file
}

pub fn test_settings(seed_document_path: PathBuf) -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        llm: LlmSettings {
            base_url: "http://localhost:9".to_string(),
            api_key: "test-key".to_string(),
            chat_model: "gpt-4o".to_string(),
            timeout_seconds: 5,
        },
        chat: ChatSettings { seed_document_path },
        upload: UploadSettings {
            max_file_size_mb: 1,
        },
        database: DatabaseSettings {
            url: None,
            max_connections: 1,
            connect_retries: 0,
            connect_backoff_ms: 1,
        },
        logging: LoggingSettings { json: false },
    }
}

pub fn chat_service(
    llm_client: Arc<RecordingLlmClient>,
    seed_document_path: PathBuf,
) -> ChatService<StubFileLoader, RecordingLlmClient> {
    ChatService::new(Arc::new(StubFileLoader), llm_client, seed_document_path)
}

pub fn test_app(llm_client: Arc<RecordingLlmClient>, seed_document_path: PathBuf) -> axum::Router {
    let file_loader = Arc::new(StubFileLoader);
    let repository: Arc<dyn UserProfileRepository> = Arc::new(InMemoryUserProfileRepository::new());

    let state = AppState {
        document_service: Arc::new(DocumentService::new(Arc::clone(&file_loader))),
        chat_service: Arc::new(ChatService::new(
            Arc::clone(&file_loader),
            llm_client,
            seed_document_path.clone(),
        )),
        profile_service: Arc::new(ProfileService::new(repository)),
        settings: test_settings(seed_document_path),
    };

    create_router(state)
}

/// Builds a multipart body with a single field.
pub fn multipart_body(
    boundary: &str,
    field: &str,
    filename: &str,
    content_type: &str,
    data: &[u8],
) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}
