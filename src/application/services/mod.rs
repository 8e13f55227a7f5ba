mod chat_service;
mod document_service;
mod profile_service;

pub use chat_service::{
    ChatService, ChatSession, ChatSessionError, RelayFrame, SessionEnd, SessionSummary,
};
pub use document_service::{DocumentError, DocumentService};
pub use profile_service::ProfileService;
