use std::fmt::Display;
use std::path::PathBuf;
use std::sync::Arc;

use futures::{Sink, SinkExt, Stream, StreamExt};

use crate::application::ports::{FileLoader, LlmClient, LlmClientError};
use crate::domain::ConversationContext;
use crate::infrastructure::observability::sanitize_prompt;

use super::document_service::{DocumentError, DocumentService};

/// Frames exchanged with a chat peer, independent of the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayFrame {
    Text(String),
    Binary(Vec<u8>),
    Close,
}

/// Why a session left its read/reply loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    PeerClosed,
    ReadFailed(String),
    CompletionFailed(String),
    WriteFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub end: SessionEnd,
    pub turns: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ChatSessionError {
    #[error("failed to load seed document: {0}")]
    SeedUnavailable(#[from] DocumentError),
    #[error("completion failed: {0}")]
    Completion(#[from] LlmClientError),
}

/// Opens chat sessions, each seeded with a fresh extraction of one document.
pub struct ChatService<F, L>
where
    F: FileLoader + ?Sized,
    L: LlmClient + ?Sized,
{
    documents: DocumentService<F>,
    llm_client: Arc<L>,
    seed_document_path: PathBuf,
}

impl<F, L> ChatService<F, L>
where
    F: FileLoader + ?Sized,
    L: LlmClient + ?Sized,
{
    pub fn new(file_loader: Arc<F>, llm_client: Arc<L>, seed_document_path: PathBuf) -> Self {
        Self {
            documents: DocumentService::new(file_loader),
            llm_client,
            seed_document_path,
        }
    }

    pub async fn open_session(
        &self,
        session_id: impl Into<String>,
    ) -> Result<ChatSession<L>, ChatSessionError> {
        let seed = self.documents.load_file(&self.seed_document_path).await?;
        let context = ConversationContext::seeded(&seed.newline_terminated());

        let session_id = session_id.into();
        tracing::info!(
            session_id = %session_id,
            seed_pages = seed.page_count(),
            context_bytes = context.size_bytes(),
            "Chat session opened"
        );

        Ok(ChatSession {
            session_id,
            llm_client: Arc::clone(&self.llm_client),
            context,
        })
    }
}

pub struct ChatSession<L>
where
    L: LlmClient + ?Sized,
{
    session_id: String,
    llm_client: Arc<L>,
    context: ConversationContext,
}

impl<L> ChatSession<L>
where
    L: LlmClient + ?Sized,
{
    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    /// One turn: grow the context with the prompt, complete it, record the reply.
    pub async fn respond(&mut self, prompt: &str) -> Result<String, ChatSessionError> {
        self.context.push_user_prompt(prompt);

        tracing::debug!(
            prompt = %sanitize_prompt(prompt),
            context_bytes = self.context.size_bytes(),
            "Requesting completion"
        );

        let reply = self.llm_client.complete(&self.context.as_messages()).await?;
        self.context.push_assistant_reply(&reply);

        Ok(reply)
    }

    /// Reads frames until the peer goes away or any step fails. Each inbound
    /// text or binary frame produces exactly one reply frame of the same kind.
    /// A turn counts once its reply has been written.
    #[tracing::instrument(skip_all, fields(session_id = %self.session_id))]
    pub async fn run<S, K, E>(mut self, mut inbound: S, mut outbound: K) -> SessionSummary
    where
        S: Stream<Item = Result<RelayFrame, E>> + Unpin,
        E: Display,
        K: Sink<RelayFrame> + Unpin,
        K::Error: Display,
    {
        let mut turns = 0;
        let end = loop {
            let (prompt, binary) = match inbound.next().await {
                Some(Ok(RelayFrame::Text(text))) => (text, false),
                Some(Ok(RelayFrame::Binary(bytes))) => {
                    (String::from_utf8_lossy(&bytes).into_owned(), true)
                }
                Some(Ok(RelayFrame::Close)) | None => break SessionEnd::PeerClosed,
                Some(Err(e)) => {
                    tracing::warn!(error = %e, "read failed");
                    break SessionEnd::ReadFailed(e.to_string());
                }
            };

            let reply = match self.respond(&prompt).await {
                Ok(reply) => reply,
                Err(e) => {
                    tracing::error!(error = %e, "Completion failed, closing session");
                    break SessionEnd::CompletionFailed(e.to_string());
                }
            };

            tracing::debug!(reply = %sanitize_prompt(&reply), "Relaying completion");

            let frame = if binary {
                RelayFrame::Binary(reply.into_bytes())
            } else {
                RelayFrame::Text(reply)
            };

            if let Err(e) = outbound.send(frame).await {
                tracing::warn!(error = %e, "write failed");
                break SessionEnd::WriteFailed(e.to_string());
            }
            turns += 1;
        };

        tracing::info!(?end, turns, "Chat session closed");

        SessionSummary { end, turns }
    }
}
