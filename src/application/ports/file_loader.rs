use async_trait::async_trait;

use crate::domain::ExtractedText;

/// Turns raw document bytes into per-page text.
#[async_trait]
pub trait FileLoader: Send + Sync {
    async fn extract_text(&self, data: &[u8]) -> Result<ExtractedText, FileLoaderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FileLoaderError {
    #[error("failed to parse document: {0}")]
    ParseFailed(String),
    #[error("failed to extract page {page}: {reason}")]
    PageExtractionFailed { page: usize, reason: String },
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
}
