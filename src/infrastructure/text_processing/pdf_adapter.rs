use std::io::Write;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::ExtractedText;

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Extracts page text with `pdf_oxide`. A failure on any page fails the
/// whole document.
#[derive(Debug, Clone)]
pub struct PdfAdapter {
    timeout: Duration,
}

impl PdfAdapter {
    pub fn new() -> Self {
        Self {
            timeout: EXTRACTION_TIMEOUT,
        }
    }

    fn extract_pages(path: &Path) -> Result<Vec<String>, FileLoaderError> {
        let mut doc = PdfDocument::open(path)
            .map_err(|e| FileLoaderError::ParseFailed(format!("failed to parse PDF: {e}")))?;

        let page_count = doc
            .page_count()
            .map_err(|e| FileLoaderError::ParseFailed(format!("failed to read page count: {e}")))?;

        let mut pages = Vec::with_capacity(page_count);

        for page_index in 0..page_count {
            let text = doc.extract_text(page_index).map_err(|e| {
                FileLoaderError::PageExtractionFailed {
                    page: page_index + 1,
                    reason: e.to_string(),
                }
            })?;
            pages.push(text);
        }

        Ok(pages)
    }
}

impl Default for PdfAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileLoader for PdfAdapter {
    #[tracing::instrument(skip(self, data), fields(size_bytes = data.len()))]
    async fn extract_text(&self, data: &[u8]) -> Result<ExtractedText, FileLoaderError> {
        let mut temp_file = tempfile::NamedTempFile::new().map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to create temp file: {e}"))
        })?;

        temp_file.write_all(data).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to write temp file: {e}"))
        })?;

        let temp_path = temp_file.path().to_path_buf();
        let task = tokio::task::spawn_blocking(move || Self::extract_pages(&temp_path));

        let pages = tokio::time::timeout(self.timeout, task)
            .await
            .map_err(|_| FileLoaderError::ExtractionFailed("PDF extraction timed out".to_string()))?
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        tracing::info!(page_count = pages.len(), "PDF text extraction complete");

        Ok(ExtractedText::new(pages))
    }
}
