use std::path::Path;
use std::sync::Arc;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ExtractedText, UploadValidationError, UploadedFile};

pub struct DocumentService<F>
where
    F: FileLoader + ?Sized,
{
    file_loader: Arc<F>,
}

impl<F> DocumentService<F>
where
    F: FileLoader + ?Sized,
{
    pub fn new(file_loader: Arc<F>) -> Self {
        Self { file_loader }
    }

    /// Validates an upload and returns the text of all its pages, concatenated
    /// in page order with no separator.
    #[tracing::instrument(
        skip(self, upload),
        fields(filename = %upload.filename, size_bytes = upload.size_bytes())
    )]
    pub async fn extract_upload(&self, upload: UploadedFile) -> Result<String, DocumentError> {
        upload.validate()?;

        let text = self.file_loader.extract_text(&upload.data).await?;
        tracing::info!(page_count = text.page_count(), "Upload extracted");

        Ok(text.concatenated())
    }

    /// Reads a document from disk and extracts it. Nothing is cached; every
    /// call hits the file system and the loader again.
    #[tracing::instrument(skip(self, path), fields(path = %path.display()))]
    pub async fn load_file(&self, path: &Path) -> Result<ExtractedText, DocumentError> {
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| DocumentError::Io(format!("{}: {}", path.display(), e)))?;

        let text = self.file_loader.extract_text(&data).await?;
        tracing::debug!(page_count = text.page_count(), "Document loaded");

        Ok(text)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error(transparent)]
    Validation(#[from] UploadValidationError),
    #[error(transparent)]
    Extraction(#[from] FileLoaderError),
    #[error("failed to read document: {0}")]
    Io(String),
}

impl DocumentError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
