use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Pdf,
}

impl ContentType {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "application/pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadValidationError {
    #[error("Only PDF file are allowed")]
    UnsupportedContentType(String),
    #[error("File extension not supported")]
    UnsupportedExtension(String),
}

/// A file received over multipart, held only for the duration of one request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: String, content_type: String, data: Vec<u8>) -> Self {
        Self {
            filename,
            content_type,
            data,
        }
    }

    /// The declared media type is checked before the extension.
    pub fn validate(&self) -> Result<ContentType, UploadValidationError> {
        let content_type = ContentType::from_mime(&self.content_type).ok_or_else(|| {
            UploadValidationError::UnsupportedContentType(self.content_type.clone())
        })?;

        let extension_matches = Path::new(&self.filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(content_type.extension()));

        if !extension_matches {
            return Err(UploadValidationError::UnsupportedExtension(
                self.filename.clone(),
            ));
        }

        Ok(content_type)
    }

    pub fn size_bytes(&self) -> u64 {
        self.data.len() as u64
    }
}
