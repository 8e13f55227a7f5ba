use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::{FileLoader, LlmClient};
use crate::domain::UploadedFile;
use crate::presentation::state::AppState;

use super::error::error_response;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct LearnResponse {
    pub message: String,
    pub data: String,
}

/// One-shot PDF to text: validate the `file` field, extract every page,
/// return the concatenated text.
#[tracing::instrument(skip(state, multipart))]
pub async fn learn_handler<F, L>(
    State(state): State<AppState<F, L>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
{
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            tracing::error!(error = %rejection.body_text(), "Request is not a multipart form");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, rejection.body_text());
        }
    };

    let upload = match read_file_field(&mut multipart).await {
        Ok(upload) => upload,
        Err(message) => {
            tracing::error!(error = %message, "Failed to read uploaded file");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, message);
        }
    };

    tracing::debug!(
        filename = %upload.filename,
        content_type = %upload.content_type,
        bytes = upload.data.len(),
        "Processing file upload"
    );

    match state.document_service.extract_upload(upload).await {
        Ok(text) => (
            StatusCode::OK,
            Json(LearnResponse {
                message: "Success".to_string(),
                data: text,
            }),
        )
            .into_response(),
        Err(e) if e.is_client_error() => {
            tracing::warn!(error = %e, "Upload rejected");
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        }
        Err(e) => {
            tracing::error!(error = %e, "Upload extraction failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

async fn read_file_field(multipart: &mut Multipart) -> Result<UploadedFile, String> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Failed to read multipart: {}", e))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| format!("Failed to read file: {}", e))?;

        return Ok(UploadedFile::new(filename, content_type, data.to_vec()));
    }

    Err(format!("missing form field: {}", FILE_FIELD))
}
