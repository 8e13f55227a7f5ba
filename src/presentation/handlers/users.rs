use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::application::ports::{FileLoader, LlmClient};
use crate::domain::{UserId, UserIdError};
use crate::presentation::state::AppState;

use super::error::error_response;

#[derive(Debug, Deserialize)]
pub struct UpsertProfileRequest {
    pub display_name: String,
    pub age: u32,
}

#[tracing::instrument(skip(state, request))]
pub async fn upsert_profile_handler<F, L>(
    State(state): State<AppState<F, L>>,
    Path(user_id): Path<String>,
    Json(request): Json<UpsertProfileRequest>,
) -> Response
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
{
    let user_id = match UserId::parse(user_id) {
        Ok(id) => id,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };

    match state
        .profile_service
        .save(user_id, request.display_name, request.age)
        .await
    {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to store user profile");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn get_profile_handler<F, L>(
    State(state): State<AppState<F, L>>,
    Path(user_id): Path<String>,
) -> Response
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
{
    let user_id = match UserId::parse(user_id) {
        Ok(id) => id,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };

    match state.profile_service.find(&user_id).await {
        Ok(Some(profile)) => (StatusCode::OK, Json(profile)).into_response(),
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            format!("no profile for user {}", user_id),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load user profile");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// `/users/` with nothing after the slash never reaches the `{id}` route.
pub async fn missing_user_id_handler() -> Response {
    error_response(StatusCode::BAD_REQUEST, UserIdError::Empty.to_string())
}
