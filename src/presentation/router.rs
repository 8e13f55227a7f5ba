use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{FileLoader, LlmClient};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    chat_ws_handler, get_profile_handler, health_handler, learn_handler, missing_user_id_handler,
    upsert_profile_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<F, L>(state: AppState<F, L>) -> Router
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let upload_limit = DefaultBodyLimit::max(state.settings.upload.max_file_size_bytes());

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/learn/go-openai",
            post(learn_handler::<F, L>).layer(upload_limit),
        )
        .route("/ws/{id}", get(chat_ws_handler::<F, L>))
        .route(
            "/users/{id}",
            put(upsert_profile_handler::<F, L>).get(get_profile_handler::<F, L>),
        )
        .route(
            "/users/",
            put(missing_user_id_handler).get(missing_user_id_handler),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
