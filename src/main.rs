use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use pdfchat::application::ports::UserProfileRepository;
use pdfchat::application::services::{ChatService, DocumentService, ProfileService};
use pdfchat::infrastructure::llm::OpenAiClient;
use pdfchat::infrastructure::observability::{TracingConfig, init_tracing};
use pdfchat::infrastructure::persistence::{
    InMemoryUserProfileRepository, PgUserProfileRepository, create_pool, run_migrations,
};
use pdfchat::infrastructure::text_processing::PdfAdapter;
use pdfchat::presentation::config::DatabaseSettings;
use pdfchat::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("failed to load configuration")?;

    init_tracing(&TracingConfig::from_settings(environment, &settings.logging));
    tracing::debug!(?settings, "Configuration loaded");

    let file_loader = Arc::new(PdfAdapter::new());
    let llm_client =
        Arc::new(OpenAiClient::from_settings(&settings.llm).context("failed to build LLM client")?);
    let profile_repository = profile_repository(&settings.database).await?;

    let state = AppState {
        document_service: Arc::new(DocumentService::new(Arc::clone(&file_loader))),
        chat_service: Arc::new(ChatService::new(
            Arc::clone(&file_loader),
            Arc::clone(&llm_client),
            settings.chat.seed_document_path.clone(),
        )),
        profile_service: Arc::new(ProfileService::new(profile_repository)),
        settings: settings.clone(),
    };

    let router = create_router(state);

    let host: std::net::IpAddr = settings
        .server
        .host
        .parse()
        .with_context(|| format!("invalid server.host: {}", settings.server.host))?;
    let addr = SocketAddr::from((host, settings.server.port));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(%addr, environment = %environment, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn profile_repository(
    database: &DatabaseSettings,
) -> anyhow::Result<Arc<dyn UserProfileRepository>> {
    match &database.url {
        Some(url) => {
            let pool = create_pool(url, database).await?;
            run_migrations(&pool).await?;
            Ok(Arc::new(PgUserProfileRepository::new(pool)))
        }
        None => {
            tracing::warn!("No database URL configured; user profiles are kept in memory");
            Ok(Arc::new(InMemoryUserProfileRepository::new()))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
