use std::fmt;
use std::path::PathBuf;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub chat: ChatSettings,
    pub upload: UploadSettings,
    pub database: DatabaseSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Deserialize)]
pub struct LlmSettings {
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    pub chat_model: String,
    pub timeout_seconds: u64,
}

impl fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &if self.api_key.is_empty() { "" } else { "[REDACTED]" })
            .field("chat_model", &self.chat_model)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatSettings {
    pub seed_document_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    pub max_file_size_mb: usize,
}

impl UploadSettings {
    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb.saturating_mul(1024 * 1024)
    }
}

#[derive(Clone, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default)]
    pub url: Option<String>,
    pub max_connections: u32,
    /// Retries after the first failed connection attempt at start-up.
    pub connect_retries: u32,
    /// Delay before the first retry; doubled after each further failure.
    pub connect_backoff_ms: u64,
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("url", &self.url.as_ref().map(|_| "[REDACTED]"))
            .field("max_connections", &self.max_connections)
            .field("connect_retries", &self.connect_retries)
            .field("connect_backoff_ms", &self.connect_backoff_ms)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub json: bool,
}

impl Settings {
    /// Layers, lowest precedence first: built-in defaults, `config/base`,
    /// `config/<environment>`, `APP__`-prefixed variables, then the
    /// well-known `OPENAI_API_KEY` and `DATABASE_URL`.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("llm.base_url", "https://api.openai.com/v1")?
            .set_default("llm.api_key", "")?
            .set_default("llm.chat_model", "gpt-4o")?
            .set_default("llm.timeout_seconds", 120)?
            .set_default("chat.seed_document_path", "./cerita-singkat.pdf")?
            .set_default("upload.max_file_size_mb", 20)?
            .set_default("database.max_connections", 5)?
            .set_default("database.connect_retries", 5)?
            .set_default("database.connect_backoff_ms", 500)?
            .set_default("logging.json", false)?
            .add_source(File::with_name("config/base").required(false))
            .add_source(File::with_name(&format!("config/{}", environment.as_str())).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("llm.api_key", std::env::var("OPENAI_API_KEY").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .build()?
            .try_deserialize()
    }
}
