use std::path::PathBuf;

use anyhow::{Context, Result};

/// Chat-completion endpoint used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
/// Model identifier sent with every completion request.
pub const DEFAULT_MODEL: &str = "mixtral-8x7b-32768";

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Settings handed to the `CompletionClient` at construction time.
/// The credential lives here instead of in process-wide state so tests can
/// point a client at a mock endpoint with a fake key.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub api_url: String,
    pub model: String,
    /// `None` when GROQCLOUD_API_KEY is unset or blank.
    pub api_key: Option<String>,
}

impl CompletionConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub completion: CompletionConfig,
    /// Directory holding staged uploads; created on demand.
    pub temp_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            completion: CompletionConfig::new(std::env::var("GROQCLOUD_API_KEY").ok()),
            temp_dir: std::env::var("TEMP_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("temp")),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
