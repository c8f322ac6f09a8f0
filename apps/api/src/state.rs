use crate::config::Config;
use crate::llm_client::CompletionClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: CompletionClient,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            llm: CompletionClient::new(config.completion.clone()),
            config,
        }
    }
}
