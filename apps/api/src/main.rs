mod analysis;
mod config;
mod document;
mod errors;
mod llm_client;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Bot v{}", env!("CARGO_PKG_VERSION"));

    if config.completion.api_key.is_none() {
        warn!("GROQCLOUD_API_KEY is not set; every analysis will report a missing API key");
    }
    info!(
        "Completion endpoint: {} (model: {})",
        config.completion.api_url, config.completion.model
    );
    info!("Staging uploads under {}", config.temp_dir.display());

    let state = AppState::new(config.clone());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
