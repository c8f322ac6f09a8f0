pub mod health;
pub mod page;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(page::index_handler))
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/session",
            post(handlers::handle_session).layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}
