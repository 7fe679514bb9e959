pub mod analysis;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/analysis",
            post(analysis::handle_analyze).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/v1/analysis/status", get(analysis::handle_status))
        .with_state(state)
}
