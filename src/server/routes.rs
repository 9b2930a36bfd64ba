//! Router configuration.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::AppState;

/// Create the router with all routes.
///
/// CORS is fully permissive (any origin, method and header).
// TODO: take an allowed-origin list from config before exposing this beyond localhost.
pub fn create_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route("/extract", post(handlers::extract))
        .route("/analyze", post(handlers::analyze))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
