//! Shared state and router construction for the relay server.
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::handlers;
use crate::gemini::GenerativeModel;

/// Largest accepted JSON body; images travel inline as base64.
pub const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

pub struct AppState {
    pub model: Arc<dyn GenerativeModel>,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/edit", post(handlers::edit_image))
        .route("/api/inspiration", post(handlers::inspiration))
        .route("/api/magic", post(handlers::magic))
        .route("/api/lut", post(handlers::lut))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
