//! API route definitions

use crate::handlers::{extract, health};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Extraction routes
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new().route("/extract-symptoms", post(extract::extract_symptoms))
}

/// Liveness and metrics routes
pub fn health_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(health::metrics))
}
