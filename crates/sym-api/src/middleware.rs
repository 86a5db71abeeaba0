//! Request accounting middleware
//!
//! Counts every request and every non-2xx response, and logs the latency
//! of each call at debug level.

use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;

pub async fn metrics_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status();
    state.record_request(status.is_success());

    tracing::debug!(
        %method,
        path = %path,
        status = status.as_u16(),
        latency_us = start.elapsed().as_micros() as u64,
        "Request finished"
    );

    response
}
