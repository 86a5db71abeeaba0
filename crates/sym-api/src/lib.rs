//! Symptom extraction REST API
//!
//! Exposes `POST /extract-symptoms` plus health, metrics and OpenAPI
//! documentation endpoints.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware as axum_middleware, Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::extract::extract_symptoms,
        handlers::health::health_check,
        handlers::health::metrics,
    ),
    components(schemas(
        handlers::extract::SymptomRequest,
        handlers::extract::SymptomResponse,
        handlers::health::HealthResponse,
        handlers::health::MetricsResponse,
        error::ApiError,
    )),
    tags(
        (name = "extraction", description = "Symptom extraction and specialization matching"),
        (name = "health", description = "Liveness and metrics")
    )
)]
pub struct ApiDoc;

/// Build the CORS layer from configured origins; none configured allows none
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let max_body_size = state.config.server.max_body_size;
    let cors = cors_layer(&state.config.server.cors_origins);

    Router::new()
        .merge(routes::api_routes())
        .merge(routes::health_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::metrics_middleware,
        ))
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Router with default config and the stub engine
#[cfg(any(test, feature = "test-utils"))]
pub fn create_router_for_testing() -> Router {
    let state = AppState::new(sym_core::AppConfig::default())
        .expect("default config builds a pipeline");
    create_router(Arc::new(state))
}

/// Router around a caller-supplied pipeline
#[cfg(any(test, feature = "test-utils"))]
pub fn create_router_with_pipeline(pipeline: sym_extractor::SymptomPipeline) -> Router {
    let state = AppState::with_pipeline(sym_core::AppConfig::default(), pipeline);
    create_router(Arc::new(state))
}
