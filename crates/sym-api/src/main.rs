//! Symptom API Server
//!
//! REST API server for symptom extraction and specialization matching.

use std::sync::Arc;
use sym_api::{create_router, state::AppState};
use sym_core::{AppConfig, LoggingConfig};
use tracing_subscriber::EnvFilter;

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &logging.level;
        EnvFilter::new(format!(
            "sym_api={level},sym_extractor={level},tower_http={level}"
        ))
    });

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if logging.json_format {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::load()?;
    config.validate()?;

    // Initialize tracing
    init_tracing(&config.logging);

    let addr = config.server.bind_addr();

    // Create application state
    let state = Arc::new(AppState::new(config)?);

    // Create router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Symptom API Server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
