//! Application state management

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use sym_core::{AppConfig, Result};
use sym_extractor::SymptomPipeline;

/// Application state shared across handlers
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// Extraction pipeline, read-only after startup
    pub pipeline: SymptomPipeline,
    /// Server start time
    pub start_time: Instant,
    /// Request counter
    pub request_count: AtomicU64,
    /// Non-2xx response counter
    pub failed_count: AtomicU64,
}

impl AppState {
    /// Create state with a pipeline built from config
    pub fn new(config: AppConfig) -> Result<Self> {
        let pipeline = SymptomPipeline::from_config(&config.extraction)?;
        Ok(Self::with_pipeline(config, pipeline))
    }

    /// Create state around an existing pipeline
    pub fn with_pipeline(config: AppConfig, pipeline: SymptomPipeline) -> Self {
        Self {
            config,
            pipeline,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
            failed_count: AtomicU64::new(0),
        }
    }

    /// Record one finished request
    pub fn record_request(&self, success: bool) {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        if !success {
            self.failed_count.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get total request count
    pub fn get_request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    pub fn get_failed_count(&self) -> u64 {
        self.failed_count.load(Ordering::Relaxed)
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
