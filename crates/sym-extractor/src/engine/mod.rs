//! Extraction engine implementations
//!
//! Every engine implements [`sym_core::ExtractionEngine`]; the pipeline only
//! sees the trait object, so moving from the stub to a real model is a
//! configuration change.

pub mod keyword;
pub mod model;
pub mod stub;

pub use keyword::KeywordEngine;
pub use model::ModelBackedEngine;
pub use stub::StubEngine;

use std::sync::Arc;
use std::time::Duration;
use sym_core::{EngineKind, ExtractionConfig, ExtractionEngine, Result, SymError};

/// Create an extraction engine from config
pub fn create_engine(config: &ExtractionConfig) -> Result<Arc<dyn ExtractionEngine>> {
    match config.engine {
        EngineKind::Stub => Ok(Arc::new(StubEngine::new())),
        EngineKind::Keyword => Ok(Arc::new(KeywordEngine::new())),
        EngineKind::Model => {
            let url = config
                .model_url
                .as_deref()
                .ok_or_else(|| SymError::Config("Model URL required for model engine".to_string()))?;
            let engine =
                ModelBackedEngine::new(url, Duration::from_millis(config.model_timeout_ms))?;
            Ok(Arc::new(engine))
        }
    }
}
