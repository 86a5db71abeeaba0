//! Symptom service core - domain models, traits, and shared types
//!
//! This crate defines the abstractions shared by the extraction pipeline,
//! the HTTP API and the CLI:
//! - Symptom and specialization models
//! - The `ExtractionEngine` trait implemented by every engine variant
//! - Common error types
//! - Configuration management

pub mod config;

pub use config::{
    AppConfig, ConfigError, EngineKind, ExtractionConfig, LoggingConfig, ServerConfig,
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for symptom extraction
#[derive(Error, Debug)]
pub enum SymError {
    /// Client-caused; the caller can retry with corrected input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Transient infrastructure failure; the caller can retry later
    #[error("Extraction unavailable: {0}")]
    ExtractionUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ConfigError> for SymError {
    fn from(err: ConfigError) -> Self {
        SymError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SymError>;

// ============================================================================
// Text helpers
// ============================================================================

/// Trim, collapse whitespace runs to a single space and lower-case.
pub fn normalize_form(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

// ============================================================================
// Domain Models
// ============================================================================

/// A symptom produced by an extraction engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symptom {
    /// Display name, e.g. "Shortness of Breath"
    pub name: String,

    /// Key used for deduplication and specialization lookup
    pub normalized_form: String,

    /// Engine confidence in [0.0, 1.0]
    pub confidence: f32,
}

impl Symptom {
    /// Create a symptom with full confidence
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_confidence(name, 1.0)
    }

    /// Create a symptom with an explicit confidence (clamped to [0, 1])
    pub fn with_confidence(name: impl Into<String>, confidence: f32) -> Self {
        let name = name.into();
        let normalized_form = normalize_form(&name);
        Self {
            name,
            normalized_form,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// A recommended medical specialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecializationRecommendation {
    pub name: String,

    /// 1-based position in the ranking
    pub rank: u32,

    /// Summed mapping weight that produced the rank
    pub score: u32,
}

/// Combined output of one extraction run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Deduplicated by normalized form, in confidence order
    pub symptoms: Vec<Symptom>,

    /// Ordered by rank ascending
    pub specializations: Vec<SpecializationRecommendation>,
}

impl ExtractionResult {
    /// Symptom display names in response order
    pub fn symptom_names(&self) -> Vec<String> {
        self.symptoms.iter().map(|s| s.name.clone()).collect()
    }

    /// Specialization names in rank order
    pub fn specialization_names(&self) -> Vec<String> {
        self.specializations.iter().map(|s| s.name.clone()).collect()
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Converts normalized text into symptoms.
///
/// Implementations must be deterministic for a given input so that results
/// can be asserted in tests. Engines that reach out over the network must
/// bound every call and report failures as [`SymError::ExtractionUnavailable`].
#[async_trait]
pub trait ExtractionEngine: Send + Sync {
    /// Short identifier reported by the health endpoint
    fn name(&self) -> &'static str;

    /// Extract symptoms, highest confidence first
    async fn extract(&self, normalized_text: &str) -> Result<Vec<Symptom>>;
}

// ============================================================================
// Tests
// ============================================================================
