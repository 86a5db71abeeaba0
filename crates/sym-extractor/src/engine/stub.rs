//! Fixed-output engine
//!
//! Returns the same symptoms for every input. Useful for wiring up clients
//! and for tests; not for production triage.

use async_trait::async_trait;
use sym_core::{ExtractionEngine, Result, Symptom};

/// Engine that ignores its input
#[derive(Debug, Clone)]
pub struct StubEngine {
    symptoms: Vec<Symptom>,
}

impl StubEngine {
    /// Stub returning Fever and Headache
    pub fn new() -> Self {
        Self::with_symptoms(vec![
            Symptom::with_confidence("Fever", 0.9),
            Symptom::with_confidence("Headache", 0.8),
        ])
    }

    /// Stub returning a caller-chosen list
    pub fn with_symptoms(symptoms: Vec<Symptom>) -> Self {
        Self { symptoms }
    }
}

impl Default for StubEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExtractionEngine for StubEngine {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn extract(&self, _normalized_text: &str) -> Result<Vec<Symptom>> {
        Ok(self.symptoms.clone())
    }
}
