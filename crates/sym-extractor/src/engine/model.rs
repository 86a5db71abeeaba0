//! Model-backed extraction engine
//!
//! Delegates extraction to an external clinical-NLP inference service over
//! HTTP. The service receives `{"text": ...}` and answers with
//! `{"symptoms": [...]}`, optionally alongside per-symptom `confidences`.
//! Every call is bounded by a timeout; any upstream failure surfaces as
//! [`SymError::ExtractionUnavailable`]. Retries are left to callers.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use sym_core::{ExtractionEngine, Result, SymError, Symptom};

#[derive(Debug, Serialize)]
struct ModelRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ModelResponse {
    symptoms: Vec<String>,
    #[serde(default)]
    confidences: Option<Vec<f32>>,
}

/// HTTP client for an upstream symptom extraction model
pub struct ModelBackedEngine {
    client: Client,
    url: String,
    timeout: Duration,
}

impl ModelBackedEngine {
    /// Create an engine posting to `url`, giving up after `timeout`
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SymError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn unavailable(&self, err: reqwest::Error) -> SymError {
        let message = if err.is_timeout() {
            format!(
                "Extraction service timed out after {} ms",
                self.timeout.as_millis()
            )
        } else if err.is_decode() {
            format!("Malformed response from extraction service: {err}")
        } else {
            format!("Extraction service request failed: {err}")
        };

        tracing::warn!(url = %self.url, "{message}");
        SymError::ExtractionUnavailable(message)
    }
}

/// Pair names with confidences and order by confidence, keeping upstream
/// order for ties and when no confidences are supplied
fn into_symptoms(response: ModelResponse) -> Vec<Symptom> {
    let confidences = response.confidences.unwrap_or_default();

    let mut symptoms: Vec<Symptom> = response
        .symptoms
        .into_iter()
        .enumerate()
        .filter(|(_, name)| !name.trim().is_empty())
        .map(|(i, name)| {
            let confidence = confidences.get(i).copied().unwrap_or(1.0);
            Symptom::with_confidence(name.trim(), confidence)
        })
        .collect();

    symptoms.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    symptoms
}

#[async_trait]
impl ExtractionEngine for ModelBackedEngine {
    fn name(&self) -> &'static str {
        "model"
    }

    async fn extract(&self, normalized_text: &str) -> Result<Vec<Symptom>> {
        let response = self
            .client
            .post(&self.url)
            .json(&ModelRequest {
                text: normalized_text,
            })
            .send()
            .await
            .map_err(|e| self.unavailable(e))?;

        let status = response.status();
        if !status.is_success() {
            let message = format!("Extraction service returned {status}");
            tracing::warn!(url = %self.url, "{message}");
            return Err(SymError::ExtractionUnavailable(message));
        }

        let body: ModelResponse = response.json().await.map_err(|e| self.unavailable(e))?;
        let symptoms = into_symptoms(body);

        tracing::debug!(count = symptoms.len(), "Model extraction complete");
        Ok(symptoms)
    }
}
