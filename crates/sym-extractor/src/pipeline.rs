//! Extraction pipeline orchestration
//!
//! normalize -> engine -> deduplicate -> map specializations

use crate::engine::create_engine;
use crate::mapper::SpecializationMapper;
use crate::normalizer::TextNormalizer;
use std::collections::HashSet;
use std::sync::Arc;
use sym_core::{ExtractionConfig, ExtractionEngine, ExtractionResult, Result, Symptom};

/// Shared, read-only pipeline; cheap to clone
#[derive(Clone)]
pub struct SymptomPipeline {
    normalizer: TextNormalizer,
    engine: Arc<dyn ExtractionEngine>,
    mapper: Arc<SpecializationMapper>,
}

impl SymptomPipeline {
    pub fn new(
        normalizer: TextNormalizer,
        engine: Arc<dyn ExtractionEngine>,
        mapper: SpecializationMapper,
    ) -> Self {
        Self {
            normalizer,
            engine,
            mapper: Arc::new(mapper),
        }
    }

    /// Default normalizer and mapping table around `engine`
    pub fn with_engine(engine: Arc<dyn ExtractionEngine>) -> Self {
        Self::new(TextNormalizer::default(), engine, SpecializationMapper::new())
    }

    /// Build every component from config
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        let engine = create_engine(config)?;
        let mapper = match &config.mapping_file {
            Some(path) => SpecializationMapper::from_file(path)?,
            None => SpecializationMapper::new(),
        };

        tracing::info!(
            engine = engine.name(),
            mappings = mapper.len(),
            max_input_chars = config.max_input_chars,
            "Extraction pipeline ready"
        );

        Ok(Self::new(
            TextNormalizer::new(config.max_input_chars),
            engine,
            mapper,
        ))
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    pub fn mapper(&self) -> &SpecializationMapper {
        &self.mapper
    }

    /// Run the full pipeline on raw request text
    pub async fn analyze(&self, raw_text: &str) -> Result<ExtractionResult> {
        let text = self.normalizer.normalize(raw_text)?;

        let extracted = self.engine.extract(&text).await?;
        let symptoms = dedupe_symptoms(extracted);
        let specializations = self.mapper.map(&symptoms);

        tracing::debug!(
            engine = self.engine.name(),
            symptoms = symptoms.len(),
            specializations = specializations.len(),
            "Extraction complete"
        );

        Ok(ExtractionResult {
            symptoms,
            specializations,
        })
    }
}

/// Keep the first occurrence of each normalized form, dropping blank names
pub fn dedupe_symptoms(symptoms: Vec<Symptom>) -> Vec<Symptom> {
    let mut seen = HashSet::new();
    symptoms
        .into_iter()
        .filter(|s| !s.normalized_form.is_empty() && seen.insert(s.normalized_form.clone()))
        .collect()
}
