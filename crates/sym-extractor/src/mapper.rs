//! Symptom to specialization mapping
//!
//! Each known symptom maps to one or more specializations with a priority
//! weight. Weights for the same specialization are summed across symptoms;
//! the ranking sorts by summed weight descending, ties broken alphabetically.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use sym_core::{normalize_form, ConfigError, SpecializationRecommendation, Symptom};

pub const GENERAL_PHYSICIAN: &str = "General Physician";

/// A specialization with its priority weight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedSpecialization {
    pub name: String,
    pub weight: u32,
}

/// One row of the mapping table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingEntry {
    pub symptom: String,
    pub specializations: Vec<WeightedSpecialization>,
}

#[derive(Debug, Deserialize)]
struct MappingFile {
    #[serde(default)]
    mapping: Vec<MappingEntry>,
}

/// Static lookup from normalized symptom to weighted specializations
#[derive(Debug, Clone)]
pub struct SpecializationMapper {
    table: HashMap<String, Vec<WeightedSpecialization>>,
}

impl SpecializationMapper {
    /// Create a mapper with the built-in table
    pub fn new() -> Self {
        Self::from_entries(default_entries())
    }

    /// Build from explicit rows; later rows for the same symptom replace earlier ones
    pub fn from_entries(entries: Vec<MappingEntry>) -> Self {
        let table = entries
            .into_iter()
            .map(|entry| (normalize_form(&entry.symptom), entry.specializations))
            .collect();

        Self { table }
    }

    /// Parse a TOML mapping document
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let file: MappingFile = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;

        for entry in &file.mapping {
            if normalize_form(&entry.symptom).is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "mapping.symptom".to_string(),
                    value: entry.symptom.clone(),
                });
            }
            if let Some(bad) = entry.specializations.iter().find(|s| s.weight == 0) {
                return Err(ConfigError::InvalidValue {
                    key: format!("mapping.{}.weight", entry.symptom),
                    value: bad.weight.to_string(),
                });
            }
        }

        Ok(Self::from_entries(file.mapping))
    }

    /// Load a TOML mapping file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_toml_str(&content, path)
    }

    /// Number of symptoms with at least one mapping row
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Rank specializations for a set of symptoms.
    ///
    /// Repeated symptoms count once and unknown symptoms contribute nothing,
    /// so the result depends only on the set of normalized forms. Scores
    /// saturate at `u32::MAX`.
    pub fn map(&self, symptoms: &[Symptom]) -> Vec<SpecializationRecommendation> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut scores: HashMap<&str, u32> = HashMap::new();

        for symptom in symptoms {
            if !seen.insert(symptom.normalized_form.as_str()) {
                continue;
            }
            let Some(rows) = self.table.get(&symptom.normalized_form) else {
                continue;
            };
            for row in rows {
                let score = scores.entry(row.name.as_str()).or_insert(0);
                *score = score.saturating_add(row.weight);
            }
        }

        let mut ranked: Vec<(&str, u32)> = scores.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

        ranked
            .into_iter()
            .enumerate()
            .map(|(i, (name, score))| SpecializationRecommendation {
                name: name.to_string(),
                rank: i as u32 + 1,
                score,
            })
            .collect()
    }
}

impl Default for SpecializationMapper {
    fn default() -> Self {
        Self::new()
    }
}

fn row(symptom: &str, specializations: &[(&str, u32)]) -> MappingEntry {
    MappingEntry {
        symptom: symptom.to_string(),
        specializations: specializations
            .iter()
            .map(|(name, weight)| WeightedSpecialization {
                name: name.to_string(),
                weight: *weight,
            })
            .collect(),
    }
}

/// Built-in table
pub fn default_entries() -> Vec<MappingEntry> {
    vec![
        row("fever", &[(GENERAL_PHYSICIAN, 3)]),
        row("headache", &[(GENERAL_PHYSICIAN, 2)]),
        row("fatigue", &[(GENERAL_PHYSICIAN, 2)]),
        row("migraine", &[("Neurology", 3), (GENERAL_PHYSICIAN, 1)]),
        row("dizziness", &[("Neurology", 2), (GENERAL_PHYSICIAN, 1)]),
        row("chest pain", &[("Cardiology", 3), (GENERAL_PHYSICIAN, 1)]),
        row("palpitations", &[("Cardiology", 3)]),
        row("shortness of breath", &[("Pulmonology", 3), ("Cardiology", 2)]),
        row("cough", &[("Pulmonology", 2), (GENERAL_PHYSICIAN, 2)]),
        row("abdominal pain", &[("Gastroenterology", 3), (GENERAL_PHYSICIAN, 1)]),
        row("nausea", &[("Gastroenterology", 2), (GENERAL_PHYSICIAN, 1)]),
        row("joint pain", &[("Rheumatology", 3), ("Orthopedics", 2)]),
        row("back pain", &[("Orthopedics", 3), (GENERAL_PHYSICIAN, 1)]),
        row("rash", &[("Dermatology", 3)]),
        row("sore throat", &[("ENT", 3), (GENERAL_PHYSICIAN, 1)]),
    ]
}
