//! Rule-based symptom extraction
//!
//! Matches a dictionary of symptom terms and their lay-language aliases
//! against normalized text using word-boundary regexes. Deterministic and
//! dependency-free, so it works as a fallback when no model is available.

use async_trait::async_trait;
use regex::Regex;
use std::collections::HashMap;
use sym_core::{ExtractionEngine, Result, SymError, Symptom};

/// Confidence for a match on the canonical term
const TERM_CONFIDENCE: f32 = 0.95;
/// Confidence for a match on an alias
const ALIAS_CONFIDENCE: f32 = 0.85;

// ============================================================================
// Dictionary
// ============================================================================

/// Dictionary entry for symptom matching
#[derive(Debug, Clone)]
pub struct DictionaryEntry {
    /// Display name emitted on a match
    pub name: String,
    pub term: String,
    pub aliases: Vec<String>,
}

/// Compiled phrase pointing back at its dictionary entry
struct PhrasePattern {
    regex: Regex,
    entry: usize,
    confidence: f32,
}

/// Best match seen so far for one entry
struct Hit {
    confidence: f32,
    start: usize,
}

/// Keyword engine over a symptom dictionary
pub struct KeywordEngine {
    entries: Vec<DictionaryEntry>,
    patterns: Vec<PhrasePattern>,
}

impl KeywordEngine {
    /// Create an engine with the default symptom dictionary
    pub fn new() -> Self {
        let mut engine = Self {
            entries: Vec::new(),
            patterns: Vec::new(),
        };

        engine.init_dictionary();
        engine
    }

    fn init_dictionary(&mut self) {
        // General
        self.add_term(
            "Fever",
            "fever",
            vec!["feverish", "high temperature", "temperature", "pyrexia", "chills"],
        );
        self.add_term(
            "Fatigue",
            "fatigue",
            vec!["tired", "tiredness", "exhausted", "exhaustion", "weakness"],
        );

        // Neurological
        self.add_term("Headache", "headache", vec!["head ache", "head hurts", "head pain"]);
        self.add_term("Migraine", "migraine", vec!["aura"]);
        self.add_term(
            "Dizziness",
            "dizziness",
            vec!["dizzy", "lightheaded", "light-headed", "vertigo"],
        );

        // Cardiac
        self.add_term(
            "Chest Pain",
            "chest pain",
            vec!["chest tightness", "chest discomfort", "heart pain"],
        );
        self.add_term(
            "Palpitations",
            "palpitations",
            vec!["racing heart", "heart racing", "pounding heart", "irregular heartbeat"],
        );

        // Respiratory
        self.add_term(
            "Shortness of Breath",
            "shortness of breath",
            vec![
                "breathless",
                "breathlessness",
                "difficulty breathing",
                "trouble breathing",
                "can't breathe",
            ],
        );
        self.add_term("Cough", "cough", vec!["coughing"]);
        self.add_term("Sore Throat", "sore throat", vec!["throat pain", "scratchy throat"]);

        // Digestive
        self.add_term(
            "Abdominal Pain",
            "abdominal pain",
            vec!["stomach ache", "stomachache", "stomach pain", "belly pain", "tummy ache"],
        );
        self.add_term("Nausea", "nausea", vec!["nauseous", "vomiting", "throwing up"]);

        // Musculoskeletal
        self.add_term(
            "Joint Pain",
            "joint pain",
            vec!["arthritis", "aching joints", "swollen joints"],
        );
        self.add_term("Back Pain", "back pain", vec!["backache", "lower back pain"]);

        // Skin
        self.add_term("Rash", "rash", vec!["hives", "itchy skin", "skin irritation"]);
    }

    /// Add a dictionary term with its aliases
    pub fn add_term(&mut self, name: &str, term: &str, aliases: Vec<&str>) {
        let entry = DictionaryEntry {
            name: name.to_string(),
            term: term.to_lowercase(),
            aliases: aliases.iter().map(|s| s.to_lowercase()).collect(),
        };
        let index = self.entries.len();

        self.add_phrase(&entry.term, index, TERM_CONFIDENCE);
        for alias in &entry.aliases {
            self.add_phrase(alias, index, ALIAS_CONFIDENCE);
        }

        self.entries.push(entry);
    }

    /// Attach a raw regex to an existing entry, matched at alias confidence
    pub fn add_pattern(&mut self, name: &str, pattern: &str) -> Result<()> {
        let entry = self
            .entries
            .iter()
            .position(|e| e.name == name)
            .ok_or_else(|| SymError::Config(format!("Unknown dictionary entry: {name}")))?;
        let regex = Regex::new(pattern)
            .map_err(|e| SymError::Config(format!("Invalid pattern {pattern:?}: {e}")))?;

        self.patterns.push(PhrasePattern {
            regex,
            entry,
            confidence: ALIAS_CONFIDENCE,
        });
        Ok(())
    }

    /// Compile a phrase into a word-boundary pattern, tolerating a plural "s"
    fn add_phrase(&mut self, phrase: &str, entry: usize, confidence: f32) {
        let pattern = format!(r"\b{}s?\b", regex::escape(phrase));
        match Regex::new(&pattern) {
            Ok(regex) => self.patterns.push(PhrasePattern {
                regex,
                entry,
                confidence,
            }),
            Err(e) => tracing::warn!(phrase = %phrase, error = %e, "Skipping uncompilable phrase"),
        }
    }

    /// Dictionary entries in insertion order
    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    /// Match every phrase, keeping one hit per entry
    fn collect_hits(&self, text: &str) -> HashMap<usize, Hit> {
        let mut hits: HashMap<usize, Hit> = HashMap::new();

        for pattern in &self.patterns {
            let Some(mat) = pattern.regex.find(text) else {
                continue;
            };

            hits.entry(pattern.entry)
                .and_modify(|hit| {
                    hit.confidence = hit.confidence.max(pattern.confidence);
                    hit.start = hit.start.min(mat.start());
                })
                .or_insert(Hit {
                    confidence: pattern.confidence,
                    start: mat.start(),
                });
        }

        hits
    }
}

impl Default for KeywordEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExtractionEngine for KeywordEngine {
    fn name(&self) -> &'static str {
        "keyword"
    }

    async fn extract(&self, normalized_text: &str) -> Result<Vec<Symptom>> {
        let mut hits: Vec<(usize, Hit)> = self.collect_hits(normalized_text).into_iter().collect();

        // Highest confidence first, then order of appearance
        hits.sort_by(|(_, a), (_, b)| {
            b.confidence
                .total_cmp(&a.confidence)
                .then(a.start.cmp(&b.start))
        });

        Ok(hits
            .into_iter()
            .map(|(index, hit)| Symptom::with_confidence(&self.entries[index].name, hit.confidence))
            .collect())
    }
}
