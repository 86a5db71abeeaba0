//! Input text normalization

use sym_core::{normalize_form, Result, SymError};

/// Default maximum raw input length in characters
pub const DEFAULT_MAX_CHARS: usize = 10_000;

/// Validates and cleans raw symptom descriptions
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    max_chars: usize,
}

impl TextNormalizer {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Trim, collapse whitespace and lower-case `raw`.
    ///
    /// Fails with [`SymError::InvalidInput`] when the raw text is longer than
    /// the limit or nothing remains after trimming.
    pub fn normalize(&self, raw: &str) -> Result<String> {
        let length = raw.chars().count();
        if length > self.max_chars {
            return Err(SymError::InvalidInput(format!(
                "Text exceeds maximum length of {} characters (got {length})",
                self.max_chars
            )));
        }

        let normalized = normalize_form(raw);
        if normalized.is_empty() {
            return Err(SymError::InvalidInput("Text cannot be empty".to_string()));
        }

        Ok(normalized)
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHARS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        let normalizer = TextNormalizer::default();
        let text = normalizer.normalize("  I have a\t\tFEVER\nand   Headache ").unwrap();
        assert_eq!(text, "i have a fever and headache");
    }

    #[test]
    fn test_empty_rejected() {
        let normalizer = TextNormalizer::default();
        assert!(matches!(normalizer.normalize(""), Err(SymError::InvalidInput(_))));
        assert!(matches!(
            normalizer.normalize(" \n\t "),
            Err(SymError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_length_limit_counts_characters() {
        let normalizer = TextNormalizer::new(5);
        assert!(normalizer.normalize("fièvr").is_ok());
        assert!(matches!(
            normalizer.normalize("fièvre"),
            Err(SymError::InvalidInput(msg)) if msg.contains("maximum length")
        ));
    }

    #[test]
    fn test_limit_applies_to_raw_input() {
        // Padding counts even though it is trimmed away
        let normalizer = TextNormalizer::new(8);
        assert!(normalizer.normalize("  fever   ").is_err());
    }
}
