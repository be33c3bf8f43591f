//! Engine configuration
//!
//! Rule tables, keyword tables and the tuning constants for the quality
//! and suggestion heuristics. Loaded once, then shared read-only by every
//! validator.

use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{ContentError, Result};
use crate::rules::{KeywordTable, PhraseTables, RuleSet, ServiceCatalog};

static SHARED: Lazy<Arc<ValidationConfig>> = Lazy::new(|| Arc::new(ValidationConfig::default()));

/// Complete engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationConfig {
    /// Field rulesets
    pub rules: RuleSet,
    /// Specialty keyword sets
    pub keywords: KeywordTable,
    /// Credibility, trust, call-to-action and problematic phrases
    pub phrases: PhraseTables,
    /// Common services per specialty
    pub services: ServiceCatalog,
    /// Quality scoring thresholds
    pub quality: QualityThresholds,
    /// Section suggestion thresholds
    pub suggestions: SuggestionThresholds,
}

impl ValidationConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide default configuration, built on first use
    #[inline]
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED)
    }

    /// With rule table
    #[inline]
    #[must_use]
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// With quality thresholds
    #[inline]
    #[must_use]
    pub fn with_quality(mut self, quality: QualityThresholds) -> Self {
        self.quality = quality;
        self
    }

    /// With suggestion thresholds
    #[inline]
    #[must_use]
    pub fn with_suggestions(mut self, suggestions: SuggestionThresholds) -> Self {
        self.suggestions = suggestions;
        self
    }

    /// Parse from TOML; missing keys keep their defaults
    ///
    /// # Errors
    /// Returns error if TOML is invalid
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Parse from YAML; missing keys keep their defaults
    ///
    /// # Errors
    /// Returns error if YAML is invalid
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load from a `.toml`, `.yaml` or `.yml` file
    ///
    /// # Errors
    /// Returns error on IO failure, unknown extension or invalid content
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ContentError::io_error(path, e))?;

        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml(&text)?,
            Some("yaml" | "yml") => Self::from_yaml(&text)?,
            _ => return Err(ContentError::UnsupportedFormat(path.to_path_buf())),
        };

        tracing::debug!("Loaded validation config from {}", path.display());
        Ok(config)
    }

    /// Render as TOML
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Tuning constants for the quality assessor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QualityThresholds {
    /// Average words per sentence above which sentences read as verbose
    pub max_words_per_sentence: f64,
    /// Average syllables per word above which vocabulary reads as complex
    pub max_syllables_per_word: f64,
    /// Word count below which content is too thin
    pub min_word_count: usize,
    /// Word count above which content needs structure
    pub max_word_count: usize,
    /// Deduction for verbose sentences
    pub long_sentence_penalty: u32,
    /// Deduction for complex vocabulary
    pub complex_word_penalty: u32,
    /// Deduction for thin content
    pub thin_content_penalty: u32,
    /// Deduction for long content
    pub long_content_penalty: u32,
    /// Deduction when no medical keyword appears
    pub missing_keywords_penalty: u32,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            max_words_per_sentence: 20.0,
            max_syllables_per_word: 1.7,
            min_word_count: 100,
            max_word_count: 1000,
            long_sentence_penalty: 20,
            complex_word_penalty: 15,
            thin_content_penalty: 30,
            long_content_penalty: 10,
            missing_keywords_penalty: 50,
        }
    }
}

/// Thresholds for section-specific suggestions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SuggestionThresholds {
    /// Hero titles shorter than this get an enhancement suggestion
    pub min_hero_title_length: usize,
    /// About text shorter than this gets an expansion suggestion
    pub min_about_length: usize,
    /// Fewer services than this gets an expansion suggestion
    pub min_services: usize,
}

impl Default for SuggestionThresholds {
    fn default() -> Self {
        Self {
            min_hero_title_length: 30,
            min_about_length: 200,
            min_services: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::FieldType;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = ValidationConfig::from_toml(
            "[quality]\nminWordCount = 50\n\n[rules.button]\nmaxLength = 20\n",
        )
        .unwrap();

        assert_eq!(config.quality.min_word_count, 50);
        assert_eq!(config.quality.max_word_count, 1000);
        assert_eq!(config.rules.get(FieldType::Button).unwrap().max_length, Some(20));
        assert_eq!(config.suggestions, SuggestionThresholds::default());
    }

    #[test]
    fn yaml_config_parses() {
        let config = ValidationConfig::from_yaml("suggestions:\n  minServices: 5\n").unwrap();
        assert_eq!(config.suggestions.min_services, 5);
    }

    #[test]
    fn toml_output_parses_back() {
        let text = ValidationConfig::default().to_toml().unwrap();
        let parsed = ValidationConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.quality, QualityThresholds::default());
        assert!(parsed.rules.get(FieldType::Phone).unwrap().pattern.is_some());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ValidationConfig::from_path("does-not-exist.toml").unwrap_err();
        assert!(matches!(err, ContentError::Io { .. }));
    }

    #[test]
    fn shared_config_is_a_single_instance() {
        assert!(Arc::ptr_eq(&ValidationConfig::shared(), &ValidationConfig::shared()));
    }
}
