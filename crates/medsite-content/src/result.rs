//! Result records
//!
//! Every validation call returns fresh records; findings are data, never
//! errors. Records serialize in camelCase for the UI layer.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Severity of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks validity
    Error,
    /// Quality concern, does not block validity
    Warning,
    /// Advisory improvement
    Suggestion,
}

/// Advisory improvement, either free text or tied to a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Suggestion {
    /// Free text
    Text(String),
    /// Section-specific suggestion
    Structured {
        /// Section the suggestion applies to
        section: String,
        /// Kind of improvement (`enhancement`, `expansion`, `completeness`)
        #[serde(rename = "type")]
        kind: String,
        /// What was observed
        message: String,
        /// What to do about it
        suggestion: String,
    },
}

impl Suggestion {
    /// Structured suggestion
    pub fn structured(
        section: impl Into<String>,
        kind: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::Structured {
            section: section.into(),
            kind: kind.into(),
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Section for structured suggestions
    #[must_use]
    pub fn section(&self) -> Option<&str> {
        match self {
            Self::Text(_) => None,
            Self::Structured { section, .. } => Some(section),
        }
    }

    /// Human-readable text
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Structured { message, .. } => message,
        }
    }
}

impl From<String> for Suggestion {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Suggestion {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Outcome of a single validation check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True iff `errors` is empty
    pub is_valid: bool,
    /// Blocking defects
    pub errors: Vec<String>,
    /// Non-blocking concerns
    pub warnings: Vec<String>,
    /// Advisory improvements
    pub suggestions: Vec<Suggestion>,
}

impl ValidationResult {
    /// Valid result with no findings
    #[inline]
    #[must_use]
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Result with a single error
    #[must_use]
    pub fn with_error(message: impl Into<String>) -> Self {
        let mut result = Self::valid();
        result.error(message);
        result
    }

    /// Add an error
    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.is_valid = false;
    }

    /// Add a warning
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add a suggestion
    pub fn suggest(&mut self, suggestion: impl Into<Suggestion>) {
        self.suggestions.push(suggestion.into());
    }

    /// Append another result's findings
    pub fn merge(&mut self, other: ValidationResult) {
        self.is_valid &= other.is_valid;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.suggestions.extend(other.suggestions);
    }

    /// Whether the result carries no findings at all
    #[inline]
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty() && self.suggestions.is_empty()
    }

    /// Number of findings at a severity
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::Error => self.errors.len(),
            Severity::Warning => self.warnings.len(),
            Severity::Suggestion => self.suggestions.len(),
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::valid()
    }
}

/// Statistics computed by the quality assessor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityMetrics {
    /// Whitespace-separated words
    pub word_count: usize,
    /// Non-empty sentences
    pub sentence_count: usize,
    /// Estimated syllables over all words
    pub syllable_count: usize,
    /// Words per sentence
    pub avg_words_per_sentence: f64,
    /// Syllables per word
    pub avg_syllables_per_word: f64,
    /// Distinct medical keywords found
    pub medical_keyword_count: usize,
}

/// Heuristic quality scores for a block of text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityAssessment {
    /// Sentence length and vocabulary score, 0–100
    pub readability_score: u8,
    /// Content length score, 0–100
    pub seo_score: u8,
    /// Medical terminology score, 0–100
    pub medical_score: u8,
    /// Rounded mean of the three scores
    pub overall_score: u8,
    /// Computed statistics; absent for blank input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<QualityMetrics>,
    /// Improvements, one per deduction
    pub suggestions: Vec<String>,
}

impl QualityAssessment {
    /// All-zero assessment for blank input
    #[must_use]
    pub fn empty() -> Self {
        Self {
            readability_score: 0,
            seo_score: 0,
            medical_score: 0,
            overall_score: 0,
            metrics: None,
            suggestions: Vec::new(),
        }
    }
}

/// Aggregate outcome of validating a whole content tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentReport {
    /// Structure and every field passed
    pub is_valid: bool,
    /// Errors keyed by `structure` or `section.field`
    pub errors: IndexMap<String, Vec<String>>,
    /// Non-blocking concerns
    pub warnings: Vec<String>,
    /// Advisory improvements
    pub suggestions: Vec<Suggestion>,
    /// Quality of the flattened text
    pub quality: QualityAssessment,
    /// Medical content check over the flattened text
    pub medical: ValidationResult,
}

impl ContentReport {
    /// Key under which structural errors are reported
    pub const STRUCTURE_KEY: &'static str = "structure";

    /// Total number of errors across all keys
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    /// Structural errors, if any
    #[must_use]
    pub fn structure_errors(&self) -> &[String] {
        self.errors
            .get(Self::STRUCTURE_KEY)
            .map_or(&[][..], Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_flips_validity() {
        let mut result = ValidationResult::valid();
        result.warn("terse");
        assert!(result.is_valid);
        result.error("missing");
        assert!(!result.is_valid);
        assert_eq!(result.count(Severity::Error), 1);
    }

    #[test]
    fn merge_keeps_order_and_invalidity() {
        let mut result = ValidationResult::with_error("first");
        let mut other = ValidationResult::valid();
        other.warn("terse");
        other.suggest("add hours");
        result.merge(other);

        assert!(!result.is_valid);
        assert_eq!(result.count(Severity::Warning), 1);
        assert_eq!(result.count(Severity::Suggestion), 1);

        let mut clean = ValidationResult::valid();
        clean.merge(ValidationResult::with_error("second"));
        assert_eq!(clean.errors, ["second"]);
        assert!(!clean.is_valid);
    }

    #[test]
    fn serializes_in_camel_case() {
        let value = serde_json::to_value(ValidationResult::with_error("bad")).unwrap();
        assert_eq!(
            value,
            json!({ "isValid": false, "errors": ["bad"], "warnings": [], "suggestions": [] })
        );
    }

    #[test]
    fn suggestions_serialize_untagged() {
        let plain = serde_json::to_value(Suggestion::from("add hours")).unwrap();
        assert_eq!(plain, json!("add hours"));

        let structured =
            serde_json::to_value(Suggestion::structured("hero", "enhancement", "short", "expand"))
                .unwrap();
        assert_eq!(structured["type"], "enhancement");
        assert_eq!(structured["section"], "hero");
    }

    #[test]
    fn empty_assessment_omits_metrics() {
        let value = serde_json::to_value(QualityAssessment::empty()).unwrap();
        assert!(value.get("metrics").is_none());
        assert_eq!(value["overallScore"], 0);
    }
}
