//! Content validation engine
//!
//! [`ContentValidator`] ties the individual checks to one configuration
//! and composes them into a full-tree report.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use crate::config::ValidationConfig;
use crate::field;
use crate::medical;
use crate::quality;
use crate::result::{ContentReport, QualityAssessment, Severity, Suggestion, ValidationResult};
use crate::rules::RuleOverride;
use crate::structure;
use crate::suggestions;
use crate::tree::{ContentTree, FieldType};

/// Stateless validator over a shared, read-only configuration
///
/// Cloning is cheap; clones share the configuration.
#[derive(Debug, Clone)]
pub struct ContentValidator {
    config: Arc<ValidationConfig>,
}

impl ContentValidator {
    /// Create validator with the given configuration
    #[inline]
    #[must_use]
    pub fn new(config: ValidationConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Create validator sharing an existing configuration
    #[inline]
    #[must_use]
    pub fn with_shared(config: Arc<ValidationConfig>) -> Self {
        Self { config }
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate one value against the rule for `field_type`
    #[must_use]
    pub fn validate_field(
        &self,
        field_type: FieldType,
        value: &str,
        overrides: Option<&RuleOverride>,
    ) -> ValidationResult {
        field::validate_field(&self.config.rules, field_type, value, overrides)
    }

    /// Validate one value by rule key; unknown keys validate
    #[must_use]
    pub fn validate_field_named(
        &self,
        field_type: &str,
        value: &str,
        overrides: Option<&RuleOverride>,
    ) -> ValidationResult {
        field::validate_field_named(&self.config.rules, field_type, value, overrides)
    }

    /// Check text for terminology, trust phrasing and prohibited claims
    #[must_use]
    pub fn validate_medical_content(&self, content: &str, specialty: &str) -> ValidationResult {
        medical::validate_medical_content(
            &self.config.keywords,
            &self.config.phrases,
            content,
            specialty,
        )
    }

    /// Check a decoded tree for structural completeness
    #[must_use]
    pub fn validate_content_structure(&self, tree: &ContentTree) -> ValidationResult {
        structure::validate_content_structure(tree)
    }

    /// Check raw JSON for structural completeness
    #[must_use]
    pub fn validate_structure_value(&self, value: &JsonValue) -> ValidationResult {
        structure::validate_structure_value(value)
    }

    /// Score readability, SEO and medical relevance
    #[must_use]
    pub fn assess_content_quality(&self, text: &str) -> QualityAssessment {
        quality::assess_content_quality(&self.config.keywords, &self.config.quality, text)
    }

    /// Section-specific suggestions for a tree
    #[must_use]
    pub fn generate_suggestions(&self, tree: &ContentTree, specialty: &str) -> Vec<Suggestion> {
        suggestions::generate_suggestions(
            tree,
            specialty,
            &self.config.keywords,
            &self.config.services,
            &self.config.suggestions,
        )
    }

    /// Run every check over a tree
    ///
    /// Structural errors land under `structure`, field errors under
    /// `section.field`. Validity is structure AND fields; quality scores
    /// and the medical check are reported but never affect it.
    #[must_use]
    pub fn validate_all_content(&self, tree: &ContentTree, specialty: &str) -> ContentReport {
        self.build_report(tree, Vec::new(), specialty)
    }

    /// Decode raw JSON as far as possible and run every check
    ///
    /// Entries that do not fit the tree shape are skipped and reported
    /// as structural errors; everything else is still validated. Only a
    /// root that is not an object yields a report holding nothing but
    /// the invalid-structure error.
    #[must_use]
    pub fn validate_all_value(&self, value: &JsonValue, specialty: &str) -> ContentReport {
        match ContentTree::decode_partial(value) {
            Ok((tree, issues)) => self.build_report(&tree, issues, specialty),
            Err(e) => {
                tracing::warn!(malformed = e.is_malformed_input(), "Rejecting content tree: {}", e);
                ContentReport {
                    is_valid: false,
                    errors: IndexMap::from([(
                        ContentReport::STRUCTURE_KEY.to_string(),
                        vec![structure::INVALID_STRUCTURE_MESSAGE.to_string()],
                    )]),
                    warnings: Vec::new(),
                    suggestions: Vec::new(),
                    quality: QualityAssessment::empty(),
                    medical: ValidationResult::valid(),
                }
            }
        }
    }

    fn build_report(&self, tree: &ContentTree, decode_issues: Vec<String>, specialty: &str) -> ContentReport {
        let mut errors: IndexMap<String, Vec<String>> = IndexMap::new();
        let mut warnings = Vec::new();
        let mut suggestions = Vec::new();

        let mut structure = ValidationResult::valid();
        for issue in decode_issues {
            structure.error(issue);
        }
        structure.merge(self.validate_content_structure(tree));
        let mut is_valid = structure.is_valid;
        if !structure.errors.is_empty() {
            errors.insert(ContentReport::STRUCTURE_KEY.to_string(), structure.errors);
        }
        warnings.extend(structure.warnings);
        suggestions.extend(structure.suggestions);

        for (section_name, section) in &tree.home().sections {
            for (field_name, field) in &section.fields {
                if !field.editable {
                    continue;
                }
                let Some(text) = field.text() else {
                    continue;
                };

                let result = self.validate_field(field.field_type, text, None);
                if !result.is_valid {
                    is_valid = false;
                    errors.insert(format!("{section_name}.{field_name}"), result.errors);
                }
                warnings.extend(
                    result
                        .warnings
                        .into_iter()
                        .map(|w| format!("{section_name}.{field_name}: {w}")),
                );
            }
        }

        let text = tree.flatten_text();
        let quality = self.assess_content_quality(&text);
        suggestions.extend(quality.suggestions.iter().cloned().map(Suggestion::Text));

        let medical = self.validate_medical_content(&text, specialty);
        tracing::debug!(
            "Medical check: {} errors, {} warnings",
            medical.count(Severity::Error),
            medical.count(Severity::Warning)
        );

        suggestions.extend(self.generate_suggestions(tree, specialty));

        let report = ContentReport {
            is_valid,
            errors,
            warnings,
            suggestions,
            quality,
            medical,
        };

        tracing::info!(
            "Validated content ({}): valid={}, {} errors, {} warnings, overall score {}",
            specialty,
            report.is_valid,
            report.error_count(),
            report.warnings.len(),
            report.quality.overall_score
        );

        report
    }
}

impl Default for ContentValidator {
    fn default() -> Self {
        Self::with_shared(ValidationConfig::shared())
    }
}
