//! Per-field format and length validation

use serde_json::Value as JsonValue;

use crate::result::ValidationResult;
use crate::rules::{RuleOverride, RuleSet, ValidationRule};
use crate::tree::FieldType;

/// Error reported for an empty required field
pub const REQUIRED_MESSAGE: &str = "This field is required";

/// Error reported on pattern mismatch when the rule has no message
pub const INVALID_FORMAT_MESSAGE: &str = "Invalid format";

/// Validate a value against the rule for `field_type`
///
/// `Other` has no rule and always validates. `overrides` apply to this
/// call only.
#[must_use]
pub fn validate_field(
    rules: &RuleSet,
    field_type: FieldType,
    value: &str,
    overrides: Option<&RuleOverride>,
) -> ValidationResult {
    let Some(base) = rules.get(field_type) else {
        return ValidationResult::valid();
    };

    match overrides {
        Some(overrides) => check_rule(&base.with_overrides(overrides), value),
        None => check_rule(base, value),
    }
}

/// Validate using a rule key; unknown keys validate
#[must_use]
pub fn validate_field_named(
    rules: &RuleSet,
    field_type: &str,
    value: &str,
    overrides: Option<&RuleOverride>,
) -> ValidationResult {
    match field_type.parse::<FieldType>() {
        Ok(field_type) => validate_field(rules, field_type, value, overrides),
        Err(_) => {
            tracing::debug!("Skipping validation for unknown field type '{}'", field_type);
            ValidationResult::valid()
        }
    }
}

/// Validate a JSON scalar, converting it to text first
#[must_use]
pub fn validate_field_value(
    rules: &RuleSet,
    field_type: FieldType,
    value: &JsonValue,
    overrides: Option<&RuleOverride>,
) -> ValidationResult {
    validate_field(rules, field_type, &value_to_text(value), overrides)
}

/// Apply a single rule
///
/// An empty required value yields only the required error. Otherwise
/// length and pattern checks all run and accumulate.
#[must_use]
pub fn check_rule(rule: &ValidationRule, value: &str) -> ValidationResult {
    let mut result = ValidationResult::valid();
    let trimmed = value.trim();

    if trimmed.is_empty() {
        if rule.required {
            result.error(REQUIRED_MESSAGE);
        }
        return result;
    }

    let len = trimmed.chars().count();

    if let Some(min) = rule.min_length {
        if len < min {
            result.error(format!("Minimum length is {min} characters"));
        }
    }

    if let Some(max) = rule.max_length {
        if len > max {
            result.error(format!("Maximum length is {max} characters"));
        }
    }

    if let Some(pattern) = &rule.pattern {
        if !pattern.is_match(trimmed) {
            result.error(rule.message.as_deref().unwrap_or(INVALID_FORMAT_MESSAGE));
        }
    }

    if let Some(band) = rule.seo_recommended {
        if !band.contains(len) {
            result.warn(format!(
                "For best SEO results, keep this between {} and {} characters (currently {len})",
                band.min, band.max
            ));
        }
    }

    result
}

/// Text form of a JSON scalar; `null` is empty
#[must_use]
pub fn value_to_text(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
