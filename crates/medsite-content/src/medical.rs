//! Medical terminology and advertising-claim checks

use crate::result::ValidationResult;
use crate::rules::{contains_phrase, KeywordTable, PhraseTables};

/// Check free text for specialty terminology, credibility, trust and
/// call-to-action phrasing, and prohibited claims
///
/// Missing terminology is a warning, missing categories are suggestions,
/// and every problematic phrase found is its own error, in phrase-table
/// order.
#[must_use]
pub fn validate_medical_content(
    keywords: &KeywordTable,
    phrases: &PhraseTables,
    content: &str,
    specialty: &str,
) -> ValidationResult {
    let mut result = ValidationResult::valid();

    if content.trim().is_empty() {
        return result;
    }

    let lowered = content.to_lowercase();

    let specialty_terms = keywords.lookup(specialty);
    if !specialty_terms.iter().any(|k| contains_phrase(&lowered, k)) {
        result.warn(format!(
            "Consider including more {} terminology to improve relevance",
            display_specialty(keywords, specialty)
        ));
    }

    let categories = [
        (&phrases.credibility, "credibility indicators"),
        (&phrases.trust, "trust signals"),
        (&phrases.call_to_action, "a clear call to action"),
    ];

    for (list, label) in categories {
        if !list.iter().any(|p| contains_phrase(&lowered, p)) {
            let example = list.first().map_or("", String::as_str);
            result.suggest(format!("Consider adding {label} such as \"{example}\""));
        }
    }

    for phrase in &phrases.problematic {
        if contains_phrase(&lowered, phrase) {
            result.error(format!(
                "Avoid using \"{phrase}\" - this may violate medical advertising guidelines"
            ));
        }
    }

    tracing::debug!(
        "Medical check ({}): {} errors, {} warnings, {} suggestions",
        specialty,
        result.errors.len(),
        result.warnings.len(),
        result.suggestions.len()
    );

    result
}

fn display_specialty<'a>(keywords: &KeywordTable, specialty: &'a str) -> &'a str {
    if keywords.is_known(specialty) {
        specialty.trim()
    } else {
        "medical"
    }
}
