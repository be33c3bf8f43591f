//! Structural completeness checks
//!
//! The home page must carry `hero`, `about`, `services` and `contact`,
//! each with its essential fields, and the tree must carry SEO metadata.

use serde_json::Value as JsonValue;

use crate::result::ValidationResult;
use crate::tree::{ContentTree, Page, Section};

/// Sections every home page must have, in reporting order
pub const ESSENTIAL_SECTIONS: [&str; 4] = ["hero", "about", "services", "contact"];

/// Error reported when the input is not a content tree at all
pub const INVALID_STRUCTURE_MESSAGE: &str = "Invalid content structure";

/// About text shorter than this is flagged as terse
pub const MIN_ABOUT_LENGTH: usize = 100;

/// Check a decoded tree for missing sections and essential fields
#[must_use]
pub fn validate_content_structure(tree: &ContentTree) -> ValidationResult {
    let mut result = ValidationResult::valid();
    let home = tree.home();

    for name in missing_sections(home) {
        result.error(format!("Missing required section: {name}"));
    }

    if let Some(hero) = home.section("hero") {
        check_hero(hero, &mut result);
    }
    if let Some(about) = home.section("about") {
        check_about(about, &mut result);
    }
    if let Some(services) = home.section("services") {
        check_services(services, &mut result);
    }
    if let Some(contact) = home.section("contact") {
        check_contact(contact, &mut result);
    }

    check_metadata(tree, &mut result);

    tracing::debug!(
        "Structure check: {} errors, {} warnings",
        result.errors.len(),
        result.warnings.len()
    );

    result
}

/// Decode and check raw JSON
///
/// Entries that do not fit the tree shape are reported as errors ahead
/// of the structural findings. A root that is not an object yields the
/// single invalid-structure error.
#[must_use]
pub fn validate_structure_value(value: &JsonValue) -> ValidationResult {
    match ContentTree::decode_partial(value) {
        Ok((tree, issues)) => {
            let mut result = ValidationResult::valid();
            for issue in issues {
                result.error(issue);
            }
            result.merge(validate_content_structure(&tree));
            result
        }
        Err(e) => {
            tracing::warn!(malformed = e.is_malformed_input(), "Rejecting content tree: {}", e);
            ValidationResult::with_error(INVALID_STRUCTURE_MESSAGE)
        }
    }
}

fn check_hero(hero: &Section, result: &mut ValidationResult) {
    if hero.text_of("title").is_none() {
        result.error("Hero section is missing a title");
    }
    if hero.text_of("cta").is_none() {
        result.warn("Hero section is missing a call-to-action");
    }
}

fn check_about(about: &Section, result: &mut ValidationResult) {
    match about.text_of("content") {
        None => result.error("About section is missing content"),
        Some(text) if text.chars().count() < MIN_ABOUT_LENGTH => result.warn(format!(
            "About section content is too short (under {MIN_ABOUT_LENGTH} characters)"
        )),
        Some(_) => {}
    }
}

fn check_services(services: &Section, result: &mut ValidationResult) {
    if services.items.is_empty() {
        result.warn("Services section has no services listed");
        return;
    }

    for (i, item) in services.items.iter().enumerate() {
        let position = i + 1;
        if item.name().is_none() {
            result.error(format!("Service {position} is missing a name"));
        }
        if item.description().is_none() {
            result.warn(format!("Service {position} is missing a description"));
        }
    }
}

fn check_contact(contact: &Section, result: &mut ValidationResult) {
    if contact.text_of("phone").is_none() && contact.text_of("email").is_none() {
        result.error("Contact section needs at least a phone number or email address");
    }
    if contact.text_of("address").is_none() {
        result.suggest("Consider adding an office address to the contact section");
    }
}

fn check_metadata(tree: &ContentTree, result: &mut ValidationResult) {
    let metadata = tree.metadata.as_ref();

    if metadata.and_then(|m| m.title_text()).is_none() {
        result.error("SEO title is missing");
    }
    if metadata.and_then(|m| m.description_text()).is_none() {
        result.error("SEO description is missing");
    }
}

/// Names of essential sections absent from `page`
#[must_use]
pub fn missing_sections(page: &Page) -> Vec<&'static str> {
    ESSENTIAL_SECTIONS
        .into_iter()
        .filter(|name| !page.has_section(name))
        .collect()
}
