//! Section-specific improvement suggestions

use crate::config::SuggestionThresholds;
use crate::result::Suggestion;
use crate::rules::{contains_phrase, KeywordTable, ServiceCatalog};
use crate::tree::ContentTree;

/// Hours-like field names looked for in the contact section
const HOURS_FIELDS: [&str; 3] = ["hours", "officeHours", "businessHours"];

/// Heuristic, specialty-aware suggestions for the home page
///
/// Never produces errors; sections that are absent are left to the
/// structural check.
#[must_use]
pub fn generate_suggestions(
    tree: &ContentTree,
    specialty: &str,
    keywords: &KeywordTable,
    services: &ServiceCatalog,
    thresholds: &SuggestionThresholds,
) -> Vec<Suggestion> {
    let mut out = Vec::new();
    let home = tree.home();
    let specialty_label = specialty_label(specialty);

    if let Some(title) = home.section("hero").and_then(|h| h.text_of("title")) {
        if title.chars().count() < thresholds.min_hero_title_length {
            out.push(Suggestion::structured(
                "hero",
                "enhancement",
                "Hero title could be more descriptive",
                format!("Include your specialty and location, e.g. \"Trusted {specialty_label} Care in Your City\""),
            ));
        }

        let lowered = title.to_lowercase();
        if keywords.is_known(specialty)
            && !keywords.lookup(specialty).iter().any(|k| contains_phrase(&lowered, k))
            && !contains_phrase(&lowered, specialty.trim())
        {
            out.push(Suggestion::structured(
                "hero",
                "enhancement",
                "Hero title does not mention your specialty",
                format!("Mention {specialty_label} so visitors know they are in the right place"),
            ));
        }
    }

    if let Some(about) = home.section("about") {
        let len = about.text_of("content").map_or(0, |t| t.chars().count());
        if len < thresholds.min_about_length {
            out.push(Suggestion::structured(
                "about",
                "expansion",
                "About section could be more detailed",
                "Describe your training, experience and approach to patient care",
            ));
        }
    }

    if let Some(section) = home.section("services") {
        if section.items.len() < thresholds.min_services {
            let listed: Vec<String> = section
                .items
                .iter()
                .filter_map(|i| i.name().map(str::to_lowercase))
                .collect();
            let ideas: Vec<&str> = services
                .lookup(specialty)
                .iter()
                .map(String::as_str)
                .filter(|s| !listed.contains(&s.to_lowercase()))
                .take(3)
                .collect();

            out.push(Suggestion::structured(
                "services",
                "expansion",
                format!("Consider listing at least {} services", thresholds.min_services),
                if ideas.is_empty() {
                    "Add the procedures and treatments patients most often ask about".to_string()
                } else {
                    format!("Common {specialty_label} services include: {}", ideas.join(", "))
                },
            ));
        }
    }

    if let Some(contact) = home.section("contact") {
        if !HOURS_FIELDS.iter().any(|f| contact.text_of(f).is_some()) {
            out.push(Suggestion::structured(
                "contact",
                "completeness",
                "Office hours are missing",
                "Add your office hours so patients know when to call or visit",
            ));
        }
    }

    tracing::debug!("Generated {} section suggestions", out.len());
    out
}

fn specialty_label(specialty: &str) -> String {
    specialty
        .trim()
        .split(['-', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn suggest(value: serde_json::Value, specialty: &str) -> Vec<Suggestion> {
        let tree = ContentTree::from_value(&value).unwrap();
        generate_suggestions(
            &tree,
            specialty,
            &KeywordTable::standard(),
            &ServiceCatalog::standard(),
            &SuggestionThresholds::default(),
        )
    }

    fn sections(suggestions: &[Suggestion]) -> Vec<&str> {
        suggestions.iter().filter_map(Suggestion::section).collect()
    }

    #[test]
    fn labels_specialties() {
        assert_eq!(specialty_label("family-medicine"), "Family Medicine");
        assert_eq!(specialty_label("cardiology"), "Cardiology");
    }

    #[test]
    fn short_hero_title_without_specialty() {
        let out = suggest(
            json!({ "pages": { "home": { "hero": { "title": { "text": "Welcome" } } } } }),
            "cardiology",
        );
        assert_eq!(sections(&out), ["hero", "hero"]);
        assert_eq!(out[0].message(), "Hero title could be more descriptive");
    }

    #[test]
    fn services_suggestion_skips_listed_services() {
        let out = suggest(
            json!({ "pages": { "home": { "services": { "items": [
                { "name": "Stress Testing", "description": "Treadmill tests" }
            ] } } } }),
            "cardiology",
        );
        let Suggestion::Structured { suggestion, .. } = &out[0] else {
            panic!("expected structured suggestion");
        };
        assert_eq!(
            suggestion,
            "Common Cardiology services include: Echocardiography, Heart Rhythm Monitoring, Cholesterol Management"
        );
    }

    #[test]
    fn missing_hours_is_suggested() {
        let out = suggest(
            json!({ "pages": { "home": { "contact": { "phone": { "text": "555-123-4567" } } } } }),
            "general",
        );
        assert_eq!(sections(&out), ["contact"]);

        let out = suggest(
            json!({ "pages": { "home": { "contact": { "hours": { "text": "Mon-Fri 9-5" } } } } }),
            "general",
        );
        assert!(out.is_empty());
    }

    #[test]
    fn complete_sections_need_nothing() {
        let about = "a".repeat(250);
        let out = suggest(
            json!({ "pages": { "home": {
                "hero": { "title": { "text": "Compassionate Heart Care for Every Patient" } },
                "about": { "content": { "text": about } }
            } } }),
            "cardiology",
        );
        assert!(out.is_empty());
    }
}
