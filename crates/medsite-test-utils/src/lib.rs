//! Testing utilities for the medsite workspace
//!
//! Shared fixtures: a complete cardiology home page, builders for
//! partial trees, and canonical sample texts.

#![allow(missing_docs)]

use medsite_content::{ContentTree, ContentValidator, Field, FieldType, Item, Section, SeoMetadata};
use serde_json::{json, Value};

pub const CARDIOLOGY_SAMPLE: &str = "Heart disease patients need a cardiologist. \
    We provide board-certified, HIPAA-compliant care. Schedule your appointment today.";

pub const ABOUT_TEXT: &str = "Springfield Heart Center has cared for the hearts of our community \
    for over twenty years. Our board-certified cardiologists combine compassionate, \
    patient-centered care with modern diagnostics so that every patient understands their \
    treatment plan.";

/// JSON for a home page that passes every structural and field check
pub fn complete_tree_json() -> Value {
    json!({
        "pages": {
            "home": {
                "hero": {
                    "title": { "text": "Trusted Heart Care in Springfield", "editable": true, "type": "title" },
                    "subtitle": { "text": "Board-certified cardiologists close to home", "editable": true, "type": "subtitle" },
                    "cta": { "text": "Book an Appointment", "editable": true, "type": "button" }
                },
                "about": {
                    "content": { "text": ABOUT_TEXT, "editable": true, "type": "description" }
                },
                "services": {
                    "items": [
                        { "name": "Echocardiography", "description": "Ultrasound imaging of the heart" },
                        { "name": "Stress Testing", "description": "Exercise tests for heart function" },
                        { "name": "Cholesterol Management", "description": "Plans to lower cardiac risk" }
                    ]
                },
                "contact": {
                    "phone": { "text": "(555) 123-4567", "editable": true, "type": "phone" },
                    "email": { "text": "care@springfieldheart.example", "editable": true, "type": "email" },
                    "address": { "text": "100 Main Street, Springfield", "editable": true, "type": "address" },
                    "hours": { "text": "Mon-Fri 8am-5pm", "editable": true }
                }
            }
        },
        "metadata": {
            "title": { "text": "Springfield Heart Center | Cardiology" },
            "description": { "text": "Board-certified cardiologists in Springfield." }
        }
    })
}

pub fn complete_tree() -> ContentTree {
    ContentTree::from_value(&complete_tree_json()).unwrap()
}

/// Tree with only the given sections, no metadata
pub fn tree_with_sections(sections: &[(&str, Section)]) -> ContentTree {
    let mut tree = ContentTree::default();
    for (name, section) in sections {
        tree.pages.home.sections.insert((*name).to_string(), section.clone());
    }
    tree
}

/// Section holding a single editable field
pub fn section_with_field(name: &str, field_type: FieldType, text: &str) -> Section {
    let mut section = Section::default();
    section.fields.insert(name.to_string(), Field::new(field_type, text));
    section
}

/// Services section with one item per name
pub fn services_section(names: &[&str]) -> Section {
    let mut section = Section::default();
    section.items = names
        .iter()
        .map(|n| Item::service(*n, format!("About {n}")))
        .collect();
    section
}

pub fn seo_metadata(title: &str, description: &str) -> SeoMetadata {
    SeoMetadata {
        title: Some(Field::new(FieldType::Title, title)),
        description: Some(Field::new(FieldType::Description, description)),
    }
}

/// Text of roughly `words` words built from a medical sentence
pub fn sample_text(words: usize) -> String {
    let base = ["Our", "doctor", "sees", "each", "patient", "with", "care."];
    base.iter().cycle().take(words).copied().collect::<Vec<_>>().join(" ")
}

pub fn validator() -> ContentValidator {
    ContentValidator::default()
}
