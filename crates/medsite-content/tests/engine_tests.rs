use medsite_content::prelude::*;
use medsite_content::{Field, Section, ESSENTIAL_SECTIONS};
use medsite_test_utils::*;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn complete_tree_is_valid() {
    let report = validator().validate_all_content(&complete_tree(), "cardiology");

    assert!(report.is_valid, "unexpected errors: {:?}", report.errors);
    assert!(report.errors.is_empty());
    assert!(report.medical.is_valid);
    assert!(report.medical.is_clean(), "medical findings: {:?}", report.medical);
    assert!(
        !report.suggestions.iter().any(|s| s.section().is_some()),
        "unexpected section suggestions: {:?}",
        report.suggestions
    );
}

#[test]
fn complete_tree_passes_structure_check() {
    let result = validator().validate_content_structure(&complete_tree());
    assert!(result.is_clean(), "findings: {result:?}");
}

#[test]
fn empty_page_reports_four_missing_sections_in_order() {
    let result = validator().validate_content_structure(&ContentTree::default());
    let expected: Vec<String> = ESSENTIAL_SECTIONS
        .iter()
        .map(|s| format!("Missing required section: {s}"))
        .collect();

    assert_eq!(result.errors[..4].to_vec(), expected);
    assert_eq!(
        result.errors[4..].to_vec(),
        vec!["SEO title is missing".to_string(), "SEO description is missing".to_string()]
    );
}

#[test]
fn structurally_clean_tree_never_gains_structure_key() {
    let tree = complete_tree();
    assert!(validator().validate_content_structure(&tree).errors.is_empty());

    let mut broken = tree.clone();
    broken.pages.home.sections["contact"].fields.insert(
        "email".into(),
        Field::new(FieldType::Email, "nope"),
    );
    let report = validator().validate_all_content(&broken, "cardiology");

    assert!(!report.is_valid);
    assert!(report.structure_errors().is_empty());
    assert_eq!(report.errors.keys().collect::<Vec<_>>(), ["contact.email"]);
}

#[test]
fn missing_sections_surface_under_structure_key() {
    let tree = tree_with_sections(&[
        ("hero", section_with_field("title", FieldType::Title, "Family Care")),
        ("services", services_section(&["Vaccinations"])),
    ]);
    let report = validator().validate_all_content(&tree, "pediatrics");

    assert!(!report.is_valid);
    assert_eq!(
        report.structure_errors(),
        [
            "Missing required section: about",
            "Missing required section: contact",
            "SEO title is missing",
            "SEO description is missing",
        ]
    );
    assert!(report
        .warnings
        .contains(&"Hero section is missing a call-to-action".to_string()));
}

#[test]
fn section_suggestions_are_specialty_aware() {
    let tree = tree_with_sections(&[
        ("hero", section_with_field("title", FieldType::Title, "Welcome")),
        ("about", section_with_field("content", FieldType::Description, "We treat kids.")),
        ("services", services_section(&["Sick Visits"])),
        ("contact", section_with_field("phone", FieldType::Phone, "555-123-4567")),
    ]);

    let suggestions = validator().generate_suggestions(&tree, "pediatrics");
    let by_section: Vec<&str> = suggestions.iter().filter_map(Suggestion::section).collect();
    assert_eq!(by_section, ["hero", "hero", "about", "services", "contact"]);

    let Suggestion::Structured { suggestion, .. } = &suggestions[3] else {
        panic!("services suggestion should be structured");
    };
    assert_eq!(
        suggestion,
        "Common Pediatrics services include: Well-Child Visits, Childhood Vaccinations, Developmental Screenings"
    );
}

#[test]
fn non_object_root_is_reported_not_raised() {
    for value in [json!(null), json!("pages"), json!([{ "pages": {} }])] {
        let report = validator().validate_all_value(&value, "general");
        assert!(!report.is_valid);
        assert_eq!(report.structure_errors(), ["Invalid content structure"]);
        assert_eq!(report.quality, QualityAssessment::empty());
    }
}

#[test]
fn malformed_home_page_still_gets_structural_findings() {
    let report = validator().validate_all_value(&json!({ "pages": { "home": [] } }), "general");

    assert!(!report.is_valid);
    assert_eq!(report.structure_errors()[0], "Home page is malformed");
    assert_eq!(report.structure_errors().len(), 7);
}

#[test]
fn stray_leaves_do_not_hide_other_findings() {
    let mut value = complete_tree_json();
    value["pages"]["home"]["hero"]["layout"] = json!("centered");
    value["pages"]["home"]["contact"]["email"]["text"] = json!("not-an-email");
    value["pages"]["home"]["contact"]["phone"]["text"] = json!(5551234567_u64);

    let report = validator().validate_all_value(&value, "cardiology");

    assert!(!report.is_valid);
    assert_eq!(report.structure_errors(), ["Field 'layout' in section 'hero' is malformed"]);
    assert_eq!(report.errors["contact.email"], ["Please enter a valid email address"]);
    assert!(!report.errors.contains_key("contact.phone"));
    assert!(report.quality.metrics.is_some());
}

#[test]
fn null_section_is_reported_alongside_missing_sections() {
    let value = json!({ "pages": { "home": {
        "hero": null,
        "about": { "content": { "text": "Hi", "editable": true, "type": "description" } }
    } } });
    let report = validator().validate_all_value(&value, "general");

    assert_eq!(
        report.structure_errors()[..4].to_vec(),
        [
            "Section 'hero' is malformed",
            "Missing required section: hero",
            "Missing required section: services",
            "Missing required section: contact",
        ]
    );
    assert_eq!(report.errors["about.content"], ["Minimum length is 20 characters"]);
    assert!(report
        .warnings
        .contains(&"About section content is too short (under 100 characters)".to_string()));
}

#[test]
fn json_report_uses_camel_case_keys() {
    let report = validator().validate_all_value(&complete_tree_json(), "cardiology");
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["isValid"], json!(true));
    assert!(value["quality"]["readabilityScore"].is_u64());
    assert!(value["quality"]["metrics"]["wordCount"].as_u64().unwrap() > 0);
    assert_eq!(value["medical"]["isValid"], json!(true));
}

#[test]
fn tree_survives_json_round_trip() {
    let tree = complete_tree();
    let text = serde_json::to_string(&tree).unwrap();
    assert_eq!(ContentTree::from_json(&text).unwrap(), tree);
}

#[test]
fn cardiology_sample_has_no_keyword_feedback() {
    let result = validator().validate_medical_content(CARDIOLOGY_SAMPLE, "cardiology");
    assert!(result.is_valid);
    assert!(result.warnings.is_empty());
    assert!(result.suggestions.is_empty());
}

#[test]
fn custom_config_changes_thresholds() {
    let config = ValidationConfig::from_toml("[suggestions]\nminServices = 1\n").unwrap();
    let validator = ContentValidator::new(config);

    let tree = tree_with_sections(&[("services", services_section(&["Sick Visits"]))]);
    let suggestions = validator.generate_suggestions(&tree, "pediatrics");
    assert!(suggestions.is_empty());
}

#[test]
fn sections_keep_source_order() {
    let tree = complete_tree();
    let names: Vec<&str> = tree.home().sections.keys().map(String::as_str).collect();
    assert_eq!(names, ["hero", "about", "services", "contact"]);
    let _: &Section = tree.home().section("hero").unwrap();
}
