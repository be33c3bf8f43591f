use medsite_content::field::REQUIRED_MESSAGE;
use medsite_content::prelude::*;
use medsite_test_utils::{sample_text, validator};
use proptest::prelude::*;

fn field_type() -> impl Strategy<Value = FieldType> {
    proptest::sample::select(FieldType::KNOWN.to_vec())
}

proptest! {
    #[test]
    fn prop_validate_field_is_deterministic(field_type in field_type(), value in ".{0,120}") {
        let v = validator();
        prop_assert_eq!(
            v.validate_field(field_type, &value, None),
            v.validate_field(field_type, &value, None)
        );
    }

    #[test]
    fn prop_validity_tracks_errors_only(field_type in field_type(), value in ".{0,120}") {
        let result = validator().validate_field(field_type, &value, None);
        prop_assert_eq!(result.is_valid, result.errors.is_empty());
    }

    #[test]
    fn prop_blank_required_field_has_single_error(blank in "[ \t\n]{0,10}") {
        for field_type in [FieldType::Title, FieldType::Button] {
            let result = validator().validate_field(field_type, &blank, None);
            prop_assert_eq!(result.errors, vec![REQUIRED_MESSAGE.to_string()]);
            prop_assert!(result.warnings.is_empty());
        }
    }

    #[test]
    fn prop_scores_stay_in_range(text in "[a-zA-Z .!?]{0,400}") {
        let quality = validator().assess_content_quality(&text);
        for score in [
            quality.readability_score,
            quality.seo_score,
            quality.medical_score,
            quality.overall_score,
        ] {
            prop_assert!(score <= 100);
        }

        let mean = (f64::from(quality.readability_score)
            + f64::from(quality.seo_score)
            + f64::from(quality.medical_score))
            / 3.0;
        if quality.metrics.is_some() {
            prop_assert_eq!(f64::from(quality.overall_score), mean.round());
        }
    }

    #[test]
    fn prop_problematic_phrases_match_any_case(mask in proptest::collection::vec(any::<bool>(), 15)) {
        let phrase: String = "guaranteed cure"
            .chars()
            .zip(mask)
            .map(|(c, upper)| if upper { c.to_ascii_uppercase() } else { c })
            .collect();
        let text = format!("Our clinic offers a {phrase} for patients.");
        let result = validator().validate_medical_content(&text, "general");
        prop_assert!(!result.is_valid);
        prop_assert_eq!(result.errors.len(), 1);
    }
}

#[test]
fn blank_text_assessment_is_all_zero() {
    let quality = validator().assess_content_quality("");
    assert_eq!(quality, QualityAssessment::empty());
    assert!(quality.suggestions.is_empty());
    assert!(quality.metrics.is_none());
}

#[test]
fn long_text_gets_structure_suggestion() {
    let quality = validator().assess_content_quality(&sample_text(1200));
    assert_eq!(quality.seo_score, 90);
    assert!(quality
        .suggestions
        .iter()
        .any(|s| s.contains("sections with headings")));
}

#[test]
fn every_problematic_phrase_is_its_own_error() {
    let text = "A miracle treatment with instant results, no side effects, from the best doctor.";
    let result = validator().validate_medical_content(text, "general");
    assert_eq!(result.errors.len(), 4);
    assert!(result.errors[0].contains("miracle treatment"));
    assert!(result.errors[3].contains("best doctor"));
}
