//! Static rule tables
//!
//! Field rulesets, specialty keyword sets and fixed phrase lists. All of
//! these are built once and only ever read afterwards; per-call
//! variations go through [`RuleOverride`], which produces a new rule
//! instead of touching the table.

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ContentError, Result};
use crate::tree::FieldType;

/// Specialty used when a tag is unknown
pub const DEFAULT_SPECIALTY: &str = "general";

/// Inclusive length band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthBand {
    /// Lower bound
    pub min: usize,
    /// Upper bound
    pub max: usize,
}

impl LengthBand {
    /// Create band
    #[inline]
    #[must_use]
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Whether `len` falls inside the band
    #[inline]
    #[must_use]
    pub const fn contains(&self, len: usize) -> bool {
        len >= self.min && len <= self.max
    }
}

/// Validation ruleset for one field type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRule {
    /// Empty values are an error
    #[serde(default)]
    pub required: bool,

    /// Minimum trimmed length in characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    /// Maximum trimmed length in characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    /// Format the trimmed value must match
    #[serde(default, with = "pattern_serde", skip_serializing_if = "Option::is_none")]
    pub pattern: Option<Regex>,

    /// Length band recommended for search snippets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_recommended: Option<LengthBand>,

    /// Message reported on pattern mismatch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationRule {
    /// Rule with no constraints
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark as required
    #[inline]
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// With length bounds
    #[inline]
    #[must_use]
    pub fn with_length(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    /// With SEO band
    #[inline]
    #[must_use]
    pub fn with_seo(mut self, min: usize, max: usize) -> Self {
        self.seo_recommended = Some(LengthBand::new(min, max));
        self
    }

    /// With pattern and mismatch message
    ///
    /// # Errors
    /// Returns `InvalidPattern` if the pattern does not compile
    pub fn with_pattern(
        mut self,
        field_type: FieldType,
        pattern: &str,
        message: Option<&str>,
    ) -> Result<Self> {
        let regex =
            Regex::new(pattern).map_err(|e| ContentError::invalid_pattern(field_type.as_str(), e))?;
        self.pattern = Some(regex);
        self.message = message.map(str::to_string);
        Ok(self)
    }

    /// New rule with `overrides` applied on top of this one
    #[must_use]
    pub fn with_overrides(&self, overrides: &RuleOverride) -> Self {
        Self {
            required: overrides.required.unwrap_or(self.required),
            min_length: overrides.min_length.or(self.min_length),
            max_length: overrides.max_length.or(self.max_length),
            pattern: overrides.pattern.clone().or_else(|| self.pattern.clone()),
            seo_recommended: overrides.seo_recommended.or(self.seo_recommended),
            message: overrides.message.clone().or_else(|| self.message.clone()),
        }
    }
}

/// Partial rule applied for a single call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleOverride {
    /// Override `required`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Override minimum length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Override maximum length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Override pattern
    #[serde(default, with = "pattern_serde", skip_serializing_if = "Option::is_none")]
    pub pattern: Option<Regex>,
    /// Override SEO band
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_recommended: Option<LengthBand>,
    /// Override mismatch message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RuleOverride {
    /// Empty override
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override `required`
    #[inline]
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Override minimum length
    #[inline]
    #[must_use]
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Override maximum length
    #[inline]
    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Override mismatch message
    #[inline]
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Override pattern
    ///
    /// # Errors
    /// Returns `InvalidPattern` if the pattern does not compile
    pub fn pattern(mut self, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| ContentError::invalid_pattern("override", e))?;
        self.pattern = Some(regex);
        Ok(self)
    }
}

/// Rule table keyed by field type
///
/// Deserializing a `RuleSet` applies each entry as a [`RuleOverride`] on
/// top of [`RuleSet::standard`], so configuration files only need the
/// keys they change.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: IndexMap<FieldType, ValidationRule>,
}

impl RuleSet {
    /// Built-in rule table
    ///
    /// # Panics
    /// Never: the built-in patterns are fixed and compile.
    #[must_use]
    pub fn standard() -> Self {
        Self::try_standard().expect("built-in rule patterns compile")
    }

    fn try_standard() -> Result<Self> {
        use FieldType as F;

        let rules = IndexMap::from([
            (
                F::Title,
                ValidationRule::new()
                    .required()
                    .with_length(Some(3), Some(100))
                    .with_seo(30, 60)
                    .with_pattern(
                        F::Title,
                        r#"^[a-zA-Z0-9\s\-&.,!?'"():|/]+$"#,
                        Some("Title contains invalid characters"),
                    )?,
            ),
            (F::Subtitle, ValidationRule::new().with_length(Some(10), Some(200))),
            (
                F::Description,
                ValidationRule::new()
                    .with_length(Some(20), Some(2000))
                    .with_seo(50, 160),
            ),
            (
                F::Email,
                ValidationRule::new().with_length(None, Some(254)).with_pattern(
                    F::Email,
                    r"^[^\s@]+@[^\s@]+\.[^\s@]+$",
                    Some("Please enter a valid email address"),
                )?,
            ),
            (
                F::Phone,
                ValidationRule::new().with_pattern(
                    F::Phone,
                    r"^[\+]?[(]?[0-9]{3}[)]?[-\s\.]?[0-9]{3}[-\s\.]?[0-9]{4,6}$",
                    Some("Please enter a valid phone number"),
                )?,
            ),
            (F::Address, ValidationRule::new().with_length(Some(10), Some(200))),
            (
                F::Button,
                ValidationRule::new().required().with_length(Some(2), Some(30)),
            ),
            (F::ListItem, ValidationRule::new().with_length(Some(3), Some(200))),
            (
                F::Url,
                ValidationRule::new().with_pattern(
                    F::Url,
                    r"^https?://[^\s/$.?#].[^\s]*$",
                    Some("Please enter a valid URL"),
                )?,
            ),
        ]);

        Ok(Self { rules })
    }

    /// Rule for a field type; `None` for [`FieldType::Other`]
    #[inline]
    #[must_use]
    pub fn get(&self, field_type: FieldType) -> Option<&ValidationRule> {
        self.rules.get(&field_type)
    }

    /// Replace the rule for a field type
    #[must_use]
    pub fn with_rule(mut self, field_type: FieldType, rule: ValidationRule) -> Self {
        if field_type != FieldType::Other {
            self.rules.insert(field_type, rule);
        }
        self
    }

    /// Iterate rules in table order
    pub fn iter(&self) -> impl Iterator<Item = (FieldType, &ValidationRule)> {
        self.rules.iter().map(|(k, v)| (*k, v))
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl Serialize for RuleSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let keyed: IndexMap<&str, &ValidationRule> =
            self.rules.iter().map(|(k, v)| (k.as_str(), v)).collect();
        keyed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RuleSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = IndexMap::<String, RuleOverride>::deserialize(deserializer)?;
        let mut set = Self::try_standard().map_err(serde::de::Error::custom)?;

        for (key, overrides) in raw {
            let field_type: FieldType = key.parse().map_err(serde::de::Error::custom)?;
            let merged = set
                .get(field_type)
                .map(|base| base.with_overrides(&overrides))
                .unwrap_or_default();
            set.rules.insert(field_type, merged);
        }

        Ok(set)
    }
}

/// Specialty → domain keyword sets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordTable {
    specialties: IndexMap<String, Vec<String>>,
}

impl KeywordTable {
    /// Built-in keyword sets
    #[must_use]
    pub fn standard() -> Self {
        let specialties = [
            (
                "general",
                &[
                    "patient", "care", "health", "medical", "treatment", "doctor", "physician",
                    "clinic", "wellness", "diagnosis",
                ][..],
            ),
            (
                "cardiology",
                &[
                    "heart", "cardiac", "cardiologist", "cardiovascular", "blood pressure",
                    "cholesterol", "arrhythmia", "ecg", "echocardiogram", "hypertension",
                ][..],
            ),
            (
                "dermatology",
                &[
                    "skin", "dermatologist", "acne", "eczema", "psoriasis", "mole", "rash",
                    "melanoma", "cosmetic", "laser",
                ][..],
            ),
            (
                "pediatrics",
                &[
                    "child", "children", "pediatric", "pediatrician", "infant", "newborn",
                    "adolescent", "vaccination", "well-child", "developmental",
                ][..],
            ),
            (
                "orthopedics",
                &[
                    "bone", "joint", "orthopedic", "fracture", "spine", "knee", "hip",
                    "sports injury", "arthritis", "physical therapy",
                ][..],
            ),
            (
                "dentistry",
                &[
                    "dental", "dentist", "teeth", "tooth", "oral", "cleaning", "orthodontic",
                    "implant", "gum", "cavity",
                ][..],
            ),
            (
                "ophthalmology",
                &[
                    "eye", "vision", "ophthalmologist", "cataract", "glaucoma", "retina", "lasik",
                    "optometry", "contact lenses", "macular",
                ][..],
            ),
            (
                "family-medicine",
                &[
                    "family", "primary care", "preventive", "checkup", "physical exam", "chronic",
                    "immunization", "screening", "wellness visit", "all ages",
                ][..],
            ),
        ];

        Self {
            specialties: to_owned_table(&specialties),
        }
    }

    /// Keywords for a specialty, falling back to `general`
    #[must_use]
    pub fn lookup(&self, specialty: &str) -> &[String] {
        let key = specialty.trim().to_lowercase();
        self.specialties
            .get(&key)
            .or_else(|| self.specialties.get(DEFAULT_SPECIALTY))
            .map_or(&[][..], Vec::as_slice)
    }

    /// Whether the specialty has its own keyword set
    #[inline]
    #[must_use]
    pub fn is_known(&self, specialty: &str) -> bool {
        self.specialties.contains_key(&specialty.trim().to_lowercase())
    }

    /// Keywords of every specialty, duplicates removed
    pub fn all_keywords(&self) -> impl Iterator<Item = &str> {
        let mut seen = std::collections::HashSet::new();
        self.specialties
            .values()
            .flatten()
            .map(String::as_str)
            .filter(move |k| seen.insert(*k))
    }

    /// Specialty tags in table order
    pub fn specialties(&self) -> impl Iterator<Item = &str> {
        self.specialties.keys().map(String::as_str)
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Fixed phrase categories used by the medical content check
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PhraseTables {
    /// Credentials and experience indicators
    pub credibility: Vec<String>,
    /// Patient trust signals
    pub trust: Vec<String>,
    /// Call-to-action phrases
    pub call_to_action: Vec<String>,
    /// Claims that violate medical advertising norms
    pub problematic: Vec<String>,
}

impl PhraseTables {
    /// Built-in phrase lists
    #[must_use]
    pub fn standard() -> Self {
        Self {
            credibility: to_owned_list(&[
                "board-certified",
                "certified",
                "experienced",
                "years of experience",
                "licensed",
                "accredited",
                "fellowship-trained",
                "award-winning",
            ]),
            trust: to_owned_list(&[
                "hipaa",
                "compassionate",
                "trusted",
                "patient-centered",
                "confidential",
                "personalized",
                "caring",
            ]),
            call_to_action: to_owned_list(&[
                "schedule",
                "book",
                "call",
                "contact us",
                "appointment",
                "visit us",
                "request",
            ]),
            problematic: to_owned_list(&[
                "guaranteed cure",
                "miracle treatment",
                "instant results",
                "no side effects",
                "best doctor",
                "cheapest",
                "100% effective",
                "risk-free",
            ]),
        }
    }
}

impl Default for PhraseTables {
    fn default() -> Self {
        Self::standard()
    }
}

/// Specialty → commonly offered services, used for suggestions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceCatalog {
    specialties: IndexMap<String, Vec<String>>,
}

impl ServiceCatalog {
    /// Built-in catalog
    #[must_use]
    pub fn standard() -> Self {
        let specialties = [
            (
                "general",
                &[
                    "Annual Physical Exams",
                    "Preventive Screenings",
                    "Chronic Disease Management",
                    "Vaccinations",
                ][..],
            ),
            (
                "cardiology",
                &[
                    "Echocardiography",
                    "Stress Testing",
                    "Heart Rhythm Monitoring",
                    "Cholesterol Management",
                ][..],
            ),
            (
                "dermatology",
                &[
                    "Skin Cancer Screening",
                    "Acne Treatment",
                    "Eczema and Psoriasis Care",
                    "Cosmetic Dermatology",
                ][..],
            ),
            (
                "pediatrics",
                &[
                    "Well-Child Visits",
                    "Childhood Vaccinations",
                    "Developmental Screenings",
                    "Sick Visits",
                ][..],
            ),
            (
                "orthopedics",
                &[
                    "Joint Replacement",
                    "Sports Medicine",
                    "Fracture Care",
                    "Spine Treatment",
                ][..],
            ),
            (
                "dentistry",
                &["Teeth Cleaning", "Fillings", "Dental Implants", "Teeth Whitening"][..],
            ),
            (
                "ophthalmology",
                &[
                    "Comprehensive Eye Exams",
                    "Cataract Surgery",
                    "Glaucoma Treatment",
                    "LASIK Consultation",
                ][..],
            ),
            (
                "family-medicine",
                &[
                    "Family Checkups",
                    "Immunizations",
                    "Women's Health",
                    "Chronic Care Management",
                ][..],
            ),
        ];

        Self {
            specialties: to_owned_table(&specialties),
        }
    }

    /// Services for a specialty, falling back to `general`
    #[must_use]
    pub fn lookup(&self, specialty: &str) -> &[String] {
        let key = specialty.trim().to_lowercase();
        self.specialties
            .get(&key)
            .or_else(|| self.specialties.get(DEFAULT_SPECIALTY))
            .map_or(&[][..], Vec::as_slice)
    }
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Case-insensitive substring search over an already lowercased haystack
#[inline]
pub(crate) fn contains_phrase(lowered: &str, phrase: &str) -> bool {
    lowered.contains(&phrase.to_lowercase())
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn to_owned_table(rows: &[(&str, &[&str])]) -> IndexMap<String, Vec<String>> {
    rows.iter()
        .map(|(k, v)| ((*k).to_string(), to_owned_list(v)))
        .collect()
}

mod pattern_serde {
    use regex::Regex;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(
        pattern: &Option<Regex>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match pattern {
            Some(regex) => serializer.serialize_str(regex.as_str()),
            None => serializer.serialize_none(),
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Regex>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|s| Regex::new(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_covers_every_known_type() {
        let rules = RuleSet::standard();
        for field_type in FieldType::KNOWN {
            assert!(rules.get(field_type).is_some(), "missing rule for {field_type}");
        }
        assert!(rules.get(FieldType::Other).is_none());
    }

    #[test]
    fn overrides_do_not_touch_base_rule() {
        let rules = RuleSet::standard();
        let base = rules.get(FieldType::Title).unwrap();
        let merged = base.with_overrides(&RuleOverride::new().max_length(10).required(false));

        assert_eq!(merged.max_length, Some(10));
        assert!(!merged.required);
        assert_eq!(base.max_length, Some(100));
        assert!(base.required);
        assert_eq!(merged.pattern.as_ref().map(Regex::as_str), base.pattern.as_ref().map(Regex::as_str));
    }

    #[test]
    fn keyword_lookup_falls_back_to_general() {
        let table = KeywordTable::standard();
        assert_eq!(table.lookup("astrology"), table.lookup("general"));
        assert!(table.lookup("Cardiology").iter().any(|k| k == "heart"));
        assert!(table.is_known("dentistry"));
    }

    #[test]
    fn all_keywords_deduplicates() {
        let table = KeywordTable::standard();
        let all: Vec<&str> = table.all_keywords().collect();
        let unique: std::collections::HashSet<&str> = all.iter().copied().collect();
        assert_eq!(all.len(), unique.len());
        assert!(all.contains(&"heart") && all.contains(&"teeth"));
    }

    #[test]
    fn rule_set_deserializes_as_overrides() {
        let set: RuleSet = toml::from_str("[title]\nmaxLength = 80\n").unwrap();
        let title = set.get(FieldType::Title).unwrap();
        assert_eq!(title.max_length, Some(80));
        assert_eq!(title.min_length, Some(3));
        assert!(set.get(FieldType::Email).unwrap().pattern.is_some());
    }

    #[test]
    fn rule_set_rejects_unknown_keys() {
        assert!(toml::from_str::<RuleSet>("[heading]\nrequired = true\n").is_err());
    }

    #[test]
    fn invalid_override_pattern_is_reported() {
        let err = RuleOverride::new().pattern("[unclosed").unwrap_err();
        assert!(matches!(err, ContentError::InvalidPattern { .. }));
    }

    #[test]
    fn length_band_is_inclusive() {
        let band = LengthBand::new(30, 60);
        assert!(band.contains(30) && band.contains(60));
        assert!(!band.contains(29) && !band.contains(61));
    }
}
