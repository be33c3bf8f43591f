//! Medsite Content
//!
//! Validation and quality scoring for the generated content of a
//! medical-practice website.
//!
//! # Overview
//!
//! Given a content tree (page → section → field) and a specialty tag,
//! the engine produces:
//! - **Structure**: missing sections and essential fields
//! - **Fields**: per-field length and format checks
//! - **Quality**: readability, SEO and medical-relevance scores
//! - **Suggestions**: specialty-aware improvements per section
//!
//! Every operation is a pure function of its input and a read-only
//! [`ValidationConfig`], so one configuration can serve any number of
//! concurrent callers.
//!
//! # Example
//!
//! ```rust
//! use medsite_content::{ContentValidator, FieldType};
//!
//! let validator = ContentValidator::default();
//!
//! let result = validator.validate_field(FieldType::Email, "not-an-email", None);
//! assert!(!result.is_valid);
//! assert_eq!(result.errors, ["Please enter a valid email address"]);
//!
//! let quality = validator.assess_content_quality("");
//! assert_eq!(quality.overall_score, 0);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod engine;
pub mod error;
pub mod field;
pub mod medical;
pub mod quality;
pub mod result;
pub mod rules;
pub mod structure;
pub mod suggestions;
pub mod tree;

// Re-exports
pub use config::{QualityThresholds, SuggestionThresholds, ValidationConfig};
pub use engine::ContentValidator;
pub use error::{ContentError, Result};
pub use quality::{estimate_syllables, TextStats};
pub use result::{
    ContentReport, QualityAssessment, QualityMetrics, Severity, Suggestion, ValidationResult,
};
pub use rules::{
    KeywordTable, LengthBand, PhraseTables, RuleOverride, RuleSet, ServiceCatalog, ValidationRule,
};
pub use structure::ESSENTIAL_SECTIONS;
pub use tree::{ContentTree, Field, FieldType, Item, Page, Pages, Section, SeoMetadata};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for content validation
    pub use crate::{
        ContentReport, ContentTree, ContentValidator, FieldType, QualityAssessment, RuleOverride,
        Suggestion, ValidationConfig, ValidationResult,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
