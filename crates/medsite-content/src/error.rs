//! Error types for the content engine
//!
//! Only decoding and configuration can fail. Validation findings are
//! never errors: they are carried as data in the result records.

use std::path::PathBuf;

/// Errors raised while decoding content trees or loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// Root of the content tree is not an object
    #[error("content tree root must be an object, got {0}")]
    NotAnObject(&'static str),

    /// JSON did not match the content tree shape
    #[error("invalid json: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// YAML did not match the expected shape
    #[error("invalid yaml: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    /// TOML did not match the expected shape
    #[error("invalid toml: {0}")]
    InvalidToml(#[from] toml::de::Error),

    /// Configuration could not be rendered as TOML
    #[error("toml serialization failed: {0}")]
    Serialization(#[from] toml::ser::Error),

    /// A rule pattern failed to compile
    #[error("invalid pattern for '{field_type}': {source}")]
    InvalidPattern {
        /// Rule key the pattern belongs to
        field_type: String,
        #[source]
        source: regex::Error,
    },

    /// Field type tag is not one of the known rule keys
    #[error("unknown field type: '{0}'")]
    UnknownFieldType(String),

    /// Unsupported configuration file extension
    #[error("unsupported file extension for {0}")]
    UnsupportedFormat(PathBuf),

    /// IO error while reading a file
    #[error("io error reading {path}: {source}")]
    Io {
        /// File that failed to read
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ContentError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create pattern error for a rule key
    pub fn invalid_pattern(field_type: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            field_type: field_type.into(),
            source,
        }
    }

    /// Whether the error came from the shape of caller-supplied content
    #[inline]
    #[must_use]
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Self::NotAnObject(_) | Self::InvalidJson(_) | Self::InvalidYaml(_)
        )
    }
}

/// Result alias for content operations
pub type Result<T> = std::result::Result<T, ContentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_input_classification() {
        assert!(ContentError::NotAnObject("array").is_malformed_input());
        assert!(!ContentError::UnknownFieldType("x".into()).is_malformed_input());
    }

    #[test]
    fn display_includes_context() {
        let err = ContentError::UnknownFieldType("heading".into());
        assert_eq!(err.to_string(), "unknown field type: 'heading'");
    }
}
