//! # Error Hierarchy
//!
//! Structured error types for the assessment stack, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.

use thiserror::Error;

/// Top-level error type for the assessment stack.
#[derive(Error, Debug)]
pub enum SasError {
    /// Domain value validation failure.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while validating domain values and templates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A rating string did not name a known rating.
    #[error("unknown rating: {0:?}")]
    UnknownRating(String),

    /// A status string did not name a known task status.
    #[error("unknown task status: {0:?}")]
    UnknownStatus(String),

    /// A required text field was empty or whitespace.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// A template referenced by id does not exist.
    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    /// A template definition is internally inconsistent.
    #[error("invalid template {template}: {reason}")]
    InvalidTemplate {
        /// The offending template id.
        template: String,
        /// What is wrong with it.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_wraps_into_sas_error() {
        let err: SasError = ValidationError::UnknownRating("great".into()).into();
        assert!(err.to_string().contains("great"));
        assert!(matches!(err, SasError::Validation(_)));
    }

    #[test]
    fn empty_field_message_names_field() {
        let err = ValidationError::EmptyField("name");
        assert_eq!(err.to_string(), "name must not be empty");
    }

    #[test]
    fn invalid_template_message_carries_context() {
        let err = ValidationError::InvalidTemplate {
            template: "dsmm".into(),
            reason: "duplicate item id dsmm-org-01".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("dsmm"));
        assert!(msg.contains("duplicate item id"));
    }
}
