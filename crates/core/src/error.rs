//! Payload validation errors

/// Standard result type for payload checks
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// A payload field that failed a client-side check
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Wire name of the offending field
    pub field: String,
    /// Human readable reason
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a "field is required" error
    pub fn required(field: &str) -> Self {
        Self::new(field, "is required")
    }

    /// Create an error for a malformed value
    pub fn invalid_format(field: &str, expected: &str) -> Self {
        Self::new(field, format!("invalid format, expected {expected}"))
    }
}
