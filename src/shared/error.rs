//! Shared Error Types
//!
//! This module defines error types that are shared between the frontend and backend.
//! These errors represent input problems that can be detected without touching
//! storage, so clients can run the same checks before sending a request.
//!
//! # Error Categories
//!
//! - `SerializationError` - JSON serialization/deserialization failures
//! - `ValidationError` - Data validation failures on a single field
//! - `InvalidRole` - A sharing role outside of viewer/editor/owner
//!
//! # Usage
//!
//! ```rust
//! use folio::shared::error::SharedError;
//!
//! let error = SharedError::validation("title", "Page title cannot be empty");
//! ```
use thiserror::Error;

/// Shared error types that can occur in both frontend and backend
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Role string that does not name a known role
    #[error("invalid role '{0}': expected one of viewer, editor, owner")]
    InvalidRole(String),
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

/// Check that a trimmed text field is non-empty and at most `max` characters.
pub fn validate_text(field: &str, value: &str, max: usize) -> Result<(), SharedError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SharedError::validation(field, format!("{} cannot be empty", field)));
    }
    if trimmed.chars().count() > max {
        return Err(SharedError::validation(
            field,
            format!("{} must be at most {} characters", field, max),
        ));
    }
    Ok(())
}
