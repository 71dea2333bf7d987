/**
 * Backend Error Types
 *
 * This module defines the error type returned by services, middleware and
 * handlers. Every variant carries a stable machine-readable code and maps
 * to exactly one HTTP status.
 *
 * # Error Categories
 *
 * | Variant | Status | Typical cause |
 * |---------|--------|---------------|
 * | `Validation` | 400 | bad input shape, schema violation, unknown role |
 * | `Unauthorized` | 401 | missing or invalid bearer token |
 * | `Forbidden` | 403 | caller lacks the required role |
 * | `NotFound` | 404 | entity absent or soft-deleted |
 * | `Conflict` | 409 | duplicate unique value |
 * | `Internal` | 500 | storage failure, unusable schema |
 *
 * Internal errors keep their source for logging; it is never serialized.
 */

use axum::http::StatusCode;
use thiserror::Error;

use super::codes;
use crate::shared::SharedError;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Backend error
#[derive(Debug, Error)]
pub enum BackendError {
    /// Client input was rejected. `violations` lists every problem found.
    #[error("{message}")]
    Validation {
        code: &'static str,
        message: String,
        violations: Vec<String>,
    },

    #[error("{message}")]
    Unauthorized { code: &'static str, message: String },

    #[error("{message}")]
    Forbidden { code: &'static str, message: String },

    #[error("{message}")]
    NotFound { code: &'static str, message: String },

    #[error("{message}")]
    Conflict { code: &'static str, message: String },

    /// Server-side failure. `source` is logged, never sent to the client.
    #[error("{message}")]
    Internal {
        code: &'static str,
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl BackendError {
    pub fn validation(code: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            code,
            message: message.into(),
            violations: Vec::new(),
        }
    }

    pub fn violations(code: &'static str, message: impl Into<String>, violations: Vec<String>) -> Self {
        Self::Validation {
            code,
            message: message.into(),
            violations,
        }
    }

    pub fn unauthorized(code: &'static str, message: impl Into<String>) -> Self {
        Self::Unauthorized {
            code,
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            code: codes::ACCESS_DENIED,
            message: message.into(),
        }
    }

    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            message: message.into(),
        }
    }

    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            message: message.into(),
        }
    }

    pub fn internal(code: &'static str, message: impl Into<String>) -> Self {
        Self::Internal {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Internal error that keeps the underlying cause for the logs
    pub fn internal_with(
        code: &'static str,
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::Internal {
            code,
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Error family name used in the envelope's `error.type`
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::Unauthorized { .. } => "authentication",
            Self::Forbidden { .. } => "authorization",
            Self::NotFound { .. } => "not_found",
            Self::Conflict { .. } => "conflict",
            Self::Internal { .. } => "internal",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { code, .. }
            | Self::Unauthorized { code, .. }
            | Self::Forbidden { code, .. }
            | Self::NotFound { code, .. }
            | Self::Conflict { code, .. }
            | Self::Internal { code, .. } => code,
        }
    }

    /// Get the client-facing error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn violation_list(&self) -> &[String] {
        match self {
            Self::Validation { violations, .. } => violations,
            _ => &[],
        }
    }
}

impl From<sqlx::Error> for BackendError {
    fn from(err: sqlx::Error) -> Self {
        Self::internal_with(codes::DATABASE_ERROR, "A database error occurred", err)
    }
}

impl From<SharedError> for BackendError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::ValidationError { ref field, ref message } => Self::violations(
                if field == "position" { codes::INVALID_POSITION } else { codes::INVALID_INPUT },
                err.to_string(),
                vec![format!("{}: {}", field, message)],
            ),
            SharedError::InvalidRole(_) => Self::validation(codes::INVALID_ROLE, err.to_string()),
            SharedError::SerializationError { .. } => {
                Self::validation(codes::INVALID_INPUT, err.to_string())
            }
        }
    }
}
