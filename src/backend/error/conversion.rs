/**
 * Error Conversion
 *
 * Converts backend errors into HTTP responses using the standard envelope:
 *
 * ```json
 * {
 *   "success": false,
 *   "message": "metadata validation failed",
 *   "data": null,
 *   "error": {"type": "validation", "code": "METADATA_VALIDATION_FAILED",
 *             "message": "...", "violations": ["..."]},
 *   "timestamp": 1700000000,
 *   "request_id": "6f1c..."
 * }
 * ```
 *
 * Extractor rejections (malformed JSON, bad path ids, bad query strings)
 * are folded into validation errors so clients always receive an envelope.
 */

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::response::{IntoResponse, Response};

use super::codes;
use crate::backend::error::types::BackendError;
use crate::backend::response::{ApiResponse, ErrorBody};

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            BackendError::Internal { code, source, .. } => {
                tracing::error!(code = *code, error = ?source, "request failed with internal error");
            }
            BackendError::Forbidden { .. } | BackendError::Unauthorized { .. } => {
                tracing::warn!(code = self.code(), "{}", self);
            }
            _ => {
                tracing::debug!(code = self.code(), "{}", self);
            }
        }

        let body = ErrorBody {
            kind: self.error_type(),
            code: self.code(),
            message: self.message(),
            violations: self.violation_list().to_vec(),
        };
        ApiResponse::<()>::failure(self.message(), body).into_response_with(status)
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        BackendError::violations(
            codes::INVALID_INPUT,
            "Request body is not valid JSON for this endpoint",
            vec![rejection.body_text()],
        )
    }
}

impl From<PathRejection> for BackendError {
    fn from(rejection: PathRejection) -> Self {
        BackendError::violations(codes::INVALID_ID, "Invalid path parameter", vec![rejection.body_text()])
    }
}

impl From<QueryRejection> for BackendError {
    fn from(rejection: QueryRejection) -> Self {
        BackendError::violations(codes::INVALID_INPUT, "Invalid query string", vec![rejection.body_text()])
    }
}
