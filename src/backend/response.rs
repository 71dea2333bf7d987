//! Response Envelope
//!
//! Every JSON response, success or failure, uses the same envelope:
//! `{success, message, data, error, timestamp, request_id}`. The request id
//! comes from the task-local set by the request-id middleware, so handlers
//! never pass it around.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::backend::middleware::request_id::current_request_id;

/// Error section of the envelope
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    pub error: Option<ErrorBody>,
    /// Unix seconds
    pub timestamp: i64,
    pub request_id: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
            timestamp: chrono::Utc::now().timestamp(),
            request_id: current_request_id(),
        }
    }

    pub fn failure(message: impl Into<String>, error: ErrorBody) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error: Some(error),
            timestamp: chrono::Utc::now().timestamp(),
            request_id: current_request_id(),
        }
    }

    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// 200 OK with data
pub fn ok<T: Serialize>(message: impl Into<String>, data: T) -> Response {
    ApiResponse::success(message, data).into_response_with(StatusCode::OK)
}

/// 201 Created with data
pub fn created<T: Serialize>(message: impl Into<String>, data: T) -> Response {
    ApiResponse::success(message, data).into_response_with(StatusCode::CREATED)
}
