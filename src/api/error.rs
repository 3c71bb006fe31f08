//! API error handling.
//!
//! Every failure, including rejected JSON bodies and malformed path ids, is
//! rendered as `{"error": <message>, "status": <code>}`.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::service::ServiceError;

/// Message shown in place of unexpected internal errors.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

// =============================================================================
// API Error
// =============================================================================

/// Error body returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable error message.
    pub error: String,
    /// HTTP status code, repeated in the body.
    pub status: u16,
}

// =============================================================================
// API Error Response
// =============================================================================

/// API error response containing status code and error body.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    pub status: StatusCode,
    pub error: ApiError,
}

impl ApiErrorResponse {
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            error: ApiError {
                error: message.into(),
                status: status.as_u16(),
            },
        }
    }

    /// Creates a 400 Bad Request response.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a 404 Not Found response.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Creates a 409 Conflict response for lifecycle violations.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// Creates a 500 Internal Server Error response.
    #[must_use]
    pub fn internal_error() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<ServiceError> for ApiErrorResponse {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::BadInput(message) => Self::bad_request(message),
            ServiceError::InvalidTransition(message) => Self::conflict(message),
            ServiceError::NotFound(message) => Self::not_found(message),
            ServiceError::Unexpected(message) => {
                tracing::error!(error = %message, "Unexpected error");
                Self::internal_error()
            }
        }
    }
}

impl From<JsonRejection> for ApiErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(%rejection, "Request body rejected");
        Self::bad_request(rejection.body_text())
    }
}

// =============================================================================
// Tests
// =============================================================================
