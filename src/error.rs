//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the gateway. Each variant
//! maps to a remark string (the upstream protocol's exit codes) and an HTTP
//! status, and renders as a structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "remark": "BAD_REQUEST",
///     "message": "unparseable week start: not-a-date",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with remark code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Remark string identifying the failure class.
    pub remark: &'static str,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with remark and HTTP status mapping.
///
/// | Remark                  | HTTP Status               |
/// |-------------------------|---------------------------|
/// | `BAD_REQUEST`           | 400 Bad Request           |
/// | `UNAUTHORIZED`          | 401 Unauthorized          |
/// | `DOES_NOT_EXIST`        | 404 Not Found             |
/// | `INTERNAL_SERVER_ERROR` | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Week-start token or event range could not be interpreted.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// Caller identity is absent or invalid.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// A referenced entity has no record where a lookup expected one.
    #[error("not found: {0}")]
    NotFound(String),

    /// Inbound real-time message is missing required fields.
    ///
    /// Handled locally in the WebSocket layer (dropped with a diagnostic);
    /// never propagated to other connections.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the remark string for this variant.
    #[must_use]
    pub const fn remark(&self) -> &'static str {
        match self {
            Self::InvalidRange(_) | Self::MalformedPayload(_) => "BAD_REQUEST",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::NotFound(_) => "DOES_NOT_EXIST",
            Self::PersistenceError(_) | Self::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRange(_) | Self::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::PersistenceError(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                remark: self.remark(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
