//! Request-level error taxonomy.
//!
//! Handlers return these for expected conditions (bad input, rejected
//! credentials). The dispatcher turns any of them into an envelope; it is
//! also the only place that produces `Internal` for failures nobody
//! anticipated.

use http::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;

/// Result alias used by handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// A failure that maps onto a structured JSON error response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Malformed JSON body or missing/invalid fields.
    #[error("{0}")]
    BadRequest(String),

    /// Login rejected.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing or unusable bearer credential.
    #[error("{0}")]
    Unauthorized(String),

    /// No route for (method, path).
    #[error("Not found")]
    NotFound,

    /// Request body exceeded the configured limit (bytes).
    #[error("request body exceeds {0} bytes")]
    PayloadTooLarge(usize),

    /// Anything unanticipated.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials | ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body for this failure.
    ///
    /// Client-input and login failures use the `{success, error}` shape the
    /// auth endpoints return; the rest use a bare `{error}` object.
    pub fn body(&self) -> Value {
        match self {
            ApiError::BadRequest(message) => json!({ "success": false, "error": message }),
            ApiError::InvalidCredentials => {
                json!({ "success": false, "error": self.to_string() })
            }
            ApiError::Unauthorized(message) => json!({ "error": message }),
            ApiError::NotFound => json!({ "error": "Not found" }),
            ApiError::PayloadTooLarge(limit) => {
                json!({ "error": "Payload too large", "limit": limit })
            }
            ApiError::Internal(message) => {
                json!({ "error": "Internal server error", "message": message })
            }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
