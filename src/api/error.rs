//! API error type with HTTP status mapping

use thiserror::Error;

use crate::storage::StoreError;

/// Error crossing the API boundary
///
/// Each variant maps to one HTTP status; the message is safe to show the
/// caller.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Caller input failed validation (400)
    #[error("BAD_REQUEST: {0}")]
    BadRequest(String),

    /// No such route or resource (404)
    #[error("NOT_FOUND: {0}")]
    NotFound(String),

    /// Something failed on our side (500)
    #[error("INTERNAL_ERROR: {0}")]
    Internal(String),
}

impl ApiError {
    /// Validation failure
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Missing route or resource
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Internal failure
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status for this error
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::NotFound(_) => 404,
            Self::Internal(_) => 500,
        }
    }

    /// Stable machine-readable code string
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// The caller-safe message
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest(msg) | Self::NotFound(msg) | Self::Internal(msg) => msg,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Serializable error body for the JSON envelope
#[derive(Debug, serde::Serialize)]
pub struct ApiErrorData {
    /// Code string, one of `BAD_REQUEST`, `NOT_FOUND`, `INTERNAL_ERROR`
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl From<&ApiError> for ApiErrorData {
    fn from(err: &ApiError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.message().to_string(),
        }
    }
}
