//! Identity Error Types
//!
//! Identity-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Identity-specific result type alias
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Identity-specific error variants
///
/// Store failures are split by cause so the HTTP layer can tell a caller
/// whether retrying later makes sense.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// ID, email or phone left empty
    #[error("Missing required fields: {0}")]
    MissingRequiredFields(String),

    /// Request body is not a valid identity document
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// No item stored under the identifier
    #[error("Identity not found: {0}")]
    NotFound(String),

    /// Stored item does not have the expected shape
    #[error("Malformed identity record: {0}")]
    MalformedRecord(String),

    /// Store could not be reached (dispatch, credentials, DNS)
    #[error("Store connection error: {0}")]
    StoreConnection(String),

    /// Store rejected the call for capacity reasons
    #[error("Store throttled the request: {0}")]
    StoreThrottled(String),

    /// Store call did not finish within the operation timeout
    #[error("Store call timed out: {0}")]
    StoreTimeout(&'static str),

    /// Whole request ran past its deadline
    #[error("Request did not complete within {}ms", .0.as_millis())]
    RequestTimeout(Duration),

    /// Store rejected or failed the call
    #[error("Store {operation} failed: {message}")]
    StoreOperation {
        operation: &'static str,
        message: String,
    },

    /// Invalid process configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IdentityError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            IdentityError::MissingRequiredFields(_) | IdentityError::InvalidBody(_) => {
                ErrorKind::BadRequest
            }
            IdentityError::NotFound(_) => ErrorKind::NotFound,
            IdentityError::MalformedRecord(_) => ErrorKind::BadGateway,
            IdentityError::StoreConnection(_) | IdentityError::StoreThrottled(_) => {
                ErrorKind::ServiceUnavailable
            }
            IdentityError::StoreTimeout(_) | IdentityError::RequestTimeout(_) => {
                ErrorKind::GatewayTimeout
            }
            IdentityError::StoreOperation { .. }
            | IdentityError::Configuration(_)
            | IdentityError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Whether a retry of the same store call may succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            IdentityError::StoreConnection(_)
                | IdentityError::StoreThrottled(_)
                | IdentityError::StoreTimeout(_)
        )
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string());
        match self {
            IdentityError::MissingRequiredFields(_) => {
                err.with_action("Provide non-empty id, email and phone")
            }
            IdentityError::StoreThrottled(_)
            | IdentityError::StoreTimeout(_)
            | IdentityError::RequestTimeout(_) => err.with_action("Retry the request later"),
            _ => err,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            IdentityError::StoreOperation { operation, message } => {
                tracing::error!(operation = %operation, message = %message, "Identity store error");
            }
            IdentityError::MalformedRecord(detail) => {
                tracing::error!(detail = %detail, "Malformed identity record in store");
            }
            IdentityError::Configuration(msg) | IdentityError::Internal(msg) => {
                tracing::error!(message = %msg, "Identity internal error");
            }
            IdentityError::StoreConnection(_)
            | IdentityError::StoreThrottled(_)
            | IdentityError::StoreTimeout(_) => {
                tracing::warn!(error = %self, "Identity store unavailable");
            }
            IdentityError::RequestTimeout(deadline) => {
                tracing::warn!(
                    deadline_ms = deadline.as_millis() as u64,
                    "Identity request deadline exceeded"
                );
            }
            _ => {
                tracing::debug!(error = %self, "Identity error");
            }
        }
    }
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<axum::extract::rejection::JsonRejection> for IdentityError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        IdentityError::InvalidBody(rejection.body_text())
    }
}
