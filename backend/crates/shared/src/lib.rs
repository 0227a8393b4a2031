//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate holds the error vocabulary every bounded context speaks:
//! - [`error::kind::ErrorKind`] - classification mapped to HTTP status codes
//! - [`error::app_error::AppError`] - unified error value and `AppResult<T>`
//! - the feature-gated RFC 7807 JSON error responder
//!
//! Only things with the same meaning in every domain belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
