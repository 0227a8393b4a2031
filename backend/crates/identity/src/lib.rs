//! Identity Registry Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Identity entity, vehicle types, repository trait
//! - `application/` - Use cases and configuration
//! - `infra/` - Attribute tables (DynamoDB, in-memory), codec, retry
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - CRUD and list over identities keyed by `identifier`
//! - Any number of vehicle registrations per identity, stored as a list of maps
//! - Full-table scans that follow continuation keys to the end
//!
//! ## Failure Model
//! - Each store call runs under a timeout and is retried with backoff when
//!   the failure is transient (connection, throttling, timeout)
//! - Every error reaches the client as an RFC 7807 JSON body with a status
//!   that tells validation, absence and store trouble apart

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::IdentityConfig;
pub use error::{IdentityError, IdentityResult};
pub use infra::repository::TableIdentityRepository;
pub use presentation::router::identity_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::identity::*;
    pub use crate::domain::value_object::vehicle_type::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::dynamo::DynamoTable;
    pub use crate::infra::memory::InMemoryTable;

    pub type DynamoIdentityStore = crate::infra::repository::TableIdentityRepository<DynamoTable>;
    pub type InMemoryIdentityStore =
        crate::infra::repository::TableIdentityRepository<InMemoryTable>;
}

pub mod router {
    pub use crate::presentation::router::*;
}
