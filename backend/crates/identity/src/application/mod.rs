//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod create_identity;
pub mod delete_identity;
pub mod list_identities;
pub mod retrieve_identity;
pub mod update_identity;

// Re-exports
pub use config::IdentityConfig;
pub use create_identity::CreateIdentityUseCase;
pub use delete_identity::DeleteIdentityUseCase;
pub use list_identities::ListIdentitiesUseCase;
pub use retrieve_identity::RetrieveIdentityUseCase;
pub use update_identity::UpdateIdentityUseCase;
