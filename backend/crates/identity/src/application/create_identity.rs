//! Create Identity Use Case
//!
//! Stores a new identity. An empty id is replaced with a fresh UUID v4.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entity::identity::Identity;
use crate::domain::repository::IdentityRepository;
use crate::error::IdentityResult;

/// Create identity use case
pub struct CreateIdentityUseCase<R>
where
    R: IdentityRepository,
{
    repo: Arc<R>,
}

impl<R> CreateIdentityUseCase<R>
where
    R: IdentityRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, mut identity: Identity) -> IdentityResult<Identity> {
        identity.validate_contact()?;

        if identity.id.trim().is_empty() {
            identity.id = Uuid::new_v4().to_string();
        }

        let created = self.repo.create_entry(&identity).await?;

        tracing::info!(identity_id = %created.id, "Identity created");
        Ok(created)
    }
}
