//! Delete Identity Use Case
//!
//! The caller must present id, email and phone. The stored entity is read
//! first and the delete is issued against what was read.

use std::sync::Arc;

use crate::domain::entity::identity::Identity;
use crate::domain::repository::IdentityRepository;
use crate::error::IdentityResult;

/// Delete identity use case
pub struct DeleteIdentityUseCase<R>
where
    R: IdentityRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteIdentityUseCase<R>
where
    R: IdentityRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Returns the empty identity on success
    pub async fn execute(&self, identity: &Identity) -> IdentityResult<Identity> {
        identity.validate_complete()?;

        let stored = self.repo.retrieve_entry(identity).await?;
        let deleted = self.repo.delete_entry(&stored).await?;

        tracing::info!(identity_id = %stored.id, "Identity deleted");
        Ok(deleted)
    }
}
