//! Update Identity Use Case
//!
//! Replaces every mutable field of a stored identity. The id never changes.

use std::sync::Arc;

use crate::domain::entity::identity::Identity;
use crate::domain::repository::IdentityRepository;
use crate::error::IdentityResult;

/// Update identity use case
pub struct UpdateIdentityUseCase<R>
where
    R: IdentityRepository,
{
    repo: Arc<R>,
}

impl<R> UpdateIdentityUseCase<R>
where
    R: IdentityRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// `target` carries the identity id and its new state
    pub async fn execute(&self, target: Identity) -> IdentityResult<Identity> {
        target.validate_complete()?;

        let current = self.repo.retrieve_entry(&target).await?;
        let updated = self.repo.update_entry(&current, &target).await?;

        tracing::info!(
            identity_id = %updated.id,
            registrations = updated.registrations.len(),
            "Identity updated"
        );
        Ok(updated)
    }
}
