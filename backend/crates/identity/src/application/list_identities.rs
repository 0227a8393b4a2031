//! List Identities Use Case

use std::sync::Arc;

use crate::domain::entity::identity::Identity;
use crate::domain::repository::IdentityRepository;
use crate::error::IdentityResult;

/// List identities use case
pub struct ListIdentitiesUseCase<R>
where
    R: IdentityRepository,
{
    repo: Arc<R>,
}

impl<R> ListIdentitiesUseCase<R>
where
    R: IdentityRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> IdentityResult<Vec<Identity>> {
        let identities = self.repo.scan_entries().await?;

        tracing::debug!(count = identities.len(), "Identities listed");
        Ok(identities)
    }
}
