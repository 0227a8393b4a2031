//! Retrieve Identity Use Case

use std::sync::Arc;

use crate::domain::entity::identity::Identity;
use crate::domain::repository::IdentityRepository;
use crate::error::IdentityResult;

/// Retrieve identity use case
pub struct RetrieveIdentityUseCase<R>
where
    R: IdentityRepository,
{
    repo: Arc<R>,
}

impl<R> RetrieveIdentityUseCase<R>
where
    R: IdentityRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Look up the identity stored under `id`
    pub async fn execute(&self, id: &str) -> IdentityResult<Identity> {
        let key = Identity {
            id: id.to_string(),
            ..Identity::default()
        };
        key.validate_key()?;

        self.repo.retrieve_entry(&key).await
    }
}
