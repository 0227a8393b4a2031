//! Table-backed identity repository
//!
//! Implements `IdentityRepository` over any `AttributeTable`: encodes with the
//! codec, retries transient failures and walks scan pages to the end.

use std::sync::Arc;

use crate::application::config::StoreConfig;
use crate::domain::entity::identity::Identity;
use crate::domain::repository::IdentityRepository;
use crate::error::{IdentityError, IdentityResult};
use crate::infra::codec::{self, Item};
use crate::infra::retry::with_retry;
use crate::infra::table::AttributeTable;

/// Identity repository over an attribute table
pub struct TableIdentityRepository<T> {
    table: T,
    config: Arc<StoreConfig>,
}

impl<T: Clone> Clone for TableIdentityRepository<T> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            config: self.config.clone(),
        }
    }
}

impl<T> TableIdentityRepository<T>
where
    T: AttributeTable + Sync,
{
    pub fn new(table: T, config: Arc<StoreConfig>) -> Self {
        Self { table, config }
    }

    pub fn table(&self) -> &T {
        &self.table
    }

    async fn fetch(&self, id: &str) -> IdentityResult<Option<Item>> {
        with_retry(
            &self.config.retry,
            self.config.operation_timeout,
            "get_item",
            || self.table.get_item(codec::key_for(id)),
        )
        .await
    }
}

impl<T> IdentityRepository for TableIdentityRepository<T>
where
    T: AttributeTable + Sync,
{
    async fn create_entry(&self, identity: &Identity) -> IdentityResult<Identity> {
        let item = codec::encode_identity(identity);

        with_retry(
            &self.config.retry,
            self.config.operation_timeout,
            "put_item",
            || self.table.put_item(item.clone()),
        )
        .await?;

        tracing::info!(
            identity_id = %identity.id,
            registrations = identity.registrations.len(),
            "Identity entry created"
        );

        Ok(identity.clone())
    }

    async fn retrieve_entry(&self, identity: &Identity) -> IdentityResult<Identity> {
        match self.fetch(&identity.id).await? {
            Some(item) => codec::decode_identity(&item),
            None => {
                tracing::debug!(identity_id = %identity.id, "Identity entry not found");
                Err(IdentityError::NotFound(identity.id.clone()))
            }
        }
    }

    async fn update_entry(
        &self,
        current: &Identity,
        updated: &Identity,
    ) -> IdentityResult<Identity> {
        let changes = codec::encode_mutable_fields(updated);

        with_retry(
            &self.config.retry,
            self.config.operation_timeout,
            "update_item",
            || {
                self.table
                    .update_item(codec::key_for(&current.id), changes.clone())
            },
        )
        .await?;

        tracing::info!(identity_id = %current.id, "Identity entry updated");

        // Target state, not the store's echo
        Ok(current.replaced_by(updated))
    }

    async fn delete_entry(&self, identity: &Identity) -> IdentityResult<Identity> {
        with_retry(
            &self.config.retry,
            self.config.operation_timeout,
            "delete_item",
            || self.table.delete_item(codec::key_for(&identity.id)),
        )
        .await?;

        tracing::info!(identity_id = %identity.id, "Identity entry deleted");

        Ok(Identity::empty())
    }

    async fn scan_entries(&self) -> IdentityResult<Vec<Identity>> {
        let mut identities = Vec::new();
        let mut start_key: Option<Item> = None;
        let mut pages = 0usize;

        loop {
            let page = with_retry(
                &self.config.retry,
                self.config.operation_timeout,
                "scan",
                || self.table.scan_page(start_key.clone()),
            )
            .await?;
            pages += 1;

            for item in &page.items {
                identities.push(codec::decode_identity(item)?);
            }

            match page.last_evaluated_key {
                Some(key) => start_key = Some(key),
                None => break,
            }
        }

        tracing::debug!(count = identities.len(), pages = pages, "Scanned identity entries");

        Ok(identities)
    }
}
