//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::identity::Identity;
use crate::error::IdentityResult;

/// Identity repository trait
#[trait_variant::make(IdentityRepository: Send)]
pub trait LocalIdentityRepository {
    /// Write a new entry; returns the input unchanged
    async fn create_entry(&self, identity: &Identity) -> IdentityResult<Identity>;

    /// Load the entry stored under `identity.id`
    async fn retrieve_entry(&self, identity: &Identity) -> IdentityResult<Identity>;

    /// Replace the mutable fields of `current` with those of `updated`;
    /// returns the target state, not a store read
    async fn update_entry(&self, current: &Identity, updated: &Identity)
    -> IdentityResult<Identity>;

    /// Remove the entry; returns the empty identity
    async fn delete_entry(&self, identity: &Identity) -> IdentityResult<Identity>;

    /// Every stored entry, across all scan pages
    async fn scan_entries(&self) -> IdentityResult<Vec<Identity>>;
}
