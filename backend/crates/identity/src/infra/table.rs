//! Attribute table seam
//!
//! The calls the identity adapter makes against a single-key document table.
//! Items are plain attribute maps; the codec owns their meaning.

use crate::error::IdentityResult;
use crate::infra::codec::Item;

/// One page of a scan
#[derive(Debug, Clone, Default)]
pub struct ScanPage {
    pub items: Vec<Item>,
    /// Start key for the next page; `None` once the table is exhausted
    pub last_evaluated_key: Option<Item>,
}

/// Single-table attribute store
#[trait_variant::make(AttributeTable: Send)]
pub trait LocalAttributeTable {
    /// Write the whole item, replacing any item with the same key
    async fn put_item(&self, item: Item) -> IdentityResult<()>;

    async fn get_item(&self, key: Item) -> IdentityResult<Option<Item>>;

    /// SET each attribute of `changes` on the keyed item and return the
    /// item as stored afterwards
    async fn update_item(&self, key: Item, changes: Item) -> IdentityResult<Item>;

    /// Deleting an absent key succeeds
    async fn delete_item(&self, key: Item) -> IdentityResult<()>;

    async fn scan_page(&self, exclusive_start_key: Option<Item>) -> IdentityResult<ScanPage>;
}
