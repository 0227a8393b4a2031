//! In-process attribute table
//!
//! Ordered by key so scans page deterministically. Used for local runs
//! (`IDENTITY_STORE=memory`) and tests.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

use aws_sdk_dynamodb::types::AttributeValue;
use tokio::sync::RwLock;

use crate::error::{IdentityError, IdentityResult};
use crate::infra::codec::{Item, KEY_ATTR};
use crate::infra::table::{AttributeTable, ScanPage};

const DEFAULT_PAGE_SIZE: usize = 100;

/// In-memory table keyed by `identifier`
#[derive(Clone)]
pub struct InMemoryTable {
    items: Arc<RwLock<BTreeMap<String, Item>>>,
    page_size: usize,
}

impl Default for InMemoryTable {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTable {
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Scans return at most `page_size` items per page
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            items: Arc::new(RwLock::new(BTreeMap::new())),
            page_size: page_size.max(1),
        }
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    /// Store a raw item, bypassing the codec
    pub async fn insert_raw(&self, item: Item) -> IdentityResult<()> {
        let key = key_of(&item)?;
        self.items.write().await.insert(key, item);
        Ok(())
    }
}

fn key_of(item: &Item) -> IdentityResult<String> {
    item.get(KEY_ATTR)
        .and_then(|value| value.as_s().ok())
        .cloned()
        .ok_or_else(|| IdentityError::StoreOperation {
            operation: "validate key",
            message: format!("item is missing string key attribute '{}'", KEY_ATTR),
        })
}

impl AttributeTable for InMemoryTable {
    async fn put_item(&self, item: Item) -> IdentityResult<()> {
        let key = key_of(&item)?;
        self.items.write().await.insert(key, item);
        Ok(())
    }

    async fn get_item(&self, key: Item) -> IdentityResult<Option<Item>> {
        let key = key_of(&key)?;
        Ok(self.items.read().await.get(&key).cloned())
    }

    async fn update_item(&self, key: Item, changes: Item) -> IdentityResult<Item> {
        let id = key_of(&key)?;
        let mut items = self.items.write().await;

        // UpdateItem creates the item when the key is absent
        let stored = items.entry(id.clone()).or_insert_with(|| {
            Item::from([(KEY_ATTR.to_string(), AttributeValue::S(id))])
        });
        stored.extend(changes);

        Ok(stored.clone())
    }

    async fn delete_item(&self, key: Item) -> IdentityResult<()> {
        let key = key_of(&key)?;
        self.items.write().await.remove(&key);
        Ok(())
    }

    async fn scan_page(&self, exclusive_start_key: Option<Item>) -> IdentityResult<ScanPage> {
        let lower = match exclusive_start_key {
            Some(start) => Bound::Excluded(key_of(&start)?),
            None => Bound::Unbounded,
        };

        let items = self.items.read().await;
        let mut range = items.range((lower, Bound::Unbounded));

        let page: Vec<Item> = range
            .by_ref()
            .take(self.page_size)
            .map(|(_, item)| item.clone())
            .collect();

        let last_evaluated_key = if range.next().is_some() {
            page.last()
                .and_then(|item| item.get(KEY_ATTR).cloned())
                .map(|key| Item::from([(KEY_ATTR.to_string(), key)]))
        } else {
            None
        };

        Ok(ScanPage {
            items: page,
            last_evaluated_key,
        })
    }
}
