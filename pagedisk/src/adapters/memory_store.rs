//! In-memory page store.

use crate::domain::{PageKey, PageStore};
use alloc::{collections::BTreeMap, vec::Vec};
use async_lock::RwLock;
use core::convert::Infallible;

/// Volatile `PageStore` keeping pages in a map.
///
/// Only pages that were written occupy memory, so a freshly created store
/// backs a disk of any size.
#[derive(Default)]
pub struct MemoryPageStore {
    pages: RwLock<BTreeMap<PageKey, Vec<u8>>>,
}

impl MemoryPageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored pages.
    pub async fn page_count(&self) -> usize {
        self.pages.read().await.len()
    }

    /// Whether a value is stored under `key`.
    pub async fn contains(&self, key: &PageKey) -> bool {
        self.pages.read().await.contains_key(key)
    }

    /// Copy of the value stored under `key`.
    pub async fn snapshot(&self, key: &PageKey) -> Option<Vec<u8>> {
        self.pages.read().await.get(key).cloned()
    }

    /// Stored keys in page order.
    pub async fn keys(&self) -> Vec<PageKey> {
        // PageKey orders by index first
        self.pages.read().await.keys().cloned().collect()
    }
}

impl PageStore for MemoryPageStore {
    type Error = Infallible;

    async fn get(&self, key: &PageKey) -> Result<Option<Vec<u8>>, Self::Error> {
        Ok(self.pages.read().await.get(key).cloned())
    }

    async fn put(&self, key: &PageKey, data: &[u8]) -> Result<(), Self::Error> {
        self.pages.write().await.insert(key.clone(), data.to_vec());
        Ok(())
    }
}
