//! PageStore port - Secondary (driven) port for page persistence.
//!
//! This port defines what the paged disk needs from a durable key-value
//! backend. Adapters implement this trait to connect the disk to memory,
//! files, or any other store keyed by string.

use crate::domain::value_objects::PageKey;
use alloc::{sync::Arc, vec::Vec};
use core::error::Error;

/// Port for asynchronous page persistence.
///
/// This is a **secondary (driven) port** in hexagonal architecture terms.
/// The paged disk depends on this abstraction; adapters provide concrete
/// implementations.
///
/// # Hexagonal Architecture
///
/// ```text
/// ┌─────────────────────┐
/// │   Domain Layer      │
/// │  (PagedDisk)        │
/// └──────────┬──────────┘
///            │ depends on
///            ▼
/// ┌─────────────────────┐
/// │  PageStore Port     │  ◄── This trait
/// └──────────┬──────────┘
///            │ implemented by
///            ▼
/// ┌─────────────────────┐
/// │  Adapter Layer      │
/// │ (MemoryPageStore,   │
/// │  FsPageStore)       │
/// └─────────────────────┘
/// ```
///
/// # Contract
///
/// - Absence of a key means the page was never written; the disk reads it as zeros.
/// - Values handed to `put` are always exactly one page long, and `get` must
///   return what the last successful `put` stored.
/// - The disk never deletes keys.
#[allow(async_fn_in_trait)]
pub trait PageStore: Send + Sync {
    /// The error type for store operations.
    type Error: Error + Send + Sync + 'static;

    /// Open (or create) the underlying store.
    ///
    /// Called at the start of every disk read and write, so implementations
    /// should make repeated calls cheap. The default implementation is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be opened; the disk reports it as
    /// [`DiskError::StoreUnavailable`](crate::domain::DiskError::StoreUnavailable).
    async fn open(&self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Fetch the value stored under `key`, or `None` if it was never written.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    async fn get(&self, key: &PageKey) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Store `data` under `key`, replacing any previous value.
    ///
    /// Must not return `Ok` until the value is as durable as the store can make it.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; the previous value may or may not
    /// still be present.
    async fn put(&self, key: &PageKey, data: &[u8]) -> Result<(), Self::Error>;
}

impl<S: PageStore> PageStore for Arc<S> {
    type Error = S::Error;

    async fn open(&self) -> Result<(), Self::Error> {
        (**self).open().await
    }

    async fn get(&self, key: &PageKey) -> Result<Option<Vec<u8>>, Self::Error> {
        (**self).get(key).await
    }

    async fn put(&self, key: &PageKey, data: &[u8]) -> Result<(), Self::Error> {
        (**self).put(key, data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PageIndex;
    use std::collections::HashMap;
    use std::sync::Mutex;

    // Mock store keyed by string, like a browser object store
    #[derive(Default)]
    struct MockStore {
        values: Mutex<HashMap<String, Vec<u8>>>,
    }

    impl PageStore for MockStore {
        type Error = std::io::Error;

        async fn get(&self, key: &PageKey) -> Result<Option<Vec<u8>>, Self::Error> {
            Ok(self.values.lock().unwrap().get(key.as_str()).cloned())
        }

        async fn put(&self, key: &PageKey, data: &[u8]) -> Result<(), Self::Error> {
            self.values
                .lock()
                .unwrap()
                .insert(key.as_str().to_owned(), data.to_vec());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_mock_store_put_get() {
        let store = MockStore::default();
        let key = PageIndex::new(2).key();

        assert_eq!(store.get(&key).await.unwrap(), None);
        store.put(&key, &[1, 2, 3]).await.unwrap();
        assert_eq!(store.get(&key).await.unwrap(), Some(vec![1, 2, 3]));
        assert!(store.values.lock().unwrap().contains_key("page:2"));
    }

    #[tokio::test]
    async fn test_default_open_is_noop() {
        let store = MockStore::default();
        store.open().await.unwrap();
    }

    #[tokio::test]
    async fn test_arc_store_forwards() {
        let store = Arc::new(MockStore::default());
        let shared = Arc::clone(&store);
        let key = PageIndex::new(0).key();

        shared.put(&key, &[42]).await.unwrap();
        assert_eq!(store.get(&key).await.unwrap(), Some(vec![42]));
    }
}
