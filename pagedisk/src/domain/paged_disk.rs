//! PagedDisk domain service - byte-addressed sparse disk over a page store.
//!
//! Byte ranges are split into page-aligned segments. Each segment resolves its
//! page through the [`PageCache`], fetching from the [`PageStore`] on a miss
//! (absent pages read as zeros), then copies out (read) or patches the page
//! and writes the whole page back before moving on (write).

use crate::domain::{
    entities::Page,
    error::DiskError,
    page_cache::PageCache,
    page_locks::PageLocks,
    ports::PageStore,
    value_objects::{PageConfig, PageIndex},
};
use crate::log_macros::{debug, trace, warning};
use alloc::{sync::Arc, vec::Vec};
use async_lock::Mutex;

/// A page shared between the cache and in-flight operations.
type SharedPage = Arc<Mutex<Page>>;

/// Sparse virtual disk addressed by byte offset.
///
/// `PagedDisk` implements the read/write engine:
/// - Translates byte ranges into page segments
/// - Materializes pages lazily, zero-filled when never written
/// - Keeps at most `max_cache_pages` pages in memory (FIFO eviction)
/// - Persists every touched page before a write returns
///
/// Range limits are not checked here; [`SectorDevice`](crate::adapters::SectorDevice)
/// enforces the device size.
///
/// # Concurrency
///
/// All operations take `&self`. Segments touching the same page are
/// serialized by a per-page lock held from cache lookup through write-back;
/// segments on different pages may interleave.
///
/// # Examples
///
/// ```ignore
/// use pagedisk::{MemoryPageStore, PageConfig, PagedDisk};
///
/// let config = PageConfig::new(4096, 8)?;
/// let disk = PagedDisk::new(MemoryPageStore::new(), config);
///
/// disk.write(4090, b"spans two pages").await?;
/// let data = disk.read_to_vec(4090, 15).await?;
/// assert_eq!(data, b"spans two pages");
/// ```
pub struct PagedDisk<S: PageStore> {
    store: S,
    config: PageConfig,
    cache: Mutex<PageCache<SharedPage>>,
    locks: PageLocks,
}

impl<S: PageStore> PagedDisk<S> {
    /// Create a disk over `store`.
    pub fn new(store: S, config: PageConfig) -> Self {
        Self {
            store,
            config,
            cache: Mutex::new(PageCache::new(config.cache_capacity())),
            locks: PageLocks::new(),
        }
    }

    /// Create a disk over `store` from raw page settings.
    ///
    /// # Errors
    ///
    /// Returns [`DiskError::InvalidConfig`] if `page_size` or
    /// `max_cache_pages` is zero.
    pub fn try_new(
        store: S,
        page_size: usize,
        max_cache_pages: usize,
    ) -> Result<Self, DiskError<S::Error>> {
        let config = PageConfig::new(page_size, max_cache_pages)?;
        Ok(Self::new(store, config))
    }

    /// Create a disk with 64 MiB pages and an 8-page cache.
    pub fn with_default_config(store: S) -> Self {
        Self::new(store, PageConfig::default())
    }

    /// Get the page configuration.
    pub const fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Get a reference to the page store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the disk and return the page store.
    ///
    /// Nothing is lost: every completed write is already in the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Pages currently held in memory, oldest insertion first.
    pub async fn cached_pages(&self) -> Vec<PageIndex> {
        self.cache.lock().await.indices()
    }

    /// Fill `dest` with the bytes starting at `offset`.
    ///
    /// Never-written regions read as zeros. Reading never modifies the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be opened, a page fetch fails, or
    /// the store holds a page of the wrong length.
    pub async fn read(&self, offset: u64, dest: &mut [u8]) -> Result<(), DiskError<S::Error>> {
        if dest.is_empty() {
            return Ok(());
        }
        check_range(offset, dest.len())?;
        self.open_store().await?;

        for segment in self.config.segments(offset, dest.len()) {
            let _guard = self.locks.lock(segment.index).await;
            let shared = self.resolve(segment.index).await?;
            let page = shared.lock().await;
            page.copy_to_slice(segment.page_offset, &mut dest[segment.buf_range()]);
        }

        Ok(())
    }

    /// Read `len` bytes starting at `offset` into a new buffer.
    ///
    /// # Errors
    ///
    /// See [`read`](Self::read).
    pub async fn read_to_vec(&self, offset: u64, len: usize) -> Result<Vec<u8>, DiskError<S::Error>> {
        let mut data = alloc::vec![0u8; len];
        self.read(offset, &mut data).await?;
        Ok(data)
    }

    /// Write `src` starting at `offset`.
    ///
    /// Pages are patched and persisted one at a time, in address order; the
    /// call returns once every touched page has been stored. Bytes outside the
    /// range are preserved.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be opened or a page fetch or
    /// write-back fails. Pages before the failing one are persisted; the
    /// failing page is dropped from the cache so later reads see what the
    /// store actually holds.
    ///
    /// # Cancellation
    ///
    /// Dropping the future mid-write leaves earlier pages persisted and the
    /// page in flight as the store last acknowledged it.
    pub async fn write(&self, offset: u64, src: &[u8]) -> Result<(), DiskError<S::Error>> {
        if src.is_empty() {
            return Ok(());
        }
        check_range(offset, src.len())?;
        self.open_store().await?;

        for segment in self.config.segments(offset, src.len()) {
            let _guard = self.locks.lock(segment.index).await;
            let shared = self.resolve(segment.index).await?;

            {
                let mut page = shared.lock().await;
                page.copy_from_slice(segment.page_offset, &src[segment.buf_range()]);

                trace!("Writing back {} ({} bytes changed)", segment.index, segment.len);
                if let Err(e) = self.store.put(&segment.index.key(), page.data()).await {
                    warning!("Write-back of {} failed, dropping it from the cache", segment.index);
                    drop(page);
                    self.cache.lock().await.remove(segment.index);
                    return Err(DiskError::Store(e));
                }
                page.mark_persisted();
            }

            // Re-insert in case another page's miss evicted it meanwhile
            if let Some((victim, _)) = self.cache.lock().await.put(segment.index, shared) {
                debug!("Evicted {} from page cache", victim);
            }
        }

        Ok(())
    }

    async fn open_store(&self) -> Result<(), DiskError<S::Error>> {
        self.store.open().await.map_err(|e| {
            warning!("Page store unavailable");
            DiskError::StoreUnavailable(e)
        })
    }

    /// Return the cached page, fetching and caching it on a miss.
    ///
    /// A cached page that is still dirty belongs to a write dropped before
    /// its write-back finished; it is reloaded from the store.
    ///
    /// The caller must hold the page's lock.
    async fn resolve(&self, index: PageIndex) -> Result<SharedPage, DiskError<S::Error>> {
        let cached = self.cache.lock().await.get(index).map(Arc::clone);
        if let Some(shared) = cached {
            {
                let mut page = shared.lock().await;
                if page.is_dirty() {
                    warning!("Discarding unpersisted changes to {}", index);
                    *page = self.fetch(index).await?;
                }
            }
            return Ok(shared);
        }

        trace!("Page cache miss for {}", index);
        let shared = Arc::new(Mutex::new(self.fetch(index).await?));

        if let Some((victim, _)) = self.cache.lock().await.put(index, Arc::clone(&shared)) {
            debug!("Evicted {} from page cache", victim);
        }

        Ok(shared)
    }

    async fn fetch(&self, index: PageIndex) -> Result<Page, DiskError<S::Error>> {
        let page_size = self.config.page_size();

        match self.store.get(&index.key()).await.map_err(DiskError::Store)? {
            Some(data) if data.len() == page_size => Ok(Page::new(index, data)),
            Some(data) => Err(DiskError::PageLength {
                index,
                expected: page_size,
                actual: data.len(),
            }),
            None => {
                trace!("{} never written, zero-filling", index);
                Ok(Page::new_zeroed(index, page_size))
            }
        }
    }
}

fn check_range<E>(offset: u64, len: usize) -> Result<(), DiskError<E>> {
    match offset.checked_add(len as u64) {
        Some(_) => Ok(()),
        None => Err(DiskError::AddressOverflow { offset, len }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PageConfigError, PageKey};
    use std::collections::HashMap;
    use std::io;
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    // Mock store counting accesses, with switchable failures
    #[derive(Default)]
    struct MockStore {
        pages: StdMutex<HashMap<String, Vec<u8>>>,
        gets: AtomicUsize,
        puts: AtomicUsize,
        fail_open: AtomicBool,
        fail_put: AtomicBool,
        stall_put: AtomicBool,
    }

    impl MockStore {
        fn page(&self, index: u64) -> Option<Vec<u8>> {
            self.pages
                .lock()
                .unwrap()
                .get(PageIndex::new(index).key().as_str())
                .cloned()
        }
    }

    impl PageStore for MockStore {
        type Error = io::Error;

        async fn open(&self) -> Result<(), Self::Error> {
            if self.fail_open.load(Ordering::SeqCst) {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "quota exceeded"));
            }
            Ok(())
        }

        async fn get(&self, key: &PageKey) -> Result<Option<Vec<u8>>, Self::Error> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            Ok(self.pages.lock().unwrap().get(key.as_str()).cloned())
        }

        async fn put(&self, key: &PageKey, data: &[u8]) -> Result<(), Self::Error> {
            self.puts.fetch_add(1, Ordering::SeqCst);
            if self.stall_put.load(Ordering::SeqCst) {
                core::future::pending::<()>().await;
            }
            if self.fail_put.load(Ordering::SeqCst) {
                return Err(io::Error::new(io::ErrorKind::Other, "write failed"));
            }
            self.pages
                .lock()
                .unwrap()
                .insert(key.as_str().to_owned(), data.to_vec());
            Ok(())
        }
    }

    fn disk(page_size: usize, max_cache_pages: usize) -> PagedDisk<MockStore> {
        let config = PageConfig::new(page_size, max_cache_pages).unwrap();
        PagedDisk::new(MockStore::default(), config)
    }

    #[test]
    fn test_try_new_validates_config() {
        let disk = PagedDisk::try_new(MockStore::default(), 32, 2).unwrap();
        assert_eq!(disk.config().page_size(), 32);
        assert_eq!(disk.config().max_cache_pages(), 2);

        assert!(matches!(
            PagedDisk::try_new(MockStore::default(), 0, 2),
            Err(DiskError::InvalidConfig(PageConfigError::ZeroPageSize))
        ));
        assert!(matches!(
            PagedDisk::try_new(MockStore::default(), 32, 0),
            Err(DiskError::InvalidConfig(PageConfigError::ZeroCachePages))
        ));
    }

    #[tokio::test]
    async fn test_read_unwritten_is_zero_and_stores_nothing() {
        let disk = disk(16, 8);

        let data = disk.read_to_vec(5, 40).await.unwrap();
        assert_eq!(data, vec![0u8; 40]);
        assert_eq!(disk.store().puts.load(Ordering::SeqCst), 0);
        assert!(disk.store().pages.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_write_persists_full_pages() {
        let disk = disk(16, 8);

        disk.write(10, &[0xAB; 20]).await.unwrap();

        let page0 = disk.store().page(0).unwrap();
        let page1 = disk.store().page(1).unwrap();
        assert_eq!(page0.len(), 16);
        assert_eq!(page1.len(), 16);
        assert_eq!(&page0[..10], &[0u8; 10]);
        assert_eq!(&page0[10..], &[0xAB; 6]);
        assert_eq!(&page1[..14], &[0xAB; 14]);
        assert_eq!(&page1[14..], &[0u8; 2]);
        assert_eq!(disk.store().puts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_cached_page_is_not_refetched() {
        let disk = disk(16, 8);

        disk.read_to_vec(0, 4).await.unwrap();
        disk.read_to_vec(8, 4).await.unwrap();
        disk.write(2, &[1, 2]).await.unwrap();

        assert_eq!(disk.store().gets.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_zero_length_is_noop() {
        let disk = disk(16, 8);
        disk.store().fail_open.store(true, Ordering::SeqCst);

        disk.read(100, &mut []).await.unwrap();
        disk.write(100, &[]).await.unwrap();
        assert_eq!(disk.store().gets.load(Ordering::SeqCst), 0);
        assert!(disk.cached_pages().await.is_empty());
    }

    #[tokio::test]
    async fn test_store_unavailable() {
        let disk = disk(16, 8);
        disk.store().fail_open.store(true, Ordering::SeqCst);

        let result = disk.read_to_vec(0, 4).await;
        assert!(matches!(result, Err(DiskError::StoreUnavailable(_))));

        // The next call retries the open
        disk.store().fail_open.store(false, Ordering::SeqCst);
        assert!(disk.read_to_vec(0, 4).await.is_ok());
    }

    #[tokio::test]
    async fn test_failed_write_back_drops_page() {
        let disk = disk(16, 8);
        disk.write(0, &[1; 4]).await.unwrap();

        disk.store().fail_put.store(true, Ordering::SeqCst);
        let result = disk.write(0, &[9; 4]).await;
        assert!(matches!(result, Err(DiskError::Store(_))));
        assert!(disk.cached_pages().await.is_empty());

        // Reads see the last persisted state, not the failed write
        disk.store().fail_put.store(false, Ordering::SeqCst);
        assert_eq!(disk.read_to_vec(0, 4).await.unwrap(), vec![1; 4]);
    }

    #[tokio::test]
    async fn test_dropped_write_is_not_served_from_cache() {
        let disk = disk(16, 8);
        disk.write(0, &[1; 4]).await.unwrap();

        disk.store().stall_put.store(true, Ordering::SeqCst);
        let dropped = tokio::time::timeout(Duration::from_millis(10), disk.write(0, &[9; 4])).await;
        assert!(dropped.is_err());
        assert_eq!(disk.cached_pages().await, vec![PageIndex::new(0)]);

        disk.store().stall_put.store(false, Ordering::SeqCst);
        assert_eq!(disk.read_to_vec(0, 4).await.unwrap(), vec![1; 4]);
        assert_eq!(disk.store().gets.load(Ordering::SeqCst), 2);

        // The reloaded page accepts new writes as usual
        disk.write(2, &[5; 2]).await.unwrap();
        assert_eq!(&disk.store().page(0).unwrap()[..4], &[1, 1, 5, 5]);
    }

    #[tokio::test]
    async fn test_wrong_page_length_rejected() {
        let disk = disk(16, 8);
        disk.store()
            .pages
            .lock()
            .unwrap()
            .insert("page:0".to_owned(), vec![1, 2, 3]);

        let result = disk.read_to_vec(0, 1).await;
        assert!(matches!(
            result,
            Err(DiskError::PageLength { expected: 16, actual: 3, .. })
        ));
    }

    #[tokio::test]
    async fn test_address_overflow_rejected() {
        let disk = disk(16, 8);
        let result = disk.write(u64::MAX - 1, &[0; 4]).await;

        assert!(matches!(result, Err(DiskError::AddressOverflow { .. })));
        assert_eq!(disk.store().puts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_eviction_keeps_fifo_order() {
        let disk = disk(16, 2);

        disk.read_to_vec(0, 1).await.unwrap();
        disk.read_to_vec(16, 1).await.unwrap();
        disk.read_to_vec(0, 1).await.unwrap(); // hit, no promotion
        disk.read_to_vec(32, 1).await.unwrap();

        assert_eq!(
            disk.cached_pages().await,
            vec![PageIndex::new(1), PageIndex::new(2)]
        );
    }

    #[tokio::test]
    async fn test_evicted_page_reloads_from_store() {
        let disk = disk(16, 1);

        disk.write(0, b"hello").await.unwrap();
        disk.read_to_vec(16, 1).await.unwrap(); // evicts page 0
        assert_eq!(disk.read_to_vec(0, 5).await.unwrap(), b"hello");
    }
}
