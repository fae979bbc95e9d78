//! PageCache domain service - bounded first-in-first-out page residency.
//!
//! The cache maps page indices to in-memory values (the paged disk stores
//! shared page buffers). It never talks to the page store: misses are
//! reported to the caller, who fetches and inserts, and evicted values are
//! simply handed back.

use crate::domain::value_objects::PageIndex;
use alloc::{collections::{BTreeMap, VecDeque}, vec::Vec};
use core::num::NonZeroUsize;

/// Bounded page cache with insertion-order eviction.
///
/// # Business Rules
///
/// - At most `capacity` entries are held at any time
/// - A `get` hit does not refresh an entry's position
/// - Overwriting an existing index replaces the value in place and keeps
///   its original insertion position
/// - Inserting a new index into a full cache evicts exactly one entry:
///   the one inserted earliest
///
/// # Examples
///
/// ```
/// use core::num::NonZeroUsize;
/// use pagedisk::domain::{PageCache, PageIndex};
///
/// let mut cache = PageCache::new(NonZeroUsize::new(2).unwrap());
/// cache.put(PageIndex::new(0), "a");
/// cache.put(PageIndex::new(1), "b");
///
/// let evicted = cache.put(PageIndex::new(2), "c");
/// assert_eq!(evicted, Some((PageIndex::new(0), "a")));
/// ```
#[derive(Debug, Clone)]
pub struct PageCache<V> {
    capacity: NonZeroUsize,
    entries: BTreeMap<PageIndex, V>,
    /// Indices in insertion order, oldest first.
    order: VecDeque<PageIndex>,
}

impl<V> PageCache<V> {
    /// Create an empty cache holding at most `capacity` pages.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            entries: BTreeMap::new(),
            order: VecDeque::with_capacity(capacity.get() + 1),
        }
    }

    /// Look up a page. A hit does not affect eviction order.
    pub fn get(&self, index: PageIndex) -> Option<&V> {
        self.entries.get(&index)
    }

    /// Insert or overwrite the entry for `index`.
    ///
    /// Returns the evicted entry if the insertion pushed the cache over capacity.
    pub fn put(&mut self, index: PageIndex, value: V) -> Option<(PageIndex, V)> {
        if let Some(slot) = self.entries.get_mut(&index) {
            *slot = value;
            return None;
        }

        self.entries.insert(index, value);
        self.order.push_back(index);

        if self.entries.len() > self.capacity.get() {
            let victim = self.order.pop_front()?;
            let value = self.entries.remove(&victim)?;
            return Some((victim, value));
        }

        None
    }

    /// Drop the entry for `index`, returning its value.
    pub fn remove(&mut self, index: PageIndex) -> Option<V> {
        let value = self.entries.remove(&index)?;
        self.order.retain(|&i| i != index);
        Some(value)
    }

    /// Number of resident pages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no page is resident.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resident indices, oldest insertion first.
    pub fn indices(&self) -> Vec<PageIndex> {
        self.order.iter().copied().collect()
    }
}
