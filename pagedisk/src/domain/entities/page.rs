//! Page entity - one materialized page of the disk.

use crate::domain::value_objects::PageIndex;

use alloc::vec::Vec;

/// A page of disk data held in memory.
///
/// The buffer length is fixed at construction and always equals the
/// configured page size; only in-place modification is possible.
///
/// A page is dirty from the moment it is modified until
/// [`mark_persisted`](Self::mark_persisted) records that the store holds the
/// same bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    index: PageIndex,
    data: Vec<u8>,
    dirty: bool,
}

impl Page {
    /// Wrap a buffer fetched from the page store.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagedisk::domain::{Page, PageIndex};
    ///
    /// let page = Page::new(PageIndex::new(0), vec![7u8; 16]);
    /// assert_eq!(page.size(), 16);
    /// ```
    pub fn new(index: PageIndex, data: Vec<u8>) -> Self {
        Self {
            index,
            data,
            dirty: false,
        }
    }

    /// Create a never-written page: `size` zero bytes.
    pub fn new_zeroed(index: PageIndex, size: usize) -> Self {
        Self {
            index,
            data: alloc::vec![0u8; size],
            dirty: false,
        }
    }

    /// Get the page index.
    #[inline]
    pub const fn index(&self) -> PageIndex {
        self.index
    }

    /// Get immutable access to the page data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the size of the page data in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Whether the page holds bytes the store has not acknowledged.
    #[inline]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Record that the store now holds this page's bytes.
    #[inline]
    pub fn mark_persisted(&mut self) {
        self.dirty = false;
    }

    /// Copy `dest.len()` bytes starting at `offset` into `dest`.
    ///
    /// # Panics
    ///
    /// Panics if the range runs past the end of the page.
    pub fn copy_to_slice(&self, offset: usize, dest: &mut [u8]) {
        dest.copy_from_slice(&self.data[offset..offset + dest.len()]);
    }

    /// Overwrite the bytes starting at `offset` with `source`.
    ///
    /// Bytes outside `[offset, offset + source.len())` are left untouched.
    /// The page becomes dirty.
    ///
    /// # Panics
    ///
    /// Panics if the range runs past the end of the page.
    pub fn copy_from_slice(&mut self, offset: usize, source: &[u8]) {
        self.data[offset..offset + source.len()].copy_from_slice(source);
        self.dirty = true;
    }
}
