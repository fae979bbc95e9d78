//! Page configuration value object and byte-range to page translation.

use super::PageIndex;
use core::num::NonZeroUsize;

/// Default page size: 64 MiB.
pub const DEFAULT_PAGE_SIZE: usize = 64 * 1024 * 1024;

/// Default number of pages held by the page cache.
pub const DEFAULT_MAX_CACHE_PAGES: usize = 8;

/// Configuration for the paged disk engine.
///
/// Defines how the disk's byte address space is partitioned into pages and
/// how many of those pages may be resident in memory at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageConfig {
    page_size: usize,
    max_cache_pages: NonZeroUsize,
}

impl PageConfig {
    /// Create a new page configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `page_size` is zero or `max_cache_pages` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagedisk::domain::PageConfig;
    ///
    /// let config = PageConfig::new(4096, 8).unwrap();
    /// assert_eq!(config.page_size(), 4096);
    /// assert!(PageConfig::new(0, 8).is_err());
    /// ```
    pub const fn new(page_size: usize, max_cache_pages: usize) -> Result<Self, PageConfigError> {
        if page_size == 0 {
            return Err(PageConfigError::ZeroPageSize);
        }

        match NonZeroUsize::new(max_cache_pages) {
            Some(max_cache_pages) => Ok(Self {
                page_size,
                max_cache_pages,
            }),
            None => Err(PageConfigError::ZeroCachePages),
        }
    }

    /// Get the page size in bytes.
    #[inline]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Get the maximum number of cached pages.
    #[inline]
    pub const fn max_cache_pages(&self) -> usize {
        self.max_cache_pages.get()
    }

    /// Cache capacity as a non-zero count.
    #[inline]
    pub const fn cache_capacity(&self) -> NonZeroUsize {
        self.max_cache_pages
    }

    /// Locate a byte offset: returns `(page_index, offset_in_page)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagedisk::domain::{PageConfig, PageIndex};
    ///
    /// let config = PageConfig::new(4096, 8).unwrap();
    /// assert_eq!(config.locate(5000), (PageIndex::new(1), 904));
    /// ```
    #[inline]
    pub const fn locate(&self, offset: u64) -> (PageIndex, usize) {
        let page_size = self.page_size as u64;
        (
            PageIndex::new(offset / page_size),
            (offset % page_size) as usize,
        )
    }

    /// Split the byte range `[offset, offset + len)` into page-aligned segments.
    ///
    /// The caller must make sure `offset + len` does not overflow `u64`.
    #[inline]
    pub const fn segments(&self, offset: u64, len: usize) -> PageSegments {
        PageSegments {
            page_size: self.page_size,
            offset,
            buf_offset: 0,
            remaining: len,
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_cache_pages: NonZeroUsize::MIN.saturating_add(DEFAULT_MAX_CACHE_PAGES - 1),
        }
    }
}

/// One page-local piece of a byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSegment {
    /// Page holding this segment.
    pub index: PageIndex,
    /// Offset of the segment within the page.
    pub page_offset: usize,
    /// Offset of the segment within the caller's buffer.
    pub buf_offset: usize,
    /// Segment length in bytes, never zero.
    pub len: usize,
}

impl PageSegment {
    /// Byte range within the page.
    #[inline]
    pub const fn page_range(&self) -> core::ops::Range<usize> {
        self.page_offset..self.page_offset + self.len
    }

    /// Byte range within the caller's buffer.
    #[inline]
    pub const fn buf_range(&self) -> core::ops::Range<usize> {
        self.buf_offset..self.buf_offset + self.len
    }
}

/// Iterator over the [`PageSegment`]s of a byte range, in address order.
#[derive(Debug, Clone)]
pub struct PageSegments {
    page_size: usize,
    offset: u64,
    buf_offset: usize,
    remaining: usize,
}

impl Iterator for PageSegments {
    type Item = PageSegment;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let page_size = self.page_size as u64;
        let index = PageIndex::new(self.offset / page_size);
        let page_offset = (self.offset % page_size) as usize;
        let len = self.remaining.min(self.page_size - page_offset);

        let segment = PageSegment {
            index,
            page_offset,
            buf_offset: self.buf_offset,
            len,
        };

        self.offset += len as u64;
        self.buf_offset += len;
        self.remaining -= len;

        Some(segment)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.remaining == 0 {
            return (0, Some(0));
        }
        let head = self.page_size - (self.offset % self.page_size as u64) as usize;
        let count = if self.remaining <= head {
            1
        } else {
            1 + (self.remaining - head).div_ceil(self.page_size)
        };
        (count, Some(count))
    }
}

impl ExactSizeIterator for PageSegments {}

/// Errors that can occur when creating a PageConfig.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageConfigError {
    /// Page size is zero.
    ZeroPageSize,
    /// Cache capacity is zero.
    ZeroCachePages,
}

impl core::fmt::Display for PageConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ZeroPageSize => write!(f, "Page size cannot be zero"),
            Self::ZeroCachePages => write!(f, "Page cache must hold at least one page"),
        }
    }
}

impl core::error::Error for PageConfigError {}
