//! Type-safe page index and page store key value objects.

use alloc::string::String;
use core::fmt;

/// Index of a page within the disk's address space.
///
/// Page `n` covers bytes `[n * page_size, (n + 1) * page_size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageIndex(u64);

impl PageIndex {
    /// Create a new page index.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagedisk::domain::PageIndex;
    ///
    /// let page = PageIndex::new(3);
    /// assert_eq!(page.value(), 3);
    /// ```
    #[inline]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the underlying u64 value.
    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// The key this page is stored under in a [`PageStore`](crate::domain::PageStore).
    #[inline]
    pub fn key(self) -> PageKey {
        PageKey::from(self)
    }
}

impl fmt::Display for PageIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page({})", self.0)
    }
}

impl From<u64> for PageIndex {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl From<PageIndex> for u64 {
    fn from(page: PageIndex) -> Self {
        page.value()
    }
}

/// String key of a page in the page store, `"page:<index>"`.
///
/// Derived deterministically from a [`PageIndex`]; stores treat it as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageKey {
    index: PageIndex,
    key: String,
}

impl PageKey {
    /// Prefix shared by every page key.
    pub const PREFIX: &'static str = "page:";

    /// The page this key refers to.
    #[inline]
    pub const fn index(&self) -> PageIndex {
        self.index
    }

    /// The key as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// Parse a key produced by [`PageIndex::key`].
    ///
    /// Returns `None` for strings that are not page keys.
    pub fn parse(key: &str) -> Option<Self> {
        let digits = key.strip_prefix(Self::PREFIX)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let index = digits.parse::<u64>().ok()?;
        Some(Self::from(PageIndex::new(index)))
    }
}

impl From<PageIndex> for PageKey {
    fn from(index: PageIndex) -> Self {
        Self {
            index,
            key: alloc::format!("{}{}", Self::PREFIX, index.value()),
        }
    }
}

impl AsRef<str> for PageKey {
    fn as_ref(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}
