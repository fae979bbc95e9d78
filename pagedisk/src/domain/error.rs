//! Errors surfaced by the paged disk and its sector device.
//!
//! Store failures carry the page store's own error type; everything else is
//! a violation detected before (or instead of) touching the store.

use crate::domain::value_objects::{PageConfigError, PageIndex};
use core::fmt;

/// Errors that can occur while reading or writing the disk.
#[derive(Debug)]
#[non_exhaustive]
pub enum DiskError<E> {
    /// The page store could not be opened.
    ///
    /// Every operation re-attempts the open, so a later call may succeed.
    StoreUnavailable(E),

    /// A get or put against the page store failed.
    ///
    /// For writes, the failing page must be assumed not persisted.
    Store(E),

    /// A sector request falls outside the device.
    ///
    /// Rejected before any page is touched.
    OutOfRange {
        /// First requested sector.
        sector: u64,
        /// Number of requested sectors.
        count: u64,
        /// Number of sectors on the device.
        sector_count: u64,
    },

    /// Invalid page configuration.
    InvalidConfig(PageConfigError),

    /// The page store returned a buffer that is not exactly one page long.
    PageLength {
        /// Page that was fetched.
        index: PageIndex,
        /// Configured page size.
        expected: usize,
        /// Length of the stored buffer.
        actual: usize,
    },

    /// The caller's buffer cannot hold the requested sectors.
    BufferTooSmall {
        /// Bytes needed.
        required: usize,
        /// Bytes provided.
        actual: usize,
    },

    /// The byte range ends beyond `u64::MAX`.
    AddressOverflow {
        /// Start of the range.
        offset: u64,
        /// Length of the range.
        len: usize,
    },
}

impl<E> DiskError<E> {
    /// Whether the error came from the page store.
    pub const fn is_store_error(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_) | Self::Store(_))
    }
}

impl<E: fmt::Display> fmt::Display for DiskError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StoreUnavailable(e) => write!(f, "Page store unavailable: {}", e),
            Self::Store(e) => write!(f, "Page store error: {}", e),
            Self::OutOfRange {
                sector,
                count,
                sector_count,
            } => write!(
                f,
                "Sectors {}..+{} out of range (device has {} sectors)",
                sector, count, sector_count
            ),
            Self::InvalidConfig(e) => write!(f, "Invalid page configuration: {}", e),
            Self::PageLength {
                index,
                expected,
                actual,
            } => write!(
                f,
                "{} has {} bytes in the store, expected {}",
                index, actual, expected
            ),
            Self::BufferTooSmall { required, actual } => write!(
                f,
                "Buffer of {} bytes cannot hold {} bytes",
                actual, required
            ),
            Self::AddressOverflow { offset, len } => write!(
                f,
                "Range of {} bytes at offset {} overflows the address space",
                len, offset
            ),
        }
    }
}

impl<E: core::error::Error + 'static> core::error::Error for DiskError<E> {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::StoreUnavailable(e) | Self::Store(e) => Some(e),
            Self::InvalidConfig(e) => Some(e),
            _ => None,
        }
    }
}

impl<E> From<PageConfigError> for DiskError<E> {
    fn from(err: PageConfigError) -> Self {
        Self::InvalidConfig(err)
    }
}
