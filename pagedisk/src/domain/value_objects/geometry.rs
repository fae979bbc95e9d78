//! Sector geometry of the exposed block device.

use core::fmt;

/// Sector size of the exposed block device in bytes.
pub const SECTOR_SIZE: usize = 512;

/// Immutable sector layout derived from the disk capacity.
///
/// Trailing bytes that do not fill a whole sector are not addressable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskGeometry {
    total_bytes: u64,
    sector_count: u64,
}

impl DiskGeometry {
    /// Derive the geometry of a disk holding `total_bytes` bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagedisk::domain::DiskGeometry;
    ///
    /// let geometry = DiskGeometry::from_total_bytes(4096 + 100);
    /// assert_eq!(geometry.sector_count(), 8);
    /// ```
    pub const fn from_total_bytes(total_bytes: u64) -> Self {
        Self {
            total_bytes,
            sector_count: total_bytes / SECTOR_SIZE as u64,
        }
    }

    /// Sector size in bytes (always [`SECTOR_SIZE`]).
    #[inline]
    pub const fn sector_size(&self) -> usize {
        SECTOR_SIZE
    }

    /// Number of addressable sectors.
    #[inline]
    pub const fn sector_count(&self) -> u64 {
        self.sector_count
    }

    /// Capacity the geometry was derived from.
    #[inline]
    pub const fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// Addressable size in bytes, `sector_count * sector_size`.
    #[inline]
    pub const fn addressable_bytes(&self) -> u64 {
        self.sector_count * SECTOR_SIZE as u64
    }

    /// Whether sectors `[sector, sector + count)` lie within the device.
    #[inline]
    pub const fn contains(&self, sector: u64, count: u64) -> bool {
        match sector.checked_add(count) {
            Some(end) => end <= self.sector_count,
            None => false,
        }
    }

    /// Byte offset of a sector.
    #[inline]
    pub const fn sector_offset(&self, sector: u64) -> u64 {
        sector * SECTOR_SIZE as u64
    }
}

impl fmt::Display for DiskGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} sectors x {} bytes", self.sector_count, SECTOR_SIZE)
    }
}
