//! Adapter exposing a `PagedDisk` as a 512-byte sector device.
//!
//! This is the surface handed to emulated disk controllers. It enforces the
//! device size and translates sector numbers into byte ranges; the paged disk
//! behind it is never reachable from the outside.

use crate::domain::{
    BlockDevice, DiskError, DiskGeometry, PageStore, PagedDisk, SECTOR_SIZE,
};
use crate::log_macros::warning;
use aligned::{A4, Aligned};
use alloc::vec::Vec;

/// Sector-addressed view of a [`PagedDisk`].
///
/// # Type Parameters
///
/// - `S`: The page store backing the disk
///
/// # Examples
///
/// ```ignore
/// use pagedisk::{MemoryPageStore, PagedDisk, SectorDevice};
///
/// let disk = PagedDisk::with_default_config(MemoryPageStore::new());
/// let device = disk.into_block_device(8 * 1024 * 1024 * 1024);
///
/// let mut boot_sector = [0u8; 512];
/// device.read_sectors(0, 1, &mut boot_sector).await?;
/// ```
pub struct SectorDevice<S: PageStore> {
    disk: PagedDisk<S>,
    geometry: DiskGeometry,
}

impl<S: PageStore> PagedDisk<S> {
    /// Wrap the disk as a sector device of `total_bytes` capacity.
    pub fn into_block_device(self, total_bytes: u64) -> SectorDevice<S> {
        SectorDevice::new(self, total_bytes)
    }
}

impl<S: PageStore> SectorDevice<S> {
    /// Create a device exposing the first `total_bytes` bytes of `disk`.
    ///
    /// The sector count is `total_bytes / 512`; a trailing partial sector is
    /// not addressable.
    pub fn new(disk: PagedDisk<S>, total_bytes: u64) -> Self {
        Self {
            disk,
            geometry: DiskGeometry::from_total_bytes(total_bytes),
        }
    }

    /// Get the device geometry.
    pub const fn geometry(&self) -> DiskGeometry {
        self.geometry
    }

    /// Sector size in bytes (512).
    pub const fn sector_size(&self) -> usize {
        self.geometry.sector_size()
    }

    /// Number of addressable sectors.
    pub const fn sector_count(&self) -> u64 {
        self.geometry.sector_count()
    }

    /// Consume the device and return the underlying disk.
    pub fn into_inner(self) -> PagedDisk<S> {
        self.disk
    }

    /// Read `count` sectors starting at `sector` into the front of `buf`.
    ///
    /// # Errors
    ///
    /// Returns [`DiskError::OutOfRange`] if `sector + count` exceeds the sector
    /// count, and [`DiskError::BufferTooSmall`] if `buf` is shorter than
    /// `count * 512` bytes; neither touches the store. Store failures are
    /// passed through.
    pub async fn read_sectors(
        &self,
        sector: u64,
        count: u64,
        buf: &mut [u8],
    ) -> Result<(), DiskError<S::Error>> {
        let len = self.check_request(sector, count, buf.len())?;
        self.disk
            .read(self.geometry.sector_offset(sector), &mut buf[..len])
            .await
    }

    /// Write `count` sectors starting at `sector` from the front of `buf`.
    ///
    /// Returns once every touched page is persisted.
    ///
    /// # Errors
    ///
    /// Same as [`read_sectors`](Self::read_sectors).
    pub async fn write_sectors(
        &self,
        sector: u64,
        count: u64,
        buf: &[u8],
    ) -> Result<(), DiskError<S::Error>> {
        let len = self.check_request(sector, count, buf.len())?;
        self.disk
            .write(self.geometry.sector_offset(sector), &buf[..len])
            .await
    }

    /// Validate a request and return its length in bytes.
    fn check_request(
        &self,
        sector: u64,
        count: u64,
        buf_len: usize,
    ) -> Result<usize, DiskError<S::Error>> {
        if !self.geometry.contains(sector, count) {
            warning!(
                "Rejected sectors {}..+{} on a {}-sector device",
                sector,
                count,
                self.geometry.sector_count()
            );
            return Err(DiskError::OutOfRange {
                sector,
                count,
                sector_count: self.geometry.sector_count(),
            });
        }

        let required = usize::try_from(count)
            .ok()
            .and_then(|count| count.checked_mul(SECTOR_SIZE))
            .ok_or(DiskError::BufferTooSmall {
                required: usize::MAX,
                actual: buf_len,
            })?;

        if buf_len < required {
            return Err(DiskError::BufferTooSmall {
                required,
                actual: buf_len,
            });
        }

        Ok(required)
    }
}

impl<S: PageStore> BlockDevice<SECTOR_SIZE> for SectorDevice<S> {
    type Error = DiskError<S::Error>;
    type Align = A4;

    async fn read(
        &self,
        block_address: u64,
        data: &mut [Aligned<Self::Align, [u8; SECTOR_SIZE]>],
    ) -> Result<(), Self::Error> {
        let mut staging = alloc::vec![0u8; data.len() * SECTOR_SIZE];
        self.read_sectors(block_address, data.len() as u64, &mut staging)
            .await?;

        for (block, chunk) in data.iter_mut().zip(staging.chunks_exact(SECTOR_SIZE)) {
            block.copy_from_slice(chunk);
        }
        Ok(())
    }

    async fn write(
        &self,
        block_address: u64,
        data: &[Aligned<Self::Align, [u8; SECTOR_SIZE]>],
    ) -> Result<(), Self::Error> {
        let mut staging = Vec::with_capacity(data.len() * SECTOR_SIZE);
        for block in data {
            staging.extend_from_slice(&block[..]);
        }
        self.write_sectors(block_address, data.len() as u64, &staging)
            .await
    }

    async fn size(&self) -> Result<u64, Self::Error> {
        Ok(self.geometry.addressable_bytes())
    }

    async fn sync(&self) -> Result<(), Self::Error> {
        // Writes are persisted before they return
        Ok(())
    }
}
