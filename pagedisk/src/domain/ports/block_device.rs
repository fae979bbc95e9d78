//! BlockDevice port - Primary (driving) port offered to emulators.
//!
//! Emulated disk controllers address storage in fixed-size sectors. This
//! trait is the only surface they are given; byte-level access to the paged
//! disk stays inside the crate's adapters.

use aligned::{Aligned, Alignment};
use core::fmt::Debug;

/// Sector-addressable storage with `SIZE`-byte blocks.
///
/// Both reads and writes take `&self` so a device can be shared between
/// concurrently running requests; implementations serialize internally
/// where they must.
#[allow(async_fn_in_trait)]
pub trait BlockDevice<const SIZE: usize> {
    /// The error type for device operations.
    type Error: Debug;

    /// Required alignment of block buffers.
    type Align: Alignment;

    /// Read `data.len()` blocks starting at `block_address`.
    async fn read(
        &self,
        block_address: u64,
        data: &mut [Aligned<Self::Align, [u8; SIZE]>],
    ) -> Result<(), Self::Error>;

    /// Write `data.len()` blocks starting at `block_address`.
    async fn write(
        &self,
        block_address: u64,
        data: &[Aligned<Self::Align, [u8; SIZE]>],
    ) -> Result<(), Self::Error>;

    /// Size of the device in bytes.
    async fn size(&self) -> Result<u64, Self::Error>;

    /// Make previous writes durable. The default implementation is a no-op.
    async fn sync(&self) -> Result<(), Self::Error> {
        Ok(())
    }
}
