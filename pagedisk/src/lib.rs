//! Sparse paged virtual disk over an async key-value page store.
//!
//! This crate presents a large, mostly empty disk as a flat byte address space
//! split into fixed-size pages. Pages are persisted one value per key in a
//! [`PageStore`]; pages never written read back as zeros and occupy no space.
//!
//! # Architecture
//!
//! The crate is organized into three layers:
//!
//! ## Domain Layer (`domain`)
//! Pure disk logic with no infrastructure dependencies:
//! - **Entities**: `Page`
//! - **Value Objects**: `PageIndex`, `PageKey`, `PageConfig`, `DiskGeometry`
//! - **Services**: `PagedDisk` engine and the FIFO `PageCache`
//! - **Ports**: `PageStore` and `BlockDevice` interfaces
//!
//! ## Adapter Layer (`adapters`)
//! Concrete implementations connecting domain to infrastructure:
//! - **`MemoryPageStore`**: In-memory `PageStore`
//! - **`SectorDevice`**: 512-byte sector view implementing `BlockDevice`
//!
//! ## Infrastructure Layer (`infrastructure`)
//! High-level utilities built on the domain:
//! - **`DiskStream`**: `embedded_io_async` Read/Write/Seek over a disk window
//!
//! # Quick Start
//!
//! ```ignore
//! use pagedisk::{MemoryPageStore, PagedDisk};
//!
//! let disk = PagedDisk::with_default_config(MemoryPageStore::new());
//! let device = disk.into_block_device(8 * 1024 * 1024 * 1024);
//!
//! device.write_sectors(0, 1, &boot_sector).await?;
//!
//! let mut sector = [0u8; 512];
//! device.read_sectors(0, 1, &mut sector).await?;
//! ```
//!
//! # Features
//!
//! - `std`: Enable standard library features
//! - `log`: Enable logging support

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![allow(async_fn_in_trait)]

extern crate alloc;

mod log_macros;

// Core layers
pub mod domain;
pub mod adapters;
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::{
    BlockDevice, DiskError, DiskGeometry, Page, PageCache, PageConfig, PageConfigError, PageIndex,
    PageKey, PageStore, PagedDisk, DEFAULT_MAX_CACHE_PAGES, DEFAULT_PAGE_SIZE, SECTOR_SIZE,
};
pub use adapters::{MemoryPageStore, SectorDevice};
pub use infrastructure::streaming::{DiskStream, StreamError};

// Re-export embedded-io-async for convenience
pub use embedded_io_async;
