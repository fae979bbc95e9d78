//! Platform page stores for pagedisk.
//!
//! Provides [`FsPageStore`], a [`PageStore`](pagedisk::PageStore) keeping one
//! file per page under a directory on the host filesystem. It works on every
//! platform tokio's filesystem API supports (Windows, Linux, macOS).
//!
//! # Example
//!
//! ```ignore
//! use pagedisk::PagedDisk;
//! use pagedisk_platform::{FsPageStore, FsStoreConfig};
//!
//! let store = FsPageStore::open(FsStoreConfig::new("/var/lib/vm")).await?;
//! let device = PagedDisk::with_default_config(store).into_block_device(8 << 30);
//! ```

#![warn(missing_docs)]

mod fs_store;

pub use fs_store::{DEFAULT_DB_NAME, DEFAULT_STORE_NAME, FsPageStore, FsStoreConfig};

// Re-export the core crate for convenience
pub use pagedisk;
