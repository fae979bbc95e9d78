//! Domain layer - Pure disk logic with zero infrastructure dependencies.
//!
//! This is the core of the hexagonal architecture. The domain layer contains:
//! - **Entities**: Objects with identity (`Page`)
//! - **Value Objects**: Immutable validated data (`PageIndex`, `PageKey`, `PageConfig`, `DiskGeometry`)
//! - **Domain Services**: `PageCache` and the `PagedDisk` engine
//! - **Ports**: `PageStore` (driven) and `BlockDevice` (driving)
//! - **Domain Errors**: `DiskError`
//!
//! # Hexagonal Architecture
//!
//! ```text
//!     ┌──────────────────────────────────┐
//!     │      Domain Layer (Core)         │
//!     │                                  │
//!     │  ┌────────────────────────────┐  │
//!     │  │  Entities & Value Objects  │  │
//!     │  │  - Page, PageIndex, etc.   │  │
//!     │  └────────────────────────────┘  │
//!     │              ▲                   │
//!     │              │                   │
//!     │  ┌────────────────────────────┐  │
//!     │  │    Domain Services         │  │
//!     │  │    - PagedDisk, PageCache  │  │
//!     │  └────────────────────────────┘  │
//!     │              │                   │
//!     │              ▼                   │
//!     │  ┌────────────────────────────┐  │
//!     │  │    Ports (Interfaces)      │  │
//!     │  │    - PageStore             │  │
//!     │  └────────────────────────────┘  │
//!     └──────────────────────────────────┘
//!                    ▲
//!                    │ implemented by
//!                    │
//!     ┌──────────────────────────────────┐
//!     │      Adapter Layer               │
//!     │  - MemoryPageStore               │
//!     │  - FsPageStore (platform crate)  │
//!     └──────────────────────────────────┘
//! ```
//!
//! # Examples
//!
//! ```ignore
//! use pagedisk::domain::{PageConfig, PagedDisk};
//!
//! let store = MyStore::new();  // Implements PageStore port
//! let disk = PagedDisk::new(store, PageConfig::new(4096, 8)?);
//!
//! disk.write(100, b"hello").await?;
//! assert_eq!(disk.read_to_vec(100, 5).await?, b"hello");
//! ```

pub mod entities;
pub mod value_objects;
pub mod ports;
pub mod error;

mod page_cache;
mod page_locks;
mod paged_disk;

// Re-export commonly used types
pub use entities::Page;
pub use value_objects::{
    DiskGeometry, PageConfig, PageConfigError, PageIndex, PageKey, PageSegment, PageSegments,
    DEFAULT_MAX_CACHE_PAGES, DEFAULT_PAGE_SIZE, SECTOR_SIZE,
};
pub use ports::{BlockDevice, PageStore};
pub use error::DiskError;
pub use page_cache::PageCache;
pub use paged_disk::PagedDisk;
