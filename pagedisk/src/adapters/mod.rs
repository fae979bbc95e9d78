//! Adapter layer - Concrete implementations connecting domain to infrastructure.
//!
//! This layer contains adapters that implement the domain's ports, connecting
//! the paged disk to its consumers (emulated disk controllers) and to the
//! stores it persists into.
//!
//! # Hexagonal Architecture
//!
//! ```text
//!     ┌──────────────────────────────────┐
//!     │  Emulator (external collaborator)│
//!     └────────────┬─────────────────────┘
//!                  │ BlockDevice<512>
//!                  ▼
//!     ┌──────────────────────────────────┐
//!     │      Adapter Layer               │  ◄── This module
//!     │  - SectorDevice                  │
//!     └────────────┬─────────────────────┘
//!                  │
//!                  ▼
//!     ┌──────────────────────────────────┐
//!     │      Domain Layer                │
//!     │  - PagedDisk, PageCache          │
//!     │  - PageStore (port)              │
//!     └────────────┬─────────────────────┘
//!                  │ implemented by
//!                  ▼
//!     ┌──────────────────────────────────┐
//!     │  MemoryPageStore / FsPageStore   │
//!     └──────────────────────────────────┘
//! ```
//!
//! # Available Adapters
//!
//! - **`SectorDevice`**: Exposes a `PagedDisk` as a 512-byte sector device
//! - **`MemoryPageStore`**: Volatile `PageStore` for tests and scratch disks

mod memory_store;
mod sector_device;

pub use memory_store::MemoryPageStore;
pub use sector_device::SectorDevice;
