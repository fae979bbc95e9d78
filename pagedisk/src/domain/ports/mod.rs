//! Ports define the interfaces between the domain and the outside world.
//!
//! In hexagonal architecture, ports are the boundaries of the application:
//! - **Primary (Driving) Ports**: What the domain exposes to the outside world
//! - **Secondary (Driven) Ports**: What the domain needs from the outside world
//!
//! `BlockDevice` is the primary port handed to emulators; `PageStore` is the
//! secondary port the paged disk persists through.

mod block_device;
mod page_store;

pub use block_device::BlockDevice;
pub use page_store::PageStore;
