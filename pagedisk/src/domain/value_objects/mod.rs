//! Value objects for the domain layer.
//!
//! Value objects are immutable, validated data types that represent
//! concepts in the domain model. They provide type safety and encapsulate
//! validation logic.

mod page_index;
mod page_config;
mod geometry;

pub use page_index::{PageIndex, PageKey};
pub use page_config::{
    PageConfig, PageConfigError, PageSegment, PageSegments, DEFAULT_MAX_CACHE_PAGES,
    DEFAULT_PAGE_SIZE,
};
pub use geometry::{DiskGeometry, SECTOR_SIZE};
