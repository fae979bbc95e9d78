//! Domain entities for the paged disk.
//!
//! Entities are objects that have identity and lifecycle. In this domain,
//! the primary entity is a `Page`, a full-size buffer materialized from the
//! page store (or zero-filled when the store has never seen it).

mod page;

pub use page::Page;
