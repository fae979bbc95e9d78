//! Infrastructure layer - high-level I/O utilities built on the domain.
//!
//! This module provides a streaming view of the paged disk, adding async
//! Read/Write/Seek capabilities for host-side tooling such as importing or
//! exporting raw disk images.

pub mod streaming;
