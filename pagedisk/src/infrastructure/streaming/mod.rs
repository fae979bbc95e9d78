//! Streaming access to a paged disk.
//!
//! [`DiskStream`] implements the `embedded_io_async` Read/Write/Seek traits over
//! a byte-bounded window of a [`PagedDisk`](crate::domain::PagedDisk).

mod disk_stream;
mod embedded_io_impl;

pub use disk_stream::DiskStream;

use crate::domain::DiskError;
use core::fmt;

/// Unified I/O error type for streaming operations.
#[derive(Debug)]
pub enum StreamError<E> {
    /// Error from the underlying disk.
    Disk(DiskError<E>),
    /// I/O operation would exceed the stream length.
    OutOfBounds,
    /// Invalid seek position.
    InvalidSeek,
}

impl<E: fmt::Display> fmt::Display for StreamError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disk(e) => write!(f, "Disk error: {}", e),
            Self::OutOfBounds => write!(f, "Operation would exceed stream bounds"),
            Self::InvalidSeek => write!(f, "Invalid seek position"),
        }
    }
}

impl<E: core::error::Error + 'static> core::error::Error for StreamError<E> {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Disk(e) => Some(e),
            _ => None,
        }
    }
}

// Implement embedded_io_async::Error so streams plug into embedded_io_async consumers
impl<E: core::error::Error + 'static> embedded_io_async::Error for StreamError<E> {
    fn kind(&self) -> embedded_io_async::ErrorKind {
        match self {
            Self::Disk(_) => embedded_io_async::ErrorKind::Other,
            Self::OutOfBounds => embedded_io_async::ErrorKind::InvalidInput,
            Self::InvalidSeek => embedded_io_async::ErrorKind::InvalidInput,
        }
    }
}

impl<E> From<DiskError<E>> for StreamError<E> {
    fn from(err: DiskError<E>) -> Self {
        Self::Disk(err)
    }
}
