//! Implementations of embedded_io_async traits for [`DiskStream`].

use crate::{
    domain::PageStore,
    infrastructure::streaming::{DiskStream, StreamError},
};
use embedded_io_async::{ErrorType, Read, Seek, SeekFrom, Write};

impl<S: PageStore> ErrorType for DiskStream<'_, S> {
    type Error = StreamError<S::Error>;
}

impl<S: PageStore> Read for DiskStream<'_, S> {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        DiskStream::read(self, buf).await
    }
}

impl<S: PageStore> Write for DiskStream<'_, S> {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        DiskStream::write(self, buf).await
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<S: PageStore> Seek for DiskStream<'_, S> {
    async fn seek(&mut self, pos: SeekFrom) -> Result<u64, Self::Error> {
        DiskStream::seek(self, pos)
    }
}
