//! Byte stream over a window of a paged disk.

use crate::domain::{PageStore, PagedDisk};
use crate::infrastructure::streaming::StreamError;
use embedded_io_async::SeekFrom;

/// Cursor over the first `len` bytes of a [`PagedDisk`].
///
/// Reads stop at `len`; writes past it fail with
/// [`StreamError::OutOfBounds`]. Every write is persisted before it returns,
/// so `flush` has nothing to do.
///
/// # Examples
///
/// ```ignore
/// use embedded_io_async::{Read, Seek, SeekFrom, Write};
/// use pagedisk::DiskStream;
///
/// let mut stream = DiskStream::new(&disk, 8 * 1024 * 1024);
/// stream.write_all(&image_header).await?;
/// stream.seek(SeekFrom::Start(0)).await?;
/// stream.read_exact(&mut buffer).await?;
/// ```
pub struct DiskStream<'a, S: PageStore> {
    disk: &'a PagedDisk<S>,
    len: u64,
    position: u64,
}

impl<'a, S: PageStore> DiskStream<'a, S> {
    /// Create a stream over bytes `[0, len)` of `disk`, positioned at 0.
    pub fn new(disk: &'a PagedDisk<S>, len: u64) -> Self {
        Self {
            disk,
            len,
            position: 0,
        }
    }

    /// Get the current position in the stream.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Length of the stream in bytes.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Whether the stream has zero length.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes between the position and the end, zero past the end.
    fn remaining(&self) -> u64 {
        self.len.saturating_sub(self.position)
    }

    /// Read up to `buf.len()` bytes; returns 0 at the end of the stream.
    ///
    /// Note: This method is internal. Users should use the `embedded_io_async::Read` trait.
    pub(crate) async fn read(&mut self, buf: &mut [u8]) -> Result<usize, StreamError<S::Error>> {
        let to_read = (buf.len() as u64).min(self.remaining()) as usize;
        if to_read == 0 {
            return Ok(0);
        }

        self.disk.read(self.position, &mut buf[..to_read]).await?;
        self.position += to_read as u64;
        Ok(to_read)
    }

    /// Write as much of `buf` as fits before the end of the stream.
    ///
    /// Note: This method is internal. Users should use the `embedded_io_async::Write` trait.
    pub(crate) async fn write(&mut self, buf: &[u8]) -> Result<usize, StreamError<S::Error>> {
        if buf.is_empty() {
            return Ok(0);
        }

        let to_write = (buf.len() as u64).min(self.remaining()) as usize;
        if to_write == 0 {
            return Err(StreamError::OutOfBounds);
        }

        self.disk.write(self.position, &buf[..to_write]).await?;
        self.position += to_write as u64;
        Ok(to_write)
    }

    /// Move the cursor. Positions past the end are allowed; reads there return 0.
    ///
    /// Note: This method is internal. Users should use the `embedded_io_async::Seek` trait.
    pub(crate) fn seek(&mut self, pos: SeekFrom) -> Result<u64, StreamError<S::Error>> {
        let new_pos = match pos {
            SeekFrom::Start(offset) => Some(offset),
            SeekFrom::Current(delta) => self.position.checked_add_signed(delta),
            SeekFrom::End(delta) => self.len.checked_add_signed(delta),
        };

        self.position = new_pos.ok_or(StreamError::InvalidSeek)?;
        Ok(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryPageStore;
    use crate::domain::PageConfig;

    fn disk() -> PagedDisk<MemoryPageStore> {
        PagedDisk::new(MemoryPageStore::new(), PageConfig::new(64, 2).unwrap())
    }

    #[tokio::test]
    async fn test_stream_write_then_read() {
        let disk = disk();
        let mut stream = DiskStream::new(&disk, 1024);

        assert_eq!(stream.write(&[7u8; 100]).await.unwrap(), 100);
        assert_eq!(stream.position(), 100);

        stream.seek(SeekFrom::Start(50)).unwrap();
        let mut buf = [0u8; 60];
        assert_eq!(stream.read(&mut buf).await.unwrap(), 60);
        assert_eq!(&buf[..50], &[7u8; 50][..]);
        assert_eq!(&buf[50..], &[0u8; 10][..]);
    }

    #[tokio::test]
    async fn test_stream_is_bounded() {
        let disk = disk();
        let mut stream = DiskStream::new(&disk, 100);

        stream.seek(SeekFrom::End(-10)).unwrap();
        assert_eq!(stream.write(&[1u8; 20]).await.unwrap(), 10);
        assert!(matches!(
            stream.write(&[1u8; 1]).await,
            Err(StreamError::OutOfBounds)
        ));

        let mut buf = [0u8; 8];
        assert_eq!(stream.read(&mut buf).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_stream_invalid_seek() {
        let disk = disk();
        let mut stream = DiskStream::new(&disk, 100);

        assert!(matches!(
            stream.seek(SeekFrom::Current(-1)),
            Err(StreamError::InvalidSeek)
        ));
        assert_eq!(stream.position(), 0);
        assert_eq!(stream.seek(SeekFrom::Current(30)).unwrap(), 30);
        assert_eq!(stream.seek(SeekFrom::Current(-5)).unwrap(), 25);
    }
}
