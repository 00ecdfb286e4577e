//! Backing sources for root buffers.
//!
//! A [`BackingSource`] provides bytes at arbitrary absolute offsets. Root
//! buffers own their source and only ever call [`BackingSource::read_exact_at`]
//! to fill a window, or borrow [`BackingSource::resident`] when the whole
//! source already lives in memory.

mod array;
mod file;
mod wrapped;

pub use array::ArraySource;
pub use file::{FileSource, MappedFile};
pub use wrapped::WrappedSource;

use std::io;

/// A random-access provider of bytes.
pub trait BackingSource {
    /// Total number of addressable bytes.
    fn len(&self) -> u64;

    /// Determines if the source is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fills `buf` with the bytes starting at `offset`.
    ///
    /// Fails if fewer than `buf.len()` bytes are available there.
    fn read_exact_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<()>;

    /// The whole contents, if they are already in memory.
    fn resident(&self) -> Option<&[u8]> {
        None
    }
}

/// Copies `buf.len()` bytes at `offset` out of an in-memory slice.
pub(crate) fn read_exact_from_slice(data: &[u8], offset: u64, buf: &mut [u8]) -> io::Result<()> {
    let start = usize::try_from(offset)
        .map_err(|_| io::Error::new(io::ErrorKind::UnexpectedEof, "offset is beyond input"))?;
    let src = start
        .checked_add(buf.len())
        .and_then(|end| data.get(start..end))
        .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "read is beyond input"))?;
    buf.copy_from_slice(src);
    Ok(())
}
