//! Adapts stream buffers to the standard I/O traits.
//!
//! Lets code written against `std::io::Read` (decompressors, generic
//! parsers) consume a root buffer or subsection without copying it out.

use std::io::{self, Read, Seek, SeekFrom};

use super::StreamBuffer;

/// A [`Read`] + [`Seek`] view of a stream buffer.
///
/// Reads are short only at the end of the buffer; seeking moves the buffer's
/// own cursor.
#[derive(Debug)]
pub struct StreamReader<B> {
    inner: B,
}

impl<B: StreamBuffer> StreamReader<B> {
    pub fn new(inner: B) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &B {
        &self.inner
    }

    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<B: StreamBuffer> Read for StreamReader<B> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = usize::try_from(self.inner.remaining()).map_or(buf.len(), |r| r.min(buf.len()));
        self.inner.get(&mut buf[..n])?;
        Ok(n)
    }
}

impl<B: StreamBuffer> Seek for StreamReader<B> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(p) => Some(p),
            SeekFrom::End(delta) => self.inner.capacity().checked_add_signed(delta),
            SeekFrom::Current(delta) => self.inner.position().checked_add_signed(delta),
        }
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "seek to a negative or overflowing position",
            )
        })?;

        self.inner.set_position(target)?;
        Ok(target)
    }
}
