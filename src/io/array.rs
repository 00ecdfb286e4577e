//! Owned in-memory byte arrays.

use std::io;

use bytes::Bytes;

use super::{read_exact_from_slice, BackingSource};

/// A fixed, fully in-memory byte sequence.
///
/// Backed by [`Bytes`] so the contents can be handed out again without a
/// copy.
#[derive(Debug, Clone)]
pub struct ArraySource {
    data: Bytes,
}

impl ArraySource {
    /// Takes ownership of the given bytes.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    /// A cheap, reference-counted handle to `len` bytes at `offset`.
    pub fn slice(&self, offset: usize, len: usize) -> Option<Bytes> {
        let end = offset.checked_add(len)?;
        (end <= self.data.len()).then(|| self.data.slice(offset..end))
    }

    /// The full contents.
    pub fn bytes(&self) -> &Bytes {
        &self.data
    }
}

impl BackingSource for ArraySource {
    fn len(&self) -> u64 {
        self.data.len() as u64
    }

    fn read_exact_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<()> {
        read_exact_from_slice(&self.data, offset, buf)
    }

    fn resident(&self) -> Option<&[u8]> {
        Some(&self.data)
    }
}
