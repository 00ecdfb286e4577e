//! Caller-supplied byte regions.

use std::io;

use super::{read_exact_from_slice, BackingSource};

/// Wraps a pre-existing byte region owned elsewhere in the system.
///
/// Anything that can lend a `&[u8]` works: a borrowed slice, a
/// [`bytes::Bytes`], an `Arc<[u8]>`, or a memory map.
#[derive(Debug, Clone)]
pub struct WrappedSource<T> {
    inner: T,
}

impl<T: AsRef<[u8]>> WrappedSource<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: AsRef<[u8]>> BackingSource for WrappedSource<T> {
    fn len(&self) -> u64 {
        self.inner.as_ref().len() as u64
    }

    fn read_exact_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<()> {
        read_exact_from_slice(self.inner.as_ref(), offset, buf)
    }

    fn resident(&self) -> Option<&[u8]> {
        Some(self.inner.as_ref())
    }
}
