//! Root buffers: stream buffers that own their backing source.

use std::fmt;
use std::fs::File;
use std::path::Path;

use bytes::Bytes;
use tracing::debug;

use super::window::{Pager, WindowStats};
use super::{Cursor, StreamBuffer, Subsection};
use crate::config::BufferConfig;
use crate::endian::ByteOrder;
use crate::error::{BufferError, Result};
use crate::io::{ArraySource, BackingSource, FileSource, MappedFile, WrappedSource};

/// A stream buffer directly backed by an array, a wrapped buffer, or a file.
///
/// The buffer owns its source; dropping it releases the source (closing the
/// file handle for file-backed buffers). Reads go through a single window
/// of at most [`BufferConfig::window_size`] bytes for sources that are not
/// already in memory.
///
/// Not `Sync`: reads mutate the window in place.
pub struct RootBuffer<S> {
    pager: Pager<S>,
    cursor: Cursor,
    order: ByteOrder,
}

impl<S: BackingSource> RootBuffer<S> {
    /// Wraps `source` with the default configuration.
    pub fn new(source: S, order: ByteOrder) -> Self {
        Self::build(source, order, &BufferConfig::default())
    }

    /// Wraps `source` with a custom window configuration.
    pub fn with_config(source: S, order: ByteOrder, config: &BufferConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(source, order, config))
    }

    fn build(source: S, order: ByteOrder, config: &BufferConfig) -> Self {
        let capacity = source.len();
        let pager = Pager::new(source, config);

        debug!(
            capacity,
            order = ?order,
            windowed = pager.is_windowed(),
            window_size = config.window_size,
            "Created root buffer"
        );

        Self {
            pager,
            cursor: Cursor::new(capacity),
            order,
        }
    }

    /// The backing source.
    pub fn source(&self) -> &S {
        self.pager.source()
    }

    /// Releases the buffer, returning its source.
    pub fn into_source(self) -> S {
        self.pager.into_source()
    }

    /// Window usage so far. All zero for unwindowed in-memory sources.
    pub fn window_stats(&self) -> WindowStats {
        self.pager.stats()
    }

    /// Bytes this buffer keeps in memory for its source.
    ///
    /// For windowed sources this is the window allocation, independent of the
    /// source size.
    pub fn resident_bytes(&self) -> usize {
        self.pager.resident_bytes()
    }

    /// A view of the whole buffer, positioned at the current cursor.
    ///
    /// Views carved out of the walker with [`Subsection::subsection`] borrow
    /// this root rather than the walker, so the walker can keep reading
    /// while they are alive.
    pub fn view(&self) -> Subsection<'_> {
        Subsection::with_position(
            &self.pager,
            0,
            self.cursor.capacity(),
            self.cursor.position(),
            self.order,
        )
    }
}

impl RootBuffer<ArraySource> {
    /// Creates a buffer over an owned in-memory array.
    pub fn open_over_array(bytes: impl Into<Bytes>, order: ByteOrder) -> Self {
        Self::new(ArraySource::new(bytes), order)
    }

    pub fn open_over_array_with_config(
        bytes: impl Into<Bytes>,
        order: ByteOrder,
        config: &BufferConfig,
    ) -> Result<Self> {
        Self::with_config(ArraySource::new(bytes), order, config)
    }

    /// Returns the next `len` bytes as a shared handle into the array,
    /// without copying them.
    pub fn get_bytes(&mut self, len: usize) -> Result<Bytes> {
        let at = self.cursor.claim(len as u64)?;
        let bytes = self
            .source()
            .slice(at as usize, len)
            .ok_or(BufferError::Underflow {
                needed: len as u64,
                remaining: self.remaining(),
            })?;
        self.cursor.seek(at + len as u64)?;
        Ok(bytes)
    }
}

impl<T: AsRef<[u8]>> RootBuffer<WrappedSource<T>> {
    /// Creates a buffer over a pre-existing memory region.
    pub fn open_over_buffer(existing: T, order: ByteOrder) -> Self {
        Self::new(WrappedSource::new(existing), order)
    }

    pub fn open_over_buffer_with_config(
        existing: T,
        order: ByteOrder,
        config: &BufferConfig,
    ) -> Result<Self> {
        Self::with_config(WrappedSource::new(existing), order, config)
    }
}

impl RootBuffer<WrappedSource<MappedFile>> {
    /// Memory-maps the file at `path` and wraps the mapping.
    pub fn map_path<P: AsRef<Path>>(path: P, order: ByteOrder) -> Result<Self> {
        Ok(Self::open_over_buffer(MappedFile::open(path)?, order))
    }
}

impl RootBuffer<FileSource> {
    /// Creates a buffer over an open file, taking ownership of the handle.
    ///
    /// The capacity is the file's length at this point.
    pub fn open_over_file(file: File, order: ByteOrder) -> Result<Self> {
        Ok(Self::new(FileSource::new(file)?, order))
    }

    pub fn open_over_file_with_config(
        file: File,
        order: ByteOrder,
        config: &BufferConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(FileSource::new(file)?, order, config))
    }

    /// Opens the file at `path` and creates a buffer over it.
    pub fn open_path<P: AsRef<Path>>(path: P, order: ByteOrder) -> Result<Self> {
        Ok(Self::new(FileSource::open(path)?, order))
    }
}

impl<S: BackingSource> StreamBuffer for RootBuffer<S> {
    fn capacity(&self) -> u64 {
        self.cursor.capacity()
    }

    fn position(&self) -> u64 {
        self.cursor.position()
    }

    fn set_position(&mut self, position: u64) -> Result<()> {
        self.cursor.seek(position)
    }

    fn byte_order(&self) -> ByteOrder {
        self.order
    }

    fn get(&mut self, dst: &mut [u8]) -> Result<()> {
        self.cursor.read(&self.pager, 0, dst)
    }

    fn wrap_subsection(&self, len: u64) -> Result<Subsection<'_>> {
        let base = self.cursor.claim(len)?;
        Ok(Subsection::new(&self.pager, base, len, self.order))
    }
}

impl<S> fmt::Debug for RootBuffer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RootBuffer")
            .field("capacity", &self.cursor.capacity())
            .field("position", &self.cursor.position())
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}
