//! File-backed sources.

use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;

use memmap2::Mmap;
use positioned_io::{RandomAccessFile, ReadAt as _};
use tracing::debug;

use super::BackingSource;

/// A random-access file handle, owned for the lifetime of the source.
///
/// The length is taken once when the source is created. Reads past the
/// current end of a file that shrank afterwards fail with an I/O error.
pub struct FileSource {
    file: RandomAccessFile,
    len: u64,
}

impl FileSource {
    /// Takes ownership of an open file.
    pub fn new(file: File) -> io::Result<Self> {
        let len = file.metadata()?.len();
        // On error the handle is dropped (and closed) here.
        let file = RandomAccessFile::try_new(file)?;
        Ok(Self { file, len })
    }

    /// Opens the file at `path` for reading.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let source = Self::new(File::open(path)?)?;
        debug!(
            path = %path.display(),
            size = source.len,
            "Opened file source"
        );
        Ok(source)
    }
}

impl fmt::Debug for FileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSource")
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

impl BackingSource for FileSource {
    fn len(&self) -> u64 {
        self.len
    }

    fn read_exact_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<()> {
        self.file.read_exact_at(offset, buf)
    }
}

/// A read-only memory map of a whole file.
///
/// Meant to be wrapped in a [`super::WrappedSource`]; the mapping is served
/// like any other pre-existing memory region.
#[derive(Debug)]
pub struct MappedFile {
    // None when the file size is zero; memmap cannot map empty files.
    map: Option<Mmap>,
}

impl MappedFile {
    /// Maps the file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let size = file.metadata()?.len();

        let map = if size == 0 {
            None
        } else {
            // Safety: the map is read-only. Callers must not truncate the file
            // while the map is alive.
            Some(unsafe { Mmap::map(&file)? })
        };

        debug!(path = %path.display(), size, "Mapped file");
        Ok(Self { map })
    }
}

impl AsRef<[u8]> for MappedFile {
    fn as_ref(&self) -> &[u8] {
        match &self.map {
            Some(map) => &map[..],
            None => &[],
        }
    }
}
