//! Window cache shared by all root buffers.
//!
//! A root buffer keeps at most one window of its source in memory. Fetches
//! that fall inside the window are plain copies; fetches that leave it copy
//! what the current window holds, reload the window covering the next byte,
//! and continue. The bytes a caller sees never depend on where the window
//! boundaries fall.

use std::cell::RefCell;
use std::io;

use tracing::{trace, warn};

use crate::config::BufferConfig;
use crate::error::Result;
use crate::io::BackingSource;

/// Counters describing how a root buffer's window has been used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowStats {
    /// Fetches served entirely from the resident window.
    pub hits: u64,
    /// Window reloads, one positioned read each.
    pub reloads: u64,
    /// Total bytes read from the source by reloads.
    pub bytes_loaded: u64,
}

/// Random access to the bytes of a root buffer.
///
/// Subsections hold this as a trait object so they don't carry the source
/// type around.
pub(crate) trait Fetch {
    /// Copies `dst.len()` bytes starting at absolute `offset`.
    ///
    /// Callers have already checked the range against the capacity.
    fn fetch(&self, offset: u64, dst: &mut [u8]) -> Result<()>;
}

pub(crate) struct WindowedCache {
    window_size: usize,
    start: u64,
    valid: usize,
    // Allocated on the first reload.
    data: Box<[u8]>,
    stats: WindowStats,
}

impl WindowedCache {
    pub(crate) fn new(window_size: usize) -> Self {
        debug_assert!(window_size.is_power_of_two());
        Self {
            window_size,
            start: 0,
            valid: 0,
            data: Box::default(),
            stats: WindowStats::default(),
        }
    }

    fn contains(&self, offset: u64) -> bool {
        offset >= self.start && offset - self.start < self.valid as u64
    }

    pub(crate) fn fetch<S: BackingSource + ?Sized>(
        &mut self,
        source: &S,
        offset: u64,
        dst: &mut [u8],
    ) -> Result<()> {
        let mut filled = 0;
        let mut missed = false;

        while filled < dst.len() {
            let cursor = offset + filled as u64;
            if !self.contains(cursor) {
                self.reload(source, cursor)?;
                missed = true;
            }

            let at = (cursor - self.start) as usize;
            let n = (self.valid - at).min(dst.len() - filled);
            dst[filled..filled + n].copy_from_slice(&self.data[at..at + n]);
            filled += n;
        }

        if !missed {
            self.stats.hits += 1;
        }
        Ok(())
    }

    /// Loads the aligned window containing `offset`.
    fn reload<S: BackingSource + ?Sized>(&mut self, source: &S, offset: u64) -> Result<()> {
        let len = source.len();
        if offset >= len {
            self.invalidate();
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("offset {offset:#x} is beyond source length {len:#x}"),
            )
            .into());
        }

        let size = self.window_size as u64;
        let start = offset & !(size - 1);
        let valid = (len - start).min(size) as usize;

        if self.data.is_empty() {
            self.data = vec![0u8; self.window_size].into_boxed_slice();
        }

        if let Err(e) = source.read_exact_at(start, &mut self.data[..valid]) {
            self.invalidate();
            warn!(
                window_start = start,
                len = valid,
                error = %e,
                "Window reload failed"
            );
            return Err(e.into());
        }

        self.start = start;
        self.valid = valid;
        self.stats.reloads += 1;
        self.stats.bytes_loaded += valid as u64;

        trace!(
            window_start = start,
            len = valid,
            reloads = self.stats.reloads,
            "Reloaded window"
        );
        Ok(())
    }

    fn invalidate(&mut self) {
        self.start = 0;
        self.valid = 0;
    }

    pub(crate) fn stats(&self) -> WindowStats {
        self.stats
    }

    pub(crate) fn resident_bytes(&self) -> usize {
        self.data.len()
    }
}

/// A backing source plus the strategy used to read it.
///
/// Sources that are not resident in memory always go through a window.
/// Resident sources are read straight from their slice unless the
/// configuration asks for windowing.
pub(crate) struct Pager<S> {
    source: S,
    window: Option<RefCell<WindowedCache>>,
}

impl<S: BackingSource> Pager<S> {
    pub(crate) fn new(source: S, config: &BufferConfig) -> Self {
        let windowed = config.window_in_memory || source.resident().is_none();
        let window = windowed.then(|| RefCell::new(WindowedCache::new(config.window_size)));
        Self { source, window }
    }

    pub(crate) fn source(&self) -> &S {
        &self.source
    }

    pub(crate) fn into_source(self) -> S {
        self.source
    }

    pub(crate) fn is_windowed(&self) -> bool {
        self.window.is_some()
    }

    pub(crate) fn stats(&self) -> WindowStats {
        self.window
            .as_ref()
            .map(|window| window.borrow().stats())
            .unwrap_or_default()
    }

    pub(crate) fn resident_bytes(&self) -> usize {
        match &self.window {
            Some(window) => window.borrow().resident_bytes(),
            None => self.source.resident().map_or(0, <[u8]>::len),
        }
    }
}

impl<S: BackingSource> Fetch for Pager<S> {
    fn fetch(&self, offset: u64, dst: &mut [u8]) -> Result<()> {
        match &self.window {
            Some(window) => window.borrow_mut().fetch(&self.source, offset, dst),
            // Resident sources: a bounds-checked slice copy.
            None => Ok(self.source.read_exact_at(offset, dst)?),
        }
    }
}
