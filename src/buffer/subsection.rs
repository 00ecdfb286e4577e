//! Subsection views.
//!
//! A [`Subsection`] aliases a contiguous range of a root buffer. It has its
//! own cursor and capacity and reads through the root's window, so carving
//! one out copies nothing and never moves the issuer's cursor. Nested
//! subsections are flattened: each view stores its absolute base within the
//! root, so depth costs nothing on reads.

use std::fmt;

use super::window::Fetch;
use super::{Cursor, StreamBuffer};
use crate::endian::ByteOrder;
use crate::error::Result;

/// A bounded, independently positioned view into a root buffer.
///
/// Borrows the root buffer's source and window for `'a`; the root cannot be
/// dropped while a view is alive.
#[derive(Clone)]
pub struct Subsection<'a> {
    pager: &'a dyn Fetch,
    base: u64,
    cursor: Cursor,
    order: ByteOrder,
}

impl<'a> Subsection<'a> {
    pub(crate) fn new(pager: &'a dyn Fetch, base: u64, capacity: u64, order: ByteOrder) -> Self {
        Self {
            pager,
            base,
            cursor: Cursor::new(capacity),
            order,
        }
    }

    pub(crate) fn with_position(
        pager: &'a dyn Fetch,
        base: u64,
        capacity: u64,
        position: u64,
        order: ByteOrder,
    ) -> Self {
        Self {
            pager,
            base,
            cursor: Cursor::at(position, capacity),
            order,
        }
    }

    /// Offset of this view's first byte within the root buffer.
    pub fn base_offset(&self) -> u64 {
        self.base
    }

    /// Creates a view of the next `len` bytes that borrows the root buffer
    /// rather than this view, so it may outlive `self`.
    pub fn subsection(&self, len: u64) -> Result<Subsection<'a>> {
        let at = self.cursor.claim(len)?;
        Ok(Subsection::new(self.pager, self.base + at, len, self.order))
    }
}

impl StreamBuffer for Subsection<'_> {
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
        self.cursor.read(self.pager, self.base, dst)
    }

    fn wrap_subsection(&self, len: u64) -> Result<Subsection<'_>> {
        self.subsection(len)
    }
}

impl fmt::Debug for Subsection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subsection")
            .field("base", &self.base)
            .field("capacity", &self.cursor.capacity())
            .field("position", &self.cursor.position())
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}
