//! The stream buffer contract.
//!
//! [`StreamBuffer`] is the only I/O dependency symbol readers and
//! disassemblers take. It is implemented by [`RootBuffer`], which owns a
//! backing source, and by [`Subsection`], a cursored view onto a range of a
//! root buffer.
//!
//! All reads are atomic: the full length is checked against
//! [`StreamBuffer::remaining`] before anything is fetched, so a failed read
//! never moves the cursor.

mod reader;
mod root;
mod subsection;
mod window;

pub use reader::StreamReader;
pub use root::RootBuffer;
pub use subsection::Subsection;
pub use window::WindowStats;

use crate::endian::ByteOrder;
use crate::error::{BufferError, Result};
use window::Fetch;

/// A random-access, byte-order-aware buffer with a cursor.
pub trait StreamBuffer {
    /// Total addressable bytes, fixed at creation.
    fn capacity(&self) -> u64;

    /// Current cursor, always in `[0, capacity]`.
    fn position(&self) -> u64;

    /// Moves the cursor.
    ///
    /// Fails with [`BufferError::OutOfRange`] if `position > capacity`, in
    /// which case the cursor is unchanged.
    fn set_position(&mut self, position: u64) -> Result<()>;

    /// Byte order used by the multi-byte getters.
    fn byte_order(&self) -> ByteOrder;

    /// Fills `dst` with the next `dst.len()` bytes and advances past them.
    ///
    /// To fill part of a caller buffer, pass `&mut dst[offset..offset + len]`.
    fn get(&mut self, dst: &mut [u8]) -> Result<()>;

    /// Creates a view of the next `len` bytes.
    ///
    /// The view starts at this buffer's current position with its own cursor
    /// at 0. This buffer's position and remaining bytes are not affected.
    fn wrap_subsection(&self, len: u64) -> Result<Subsection<'_>>;

    fn remaining(&self) -> u64 {
        self.capacity() - self.position()
    }

    fn has_remaining(&self) -> bool {
        self.remaining() > 0
    }

    /// Advances the cursor by `n` bytes without reading them.
    fn skip(&mut self, n: u64) -> Result<()> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(BufferError::Underflow {
                needed: n,
                remaining,
            });
        }
        self.set_position(self.position() + n)
    }

    fn get_u8(&mut self) -> Result<u8> {
        let [byte] = read_array(self)?;
        Ok(byte)
    }

    fn get_i8(&mut self) -> Result<i8> {
        Ok(self.get_u8()? as i8)
    }

    fn get_u16(&mut self) -> Result<u16> {
        let bytes = read_array(self)?;
        Ok(self.byte_order().decode_u16(bytes))
    }

    fn get_i16(&mut self) -> Result<i16> {
        let bytes = read_array(self)?;
        Ok(self.byte_order().decode_i16(bytes))
    }

    /// Reads a 16-bit unsigned code unit.
    fn get_char(&mut self) -> Result<u16> {
        self.get_u16()
    }

    fn get_u32(&mut self) -> Result<u32> {
        let bytes = read_array(self)?;
        Ok(self.byte_order().decode_u32(bytes))
    }

    fn get_i32(&mut self) -> Result<i32> {
        let bytes = read_array(self)?;
        Ok(self.byte_order().decode_i32(bytes))
    }

    fn get_u64(&mut self) -> Result<u64> {
        let bytes = read_array(self)?;
        Ok(self.byte_order().decode_u64(bytes))
    }

    fn get_i64(&mut self) -> Result<i64> {
        let bytes = read_array(self)?;
        Ok(self.byte_order().decode_i64(bytes))
    }

    fn get_f32(&mut self) -> Result<f32> {
        let bytes = read_array(self)?;
        Ok(self.byte_order().decode_f32(bytes))
    }

    fn get_f64(&mut self) -> Result<f64> {
        let bytes = read_array(self)?;
        Ok(self.byte_order().decode_f64(bytes))
    }

    /// Reads the next `len` bytes into a new vector.
    fn get_vec(&mut self, len: usize) -> Result<Vec<u8>> {
        // Checked up front so a bogus length never allocates.
        let remaining = self.remaining();
        if len as u64 > remaining {
            return Err(BufferError::Underflow {
                needed: len as u64,
                remaining,
            });
        }
        let mut out = vec![0u8; len];
        self.get(&mut out)?;
        Ok(out)
    }
}

fn read_array<const N: usize, B: StreamBuffer + ?Sized>(buf: &mut B) -> Result<[u8; N]> {
    let mut bytes = [0u8; N];
    buf.get(&mut bytes)?;
    Ok(bytes)
}

impl<B: StreamBuffer + ?Sized> StreamBuffer for &mut B {
    fn capacity(&self) -> u64 {
        (**self).capacity()
    }

    fn position(&self) -> u64 {
        (**self).position()
    }

    fn set_position(&mut self, position: u64) -> Result<()> {
        (**self).set_position(position)
    }

    fn byte_order(&self) -> ByteOrder {
        (**self).byte_order()
    }

    fn get(&mut self, dst: &mut [u8]) -> Result<()> {
        (**self).get(dst)
    }

    fn wrap_subsection(&self, len: u64) -> Result<Subsection<'_>> {
        (**self).wrap_subsection(len)
    }
}

impl<B: StreamBuffer + ?Sized> StreamBuffer for Box<B> {
    fn capacity(&self) -> u64 {
        (**self).capacity()
    }

    fn position(&self) -> u64 {
        (**self).position()
    }

    fn set_position(&mut self, position: u64) -> Result<()> {
        (**self).set_position(position)
    }

    fn byte_order(&self) -> ByteOrder {
        (**self).byte_order()
    }

    fn get(&mut self, dst: &mut [u8]) -> Result<()> {
        (**self).get(dst)
    }

    fn wrap_subsection(&self, len: u64) -> Result<Subsection<'_>> {
        (**self).wrap_subsection(len)
    }
}

/// Cursor bookkeeping shared by root buffers and subsections.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cursor {
    position: u64,
    capacity: u64,
}

impl Cursor {
    pub(crate) fn new(capacity: u64) -> Self {
        Self {
            position: 0,
            capacity,
        }
    }

    /// A cursor already at `position`, which must not exceed `capacity`.
    pub(crate) fn at(position: u64, capacity: u64) -> Self {
        debug_assert!(position <= capacity);
        Self { position, capacity }
    }

    pub(crate) fn position(&self) -> u64 {
        self.position
    }

    pub(crate) fn capacity(&self) -> u64 {
        self.capacity
    }

    pub(crate) fn seek(&mut self, position: u64) -> Result<()> {
        if position > self.capacity {
            return Err(BufferError::OutOfRange {
                requested: position,
                capacity: self.capacity,
            });
        }
        self.position = position;
        Ok(())
    }

    /// Checks that `len` more bytes are available and returns where they
    /// start. Does not move the cursor.
    pub(crate) fn claim(&self, len: u64) -> Result<u64> {
        let remaining = self.capacity - self.position;
        if len > remaining {
            return Err(BufferError::Underflow {
                needed: len,
                remaining,
            });
        }
        Ok(self.position)
    }

    /// Fetches the next `dst.len()` bytes from `base + position`, advancing
    /// only once the fetch has succeeded.
    pub(crate) fn read<F: Fetch + ?Sized>(
        &mut self,
        fetch: &F,
        base: u64,
        dst: &mut [u8],
    ) -> Result<()> {
        let len = dst.len() as u64;
        let at = self.claim(len)?;
        fetch.fetch(base + at, dst)?;
        self.position = at + len;
        Ok(())
    }
}
