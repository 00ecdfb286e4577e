//! Windowed, byte-order-aware stream buffers for binary readers.
//!
//! Symbol readers and disassemblers consume executables through
//! [`StreamBuffer`]: absolute positioning, typed reads in a fixed byte order,
//! and zero-copy [`Subsection`] views. A [`RootBuffer`] can sit on an
//! in-memory array, a wrapped pre-existing buffer, or a random-access file of
//! any size; file-backed buffers keep a single window of the file in memory.
//!
//! ```no_run
//! use winbuf::{ByteOrder, RootBuffer, StreamBuffer};
//!
//! # fn main() -> winbuf::Result<()> {
//! let mut elf = RootBuffer::open_path("/bin/ls", ByteOrder::Little)?;
//! elf.set_position(0x18)?;
//! let entry = elf.get_u64()?;
//!
//! elf.set_position(0x40)?;
//! let mut header = elf.wrap_subsection(0x38)?;
//! let p_type = header.get_u32()?;
//! # let _ = (entry, p_type);
//! # Ok(())
//! # }
//! ```

pub mod buffer;
pub mod config;
pub mod endian;
pub mod error;
pub mod io;
pub mod logging;

pub use buffer::{RootBuffer, StreamBuffer, StreamReader, Subsection, WindowStats};
pub use config::{BufferConfig, DEFAULT_WINDOW_SIZE};
pub use endian::ByteOrder;
pub use error::{BufferError, Result};
pub use io::{ArraySource, BackingSource, FileSource, MappedFile, WrappedSource};
