//! Error types for stream buffers.
//!
//! Every fallible buffer operation returns [`BufferError`]. Out-of-range and
//! underflow failures are ordinary control-flow signals for readers ("end of
//! section reached") and always leave the cursor untouched; I/O failures come
//! from the backing source and leave the buffer unusable.

use thiserror::Error;

/// Main error type for buffer operations.
#[derive(Debug, Error)]
pub enum BufferError {
    /// A cursor position outside `[0, capacity]` was requested.
    #[error("Position {requested:#x} is out of range (capacity {capacity:#x})")]
    OutOfRange { requested: u64, capacity: u64 },

    /// A read (or subsection) asked for more bytes than remain.
    #[error("Buffer underflow: needed {needed} bytes, {remaining} remaining")]
    Underflow { needed: u64, remaining: u64 },

    /// The backing source could not satisfy a window reload.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Rejected buffer configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl BufferError {
    /// True for the recoverable end-of-data conditions.
    ///
    /// Readers walking a section can stop on these instead of bailing out.
    pub fn is_eof(&self) -> bool {
        matches!(
            self,
            BufferError::OutOfRange { .. } | BufferError::Underflow { .. }
        )
    }
}

impl From<BufferError> for std::io::Error {
    fn from(err: BufferError) -> Self {
        use std::io::ErrorKind;

        match err {
            BufferError::Io(e) => e,
            BufferError::Underflow { .. } => std::io::Error::new(ErrorKind::UnexpectedEof, err),
            other => std::io::Error::new(ErrorKind::InvalidInput, other),
        }
    }
}

/// Result type alias for buffer operations
pub type Result<T> = std::result::Result<T, BufferError>;
