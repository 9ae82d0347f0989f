//! Error types for multiremux-bdmv.

use std::io;
use thiserror::Error;

/// Result type for multiremux-bdmv operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for multiremux-bdmv operations.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file does not start with the `MPLS` magic.
    #[error("Invalid MPLS magic: {found:?}")]
    InvalidMagic { found: String },

    /// Input ended before a fixed-width read could complete.
    #[error("Truncated input at offset {offset}: need {need} bytes, have {have}")]
    Truncated {
        offset: usize,
        need: usize,
        have: usize,
    },

    /// A seek target lies beyond the end of the input.
    #[error("Offset {offset} out of bounds (length {len})")]
    OutOfBounds { offset: usize, len: usize },
}

impl Error {
    /// Create an invalid magic error from the bytes actually found.
    pub fn invalid_magic(found: &[u8]) -> Self {
        Self::InvalidMagic {
            found: String::from_utf8_lossy(found).into_owned(),
        }
    }

    /// Whether this error came from running out of input or pointing past it.
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::Truncated { .. } | Self::OutOfBounds { .. })
    }
}
