//! Error handling for the bulkbytes library
//!
//! Every public operation validates its arguments at entry and reports
//! violations through [`BulkError`]. Once validation passes no internal
//! branch (tiering, algorithm selection, parallel fan-out) produces an error.
//! A search that finds nothing is not an error; it returns `None`.

use thiserror::Error;

/// Main error type for the bulkbytes library
#[derive(Error, Debug)]
pub enum BulkError {
    /// A required argument is absent or malformed
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the offending argument
        message: String,
    },

    /// An offset/count pair reaches past the end of a buffer
    #[error("Out of bounds: offset {offset} + count {count} exceeds buffer length {size}")]
    OutOfBounds {
        /// Requested start offset
        offset: usize,
        /// Requested byte count
        count: usize,
        /// Length of the underlying buffer
        size: usize,
    },

    /// Configuration or parameter errors
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },

    /// I/O related errors (configuration files only)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BulkError {
    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument { message: message.into() }
    }

    /// Create an out of bounds error
    pub fn out_of_bounds(offset: usize, count: usize, size: usize) -> Self {
        Self::OutOfBounds { offset, count, size }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Whether the error belongs to the `InvalidArgument` family.
    ///
    /// Bounds violations are argument errors raised before any byte is touched.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. } | Self::OutOfBounds { .. })
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::InvalidArgument { .. } => false,
            Self::OutOfBounds { .. } => false,
            Self::Configuration { .. } => false,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "argument",
            Self::OutOfBounds { .. } => "bounds",
            Self::Configuration { .. } => "config",
            Self::Io(_) => "io",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, BulkError>;

/// Assert that `offset..offset + count` lies within a buffer of `size` bytes.
///
/// The end is computed with `checked_add`, so offsets near `usize::MAX`
/// are rejected instead of wrapping.
#[inline]
pub fn check_view(offset: usize, count: usize, size: usize) -> Result<()> {
    match offset.checked_add(count) {
        Some(end) if end <= size => Ok(()),
        _ => Err(BulkError::out_of_bounds(offset, count, size)),
    }
}

/// Assert that `offset` is a valid start position (`offset <= size`)
#[inline]
pub fn check_offset(offset: usize, size: usize) -> Result<()> {
    if offset > size {
        Err(BulkError::out_of_bounds(offset, 0, size))
    } else {
        Ok(())
    }
}
