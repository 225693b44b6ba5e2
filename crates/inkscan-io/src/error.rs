//! I/O error types
//!
//! Decoder failures from the `image` crate, file system errors and
//! core-library errors are folded into one `IoError` so that callers only
//! need to handle one error type.

use thiserror::Error;

/// Error type for image loading
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The decoder rejected the data or does not know the format
    #[error("decode error: {0}")]
    Decode(#[from] image::ImageError),

    /// The decoded image could not be turned into a bitmap
    #[error("core error: {0}")]
    Core(#[from] inkscan_core::Error),
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
