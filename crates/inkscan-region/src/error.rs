//! Error types for inkscan-region

use thiserror::Error;

/// Errors that can occur during region processing operations
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] inkscan_core::Error),

    /// Run with a negative coordinate or count
    #[error("invalid run: row={row}, start={start}, count={count}")]
    InvalidRun { row: i32, start: i32, count: i32 },

    /// Stream error while reading or writing a serialized component
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
