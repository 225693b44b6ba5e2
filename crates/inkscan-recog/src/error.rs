//! Error types for inkscan-recog

use thiserror::Error;

/// Errors that can occur during recognition preprocessing
#[derive(Debug, Error)]
pub enum RecogError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] inkscan_core::Error),

    /// Invalid parameter provided
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The image holds no foreground pixels
    #[error("image has no foreground pixels")]
    EmptyImage,
}

/// Result type for recognition operations
pub type RecogResult<T> = Result<T, RecogError>;
