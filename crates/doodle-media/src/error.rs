//! Error types for drawing preprocessing.

use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur while decoding or preprocessing a drawing.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Invalid image format: {0}")]
    Format(String),

    #[error("Image data too small: {len} bytes (minimum {min})")]
    TooSmall { len: usize, min: usize },

    #[error("Preprocessing failed: {0}")]
    Preprocess(String),

    #[error("Base64 decode failed: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),
}

impl MediaError {
    /// Create a format validation error.
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }

    /// Create a too-small payload error.
    pub fn too_small(len: usize, min: usize) -> Self {
        Self::TooSmall { len, min }
    }

    /// Create a preprocessing failure error.
    pub fn preprocess(message: impl Into<String>) -> Self {
        Self::Preprocess(message.into())
    }
}
