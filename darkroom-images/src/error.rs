//! Error types for image rendering.

use thiserror::Error;

/// Result type for image operations.
pub type ImageResult<T> = std::result::Result<T, ImageError>;

/// Image rendering error types.
#[derive(Debug, Error)]
pub enum ImageError {
    /// Source bytes could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Rendered image could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),

    /// Format not supported.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Target box has a zero dimension.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}
