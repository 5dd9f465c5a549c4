//! I/O error types

use thiserror::Error;

/// stereo-io error type
#[derive(Error, Debug)]
pub enum Error {
    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unsupported image format
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// PNG decode error
    #[error("PNG decode error: {0}")]
    PngDecode(String),

    /// PNG encode error
    #[error("PNG encode error: {0}")]
    PngEncode(String),

    /// TIFF decode error
    #[error("TIFF decode error: {0}")]
    TiffDecode(String),

    /// TIFF encode error
    #[error("TIFF encode error: {0}")]
    TiffEncode(String),

    /// stereo-core error
    #[error("core error: {0}")]
    Core(#[from] stereo_core::Error),
}

/// Result type for stereo-io operations
pub type Result<T> = std::result::Result<T, Error>;
