//! Error types for stereo-core

use thiserror::Error;

/// stereo-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}x{channels}")]
    InvalidDimension {
        width: u32,
        height: u32,
        channels: u32,
    },

    /// Pixel data length doesn't match width*height*channels
    #[error("pixel data length {got} doesn't match {expected} for {width}x{height}x{channels}")]
    DataLengthMismatch {
        width: u32,
        height: u32,
        channels: u32,
        expected: usize,
        got: usize,
    },

    /// Two images expected to share dimensions do not
    #[error("incompatible image sizes: {0}x{1} vs {2}x{3}")]
    IncompatibleSizes(u32, u32, u32, u32),

    /// Channel index out of range for this image
    #[error("channel {channel} out of range for {channels}-channel image")]
    ChannelOutOfRange { channel: u32, channels: u32 },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for stereo-core operations
pub type Result<T> = std::result::Result<T, Error>;
