//! PNG decode and 32-bit float TIFF encode/decode for the stereo matching
//! pipeline: the external collaborators named out of `stereo-core`'s scope.

pub mod error;
pub mod png;
pub mod tiff;

pub use error::{Error, Result};
