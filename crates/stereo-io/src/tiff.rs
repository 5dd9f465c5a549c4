//! 32-bit float single-channel TIFF encode/decode (§6 persisted state).
//!
//! Grounded in `leptonica_io::tiff`'s `write_tiff`/`read_tiff` signatures
//! (`W: Write + Seek` / `R: Read + Seek`), specialized to the one pixel
//! format the pipeline ever persists: single-channel 32-bit float.

use std::io::{Read, Seek, Write};

use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::{colortype, TiffEncoder};

use stereo_core::Image;

use crate::error::{Error, Result};

/// Write a single-channel float [`Image`] as a 32-bit float TIFF.
pub fn write_tiff<W: Write + Seek>(image: &Image, writer: W) -> Result<()> {
    if image.channels() != 1 {
        return Err(Error::UnsupportedFormat(format!(
            "TIFF output expects a single-channel image, got {} channels",
            image.channels()
        )));
    }
    log::debug!(
        "encoding {}x{} float TIFF",
        image.width(),
        image.height()
    );
    let mut encoder =
        TiffEncoder::new(writer).map_err(|e| Error::TiffEncode(e.to_string()))?;
    encoder
        .write_image::<colortype::Gray32Float>(image.width(), image.height(), image.pixels())
        .map_err(|e| Error::TiffEncode(e.to_string()))?;
    Ok(())
}

/// Read a single-channel 32-bit float TIFF back into an [`Image`].
pub fn read_tiff<R: Read + Seek>(reader: R) -> Result<Image> {
    let mut decoder = Decoder::new(reader).map_err(|e| Error::TiffDecode(e.to_string()))?;
    let (width, height) = decoder
        .dimensions()
        .map_err(|e| Error::TiffDecode(e.to_string()))?;
    let decoded = decoder
        .read_image()
        .map_err(|e| Error::TiffDecode(e.to_string()))?;
    log::debug!("decoded {width}x{height} TIFF");

    let data = match decoded {
        DecodingResult::F32(v) => v,
        other => {
            return Err(Error::UnsupportedFormat(format!(
                "expected a 32-bit float TIFF, got {other:?}"
            )))
        }
    };

    Ok(Image::from_pixels(width, height, 1, data)?)
}
