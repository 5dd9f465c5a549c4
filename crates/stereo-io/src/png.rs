//! PNG decode of the input stereo pair (§6 external interfaces).
//!
//! Manual per-bit-depth unpacking into a dense float buffer, the same
//! shape as `leptonica_io::png::read_png`, rather than going through a
//! higher-level image crate.

use std::io::Read;

use png::{BitDepth, ColorType, Decoder};

use stereo_core::Image;

use crate::error::{Error, Result};

/// Decode a PNG into a float [`Image`] with samples in `[0,255]`.
///
/// 8-bit RGB/grayscale samples pass through unchanged; 16-bit samples are
/// rescaled by `/257.0` (`65535/257 == 255`) to land in the same `[0,255]`
/// range every other stage of the pipeline assumes. Grayscale input is
/// replicated across 3 channels so a grayscale fixture can stand in for a
/// color stereo pair.
pub fn read_png<R: Read>(reader: R) -> Result<Image> {
    let decoder = Decoder::new(reader);
    let mut reader = decoder
        .read_info()
        .map_err(|e| Error::PngDecode(e.to_string()))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| Error::PngDecode("failed to get output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| Error::PngDecode(e.to_string()))?;
    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    log::debug!("decoding {width}x{height} PNG ({color_type:?}, {bit_depth:?})");

    match (color_type, bit_depth) {
        (ColorType::Rgb, BitDepth::Eight) => {
            Ok(unpack(width, height, 3, bytes_per_row, data, |d, i| {
                d[i] as f32
            }))
        }
        (ColorType::Rgb, BitDepth::Sixteen) => Ok(unpack(
            width,
            height,
            3,
            bytes_per_row,
            data,
            |d, i| sample16(d, i) / 257.0,
        )),
        (ColorType::Grayscale, BitDepth::Eight) => {
            Ok(replicate_gray(unpack(width, height, 1, bytes_per_row, data, |d, i| {
                d[i] as f32
            })))
        }
        (ColorType::Grayscale, BitDepth::Sixteen) => Ok(replicate_gray(unpack(
            width,
            height,
            1,
            bytes_per_row,
            data,
            |d, i| sample16(d, i) / 257.0,
        ))),
        _ => Err(Error::UnsupportedFormat(format!(
            "unsupported PNG format: {color_type:?} {bit_depth:?}"
        ))),
    }
}

#[inline]
fn sample16(data: &[u8], byte_idx: usize) -> f32 {
    (((data[byte_idx] as u32) << 8) | data[byte_idx + 1] as u32) as f32
}

fn unpack(
    width: u32,
    height: u32,
    channels: u32,
    bytes_per_row: usize,
    data: &[u8],
    sample: impl Fn(&[u8], usize) -> f32,
) -> Image {
    let bytes_per_sample = bytes_per_row / (width as usize * channels as usize);
    let mut out = vec![0.0f32; (width as usize) * (height as usize) * (channels as usize)];
    for y in 0..height {
        let row_start = y as usize * bytes_per_row;
        for x in 0..width {
            for c in 0..channels {
                let byte_idx =
                    row_start + (x as usize * channels as usize + c as usize) * bytes_per_sample;
                let idx = ((y * width + x) * channels + c) as usize;
                out[idx] = sample(data, byte_idx);
            }
        }
    }
    Image::from_pixels(width, height, channels, out).expect("buffer sized to match dimensions")
}

fn replicate_gray(gray: Image) -> Image {
    let w = gray.width();
    let h = gray.height();
    let mut out = vec![0.0f32; (w as usize) * (h as usize) * 3];
    for y in 0..h {
        for x in 0..w {
            let v = gray.get_unchecked(x, y, 0);
            for c in 0..3 {
                out[((y * w + x) * 3 + c) as usize] = v;
            }
        }
    }
    Image::from_pixels(w, h, 3, out).expect("buffer sized to match dimensions")
}

/// Decode both members of a rectified stereo pair.
pub fn read_stereo_pair<R1: Read, R2: Read>(left: R1, right: R2) -> Result<(Image, Image)> {
    log::info!("decoding stereo pair");
    Ok((read_png(left)?, read_png(right)?))
}

/// Write an 8-bit grayscale PNG from a row-major byte buffer, used by the
/// single-window weight visualizer.
pub fn write_gray8<W: std::io::Write>(
    width: u32,
    height: u32,
    samples: &[u8],
    writer: W,
) -> Result<()> {
    log::debug!("encoding {width}x{height} grayscale PNG");
    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);
    let mut writer = encoder
        .write_header()
        .map_err(|e| Error::PngEncode(e.to_string()))?;
    writer
        .write_image_data(samples)
        .map_err(|e| Error::PngEncode(e.to_string()))?;
    Ok(())
}

/// Write an 8-bit RGB PNG from a row-major interleaved byte buffer, used
/// by the TIFF-to-PNG rendering utility.
pub fn write_rgb8<W: std::io::Write>(
    width: u32,
    height: u32,
    samples: &[u8],
    writer: W,
) -> Result<()> {
    log::debug!("encoding {width}x{height} RGB PNG");
    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);
    let mut writer = encoder
        .write_header()
        .map_err(|e| Error::PngEncode(e.to_string()))?;
    writer
        .write_image_data(samples)
        .map_err(|e| Error::PngEncode(e.to_string()))?;
    Ok(())
}
