//! Integration coverage of the PNG decode / TIFF encode-decode round trip
//! (R1: persist-then-parse of a disparity map preserves every finite pixel
//! bit-for-bit).

use std::io::Cursor;

use png::{BitDepth, ColorType, Encoder};

use stereo_core::Image;

fn encode_rgb16(width: u32, height: u32, samples: &[u16]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = Encoder::new(&mut buf, width, height);
        encoder.set_color(ColorType::Rgb);
        encoder.set_depth(BitDepth::Sixteen);
        let mut writer = encoder.write_header().unwrap();
        let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_be_bytes()).collect();
        writer.write_image_data(&bytes).unwrap();
    }
    buf
}

#[test]
fn sixteen_bit_png_rescales_to_0_255() {
    // 65535 should rescale to 255.0 (65535/257 == 255 exactly).
    let samples = [65535u16, 0, 0, 0, 0, 0];
    let bytes = encode_rgb16(1, 2, &samples);
    let img = stereo_io::png::read_png(Cursor::new(bytes)).unwrap();
    assert_eq!(img.get(0, 0, 0).unwrap(), 255.0);
    assert_eq!(img.get(0, 1, 0).unwrap(), 0.0);
}

/// R1: TIFF persist -> parse preserves every finite pixel bit-identically.
#[test]
fn tiff_roundtrip_is_bit_identical() {
    let values: Vec<f32> = (0..64).map(|i| (i as f32) * 0.5 - 10.0).collect();
    let image = Image::from_pixels(8, 8, 1, values.clone()).unwrap();

    let mut buf = Cursor::new(Vec::new());
    stereo_io::tiff::write_tiff(&image, &mut buf).unwrap();
    buf.set_position(0);
    let back = stereo_io::tiff::read_tiff(buf).unwrap();

    assert_eq!(back.pixels(), values.as_slice());
}
