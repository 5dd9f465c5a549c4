//! Output staging: clamp-to-range plus sentinel (§4.J).
//!
//! This is the only place in the pipeline where the raw float/NaN encoding
//! is produced; everywhere else in `stereo-core` a disparity is a tagged
//! [`crate::disparity_map::Disparity`].

use crate::disparity_map::DisparityMap;
use crate::image::Image;

/// Stage a [`DisparityMap`] for persistence: finite disparities within
/// `[d_min, d_max]` become their float value, everything else (occluded,
/// or — defensively — out of range) becomes `NaN`.
pub fn to_output_image(map: &DisparityMap, d_min: i32, d_max: i32) -> Image {
    let w = map.width();
    let h = map.height();
    let mut data = vec![0.0f32; (w as usize) * (h as usize)];

    for y in 0..h {
        for x in 0..w {
            let value = match map.get(x, y).value() {
                Some(d) if (d_min..=d_max).contains(&d) => d as f32,
                _ => f32::NAN,
            };
            data[(y * w + x) as usize] = value;
        }
    }

    Image::from_pixels(w, h, 1, data).expect("dimensions already validated by the source map")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disparity_map::Disparity;

    #[test]
    fn valid_in_range_passes_through() {
        let mut m = DisparityMap::filled_occluded(2, 1);
        m.set(0, 0, Disparity::Valid(-3));
        let img = to_output_image(&m, -5, 0);
        assert_eq!(img.get(0, 0, 0).unwrap(), -3.0);
        assert!(img.get(1, 0, 0).unwrap().is_nan());
    }

    #[test]
    fn out_of_range_becomes_nan() {
        let mut m = DisparityMap::filled_occluded(1, 1);
        m.set(0, 0, Disparity::Valid(7));
        let img = to_output_image(&m, -5, 0);
        assert!(img.get(0, 0, 0).unwrap().is_nan());
    }
}
