//! Horizontal finite-difference gradient (§4.C).

use crate::error::Result;
use crate::image::Image;

/// Compute the signed horizontal gradient of a single-channel image.
///
/// Interior columns use the central difference `0.5*(I(x+1,y) - I(x-1,y))`;
/// the first and last columns use the one-sided difference. Sign is
/// preserved — magnitude is taken later, in the cost layer.
pub fn horizontal_gradient(gray: &Image) -> Result<Image> {
    let w = gray.width();
    let h = gray.height();
    let mut out = vec![0.0f32; (w as usize) * (h as usize)];

    for y in 0..h {
        if w == 1 {
            out[(y * w) as usize] = 0.0;
            continue;
        }
        out[(y * w) as usize] = gray.get_unchecked(1, y, 0) - gray.get_unchecked(0, y, 0);
        for x in 1..w - 1 {
            let left = gray.get_unchecked(x - 1, y, 0);
            let right = gray.get_unchecked(x + 1, y, 0);
            out[(y * w + x) as usize] = 0.5 * (right - left);
        }
        out[(y * w + (w - 1)) as usize] =
            gray.get_unchecked(w - 1, y, 0) - gray.get_unchecked(w - 2, y, 0);
    }

    Image::from_pixels(w, h, 1, out)
}
