//! Bilateral support window builder (§4.E).

use crate::image::Image;
use crate::tables::KernelTables;

/// A `(2r+1)x(2r+1)` scratch buffer of bilateral weights around some center.
///
/// Plain `Vec<f32>`, not an `Arc`-backed [`crate::image::Image`]: support
/// windows are rebuilt (reference side) or cycled through a ring (target
/// side) once per pixel, and a reference-counted allocation per pixel would
/// defeat the `O(H*(W+D)*(2r+1)^2)` complexity target of the aggregator.
#[derive(Debug, Clone)]
pub struct Window {
    weights: Vec<f32>,
    radius: u32,
}

impl Window {
    /// Allocate a zeroed window for the given radius.
    pub fn new(radius: u32) -> Self {
        let side = (2 * radius + 1) as usize;
        Window {
            weights: vec![0.0; side * side],
            radius,
        }
    }

    #[inline]
    pub fn radius(&self) -> u32 {
        self.radius
    }

    #[inline]
    fn side(&self) -> usize {
        (2 * self.radius + 1) as usize
    }

    /// Weight at offset `(dx, dy)` from the window's center.
    #[inline]
    pub fn get(&self, dx: i32, dy: i32) -> f32 {
        let r = self.radius as i32;
        let idx = ((dy + r) as usize) * self.side() + (dx + r) as usize;
        self.weights[idx]
    }

    /// Fill this window in place with bilateral weights around center
    /// `(x0, y0)` in `image`, per §4.E. Entries whose `(x0+dx, y0+dy)` falls
    /// outside `image` are left at `0.0`; the aggregator's `den==0` guard
    /// relies on this to discard their contribution.
    pub fn fill(&mut self, image: &Image, x0: i32, y0: i32, tables: &KernelTables) {
        let r = self.radius as i32;
        let side = self.side();
        let channels = image.channels();

        // A center outside the image (e.g. a ring-buffer lookahead column
        // past the right edge) can never be read by a valid candidate
        // disparity, since that requires `0 <= x+d < W` and the center
        // coincides with `x+d`; leave the whole window zeroed rather than
        // index with an out-of-range center.
        if !image.in_bounds(x0 as i64, y0 as i64) {
            self.weights.iter_mut().for_each(|w| *w = 0.0);
            return;
        }

        for dy in -r..=r {
            let py = y0 + dy;
            for dx in -r..=r {
                let px = x0 + dx;
                let idx = ((dy + r) as usize) * side + (dx + r) as usize;
                self.weights[idx] = if image.in_bounds(px as i64, py as i64) {
                    let mut sum = 0.0f32;
                    for c in 0..channels {
                        let center = image.get_unchecked(x0 as u32, y0 as u32, c);
                        let neigh = image.get_unchecked(px as u32, py as u32, c);
                        sum += (center - neigh).abs();
                    }
                    let color_idx = sum as usize;
                    tables.dist_c(color_idx) * tables.dist_p(dx, dy)
                } else {
                    0.0
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_weight_is_full_when_interior() {
        let img = Image::new(10, 10, 1).unwrap();
        let tables = KernelTables::build(1, 12.0, 17.5, 2, 1.0);
        let mut w = Window::new(2);
        w.fill(&img, 5, 5, &tables);
        assert_eq!(w.get(0, 0), tables.dist_c(0) * tables.dist_p(0, 0));
    }

    #[test]
    fn out_of_image_entries_are_zero() {
        let img = Image::new(4, 4, 1).unwrap();
        let tables = KernelTables::build(1, 12.0, 17.5, 2, 1.0);
        let mut w = Window::new(2);
        w.fill(&img, 0, 0, &tables);
        // (-2,-2) relative to (0,0) is out of bounds
        assert_eq!(w.get(-2, -2), 0.0);
        // center is always in bounds
        assert!(w.get(0, 0) > 0.0);
    }

    #[test]
    fn decays_with_color_difference() {
        let img = Image::from_pixels(3, 1, 1, vec![0.0, 0.0, 200.0]).unwrap();
        let tables = KernelTables::build(1, 12.0, 17.5, 1, 1.0);
        let mut w = Window::new(1);
        w.fill(&img, 1, 0, &tables);
        // left neighbor matches center color, right neighbor is far
        assert!(w.get(-1, 0) > w.get(1, 0));
    }
}
