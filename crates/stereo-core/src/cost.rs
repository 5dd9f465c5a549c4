//! Cost volume builder (§4.D).

use crate::error::{Error, Result};
use crate::image::Image;
use crate::params::MatchParams;

/// An ordered sequence of `dMax-dMin+1` single-channel cost layers sharing
/// the reference grid; layer `k` holds costs for disparity `d = dMin + k`.
/// Built once per run, consumed once by the aggregator, then dropped.
#[derive(Debug)]
pub struct CostVolume {
    layers: Vec<Image>,
    d_min: i32,
    d_max: i32,
}

impl CostVolume {
    /// Build the cost volume for color images `left`/`right` (same
    /// dimensions, same channel count) and their precomputed gradients.
    pub fn build(
        left: &Image,
        right: &Image,
        grad_left: &Image,
        grad_right: &Image,
        d_min: i32,
        d_max: i32,
        params: &MatchParams,
    ) -> Result<Self> {
        if d_min > d_max {
            return Err(Error::InvalidParameter(format!(
                "dMin ({d_min}) must be <= dMax ({d_max})"
            )));
        }
        if left.width() != right.width()
            || left.height() != right.height()
            || left.channels() != right.channels()
        {
            return Err(Error::IncompatibleSizes(
                left.width(),
                left.height(),
                right.width(),
                right.height(),
            ));
        }

        let w = left.width();
        let h = left.height();
        let c = left.channels();
        let n = (d_max - d_min + 1) as usize;
        let mut layers = Vec::with_capacity(n);

        for k in 0..n {
            let d = d_min + k as i32;
            layers.push(build_layer(
                left, right, grad_left, grad_right, w, h, c, d, params,
            )?);
        }

        Ok(CostVolume {
            layers,
            d_min,
            d_max,
        })
    }

    #[inline]
    pub fn d_min(&self) -> i32 {
        self.d_min
    }

    #[inline]
    pub fn d_max(&self) -> i32 {
        self.d_max
    }

    /// The cost layer for disparity `d`, or `None` if out of `[dMin, dMax]`.
    #[inline]
    pub fn layer(&self, d: i32) -> Option<&Image> {
        if d < self.d_min || d > self.d_max {
            return None;
        }
        self.layers.get((d - self.d_min) as usize)
    }
}

fn build_layer(
    left: &Image,
    right: &Image,
    grad_left: &Image,
    grad_right: &Image,
    w: u32,
    h: u32,
    c: u32,
    d: i32,
    params: &MatchParams,
) -> Result<Image> {
    let mut out = vec![0.0f32; (w as usize) * (h as usize)];
    let tau_col = params.tau_col;
    let tau_grad = params.tau_grad;
    let alpha = params.alpha;

    for y in 0..h {
        for x in 0..w {
            let xd = x as i64 + d as i64;
            let (color_cost, grad_cost) = if xd < 0 || xd >= w as i64 {
                (tau_col, tau_grad)
            } else {
                let xd = xd as u32;
                let mut sum = 0.0f32;
                for ch in 0..c {
                    let l = left.get_unchecked(x, y, ch);
                    let r = right.get_unchecked(xd, y, ch);
                    sum += (l - r).abs();
                }
                let color_cost = (sum / c as f32).min(tau_col);
                let gl = grad_left.get_unchecked(x, y, 0);
                let gr = grad_right.get_unchecked(xd, y, 0);
                let grad_cost = (gl - gr).abs().min(tau_grad);
                (color_cost, grad_cost)
            };
            out[(y * w + x) as usize] = (1.0 - alpha) * color_cost + alpha * grad_cost;
        }
    }

    Image::from_pixels(w, h, 1, out)
}
