//! Weighted-median densifier (§4.I).

use crate::disparity_map::{Disparity, DisparityMap};
use crate::image::Image;
use crate::params::PostParams;

/// Replace each occluded pixel of `d1` (the occlusion-filtered forward
/// map) with the weighted median of nearby reliable disparities, sampled
/// from `disp_dense` (the monotone-fill output) under a joint
/// spatial/range kernel guided by `reference` (`I1`). Pixels already valid
/// in `d1` pass through unchanged (P7).
///
/// Histogram bins span the contiguous integer range `[d_min, d_max]`, so
/// the weighted median never needs a general sort — only bucket counting.
pub fn densify(
    d1: &DisparityMap,
    disp_dense: &DisparityMap,
    reference: &Image,
    params: &PostParams,
    d_min: i32,
    d_max: i32,
) -> DisparityMap {
    let w = d1.width();
    let h = d1.height();
    let nd = (d_max - d_min + 1) as usize;
    let mr = params.median_radius as i32;
    let channels = reference.channels();
    let two_sigma_space_sq = 2.0 * params.sigma_space * params.sigma_space;

    let mut out = d1.clone();

    for y in 0..h {
        for x in 0..w {
            if d1.get(x, y).is_valid() {
                continue;
            }

            let mut hist = vec![0.0f32; nd];
            let mut total = 0.0f32;

            for dy in -mr..=mr {
                let py = y as i32 + dy;
                if py < 0 || py >= h as i32 {
                    continue;
                }
                for dx in -mr..=mr {
                    let px = x as i32 + dx;
                    if px < 0 || px >= w as i32 {
                        continue;
                    }
                    let d = match disp_dense.get(px as u32, py as u32) {
                        Disparity::Valid(d) if (d_min..=d_max).contains(&d) => d,
                        _ => continue,
                    };

                    let spatial = (-((dx * dx + dy * dy) as f32) / two_sigma_space_sq).exp();
                    let mut color_sum = 0.0f32;
                    for c in 0..channels {
                        let a = reference.get_unchecked(px as u32, py as u32, c);
                        let b = reference.get_unchecked(x, y, c);
                        color_sum += (a - b).abs();
                    }
                    let range = (-color_sum / (channels as f32 * params.sigma_color)).exp();
                    let weight = spatial * range;

                    hist[(d - d_min) as usize] += weight;
                    total += weight;
                }
            }

            if total == 0.0 {
                out.set(x, y, disp_dense.get(x, y));
                continue;
            }

            let half = total / 2.0;
            let mut cum = 0.0f32;
            let mut chosen = d_min;
            for (b, &weight) in hist.iter().enumerate() {
                cum += weight;
                if cum >= half {
                    chosen = d_min + b as i32;
                    break;
                }
            }
            out.set(x, y, Disparity::Valid(chosen));
        }
    }

    out
}
