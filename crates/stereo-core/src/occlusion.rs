//! Left/right consistency occlusion filter (§4.G).

use crate::disparity_map::{Disparity, DisparityMap};

/// Mark pixels of `d1` occluded when the forward/backward disparities
/// disagree by more than `tol_disp`, per §4.G. `d1`/`d2` must share
/// dimensions (`d2` is `D1`'s target-side counterpart, over the same grid
/// width/height since the pair is rectified to identical dimensions).
pub fn filter_occlusions(d1: &DisparityMap, d2: &DisparityMap, tol_disp: i32) -> DisparityMap {
    let w = d1.width();
    let h = d1.height();
    let mut out = DisparityMap::filled_occluded(w, h);

    for y in 0..h {
        for x in 0..w {
            let d = match d1.get(x, y) {
                Disparity::Occluded => continue,
                Disparity::Valid(d) => d,
            };
            let xp = x as i32 + d;
            if xp < 0 || xp >= w as i32 {
                continue;
            }
            let d_prime = match d2.get(xp as u32, y) {
                Disparity::Occluded => continue,
                Disparity::Valid(neg_d) => -neg_d,
            };
            if (d - d_prime).abs() <= tol_disp {
                out.set(x, y, Disparity::Valid(d));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consistent_pair_survives() {
        let mut d1 = DisparityMap::filled_occluded(4, 1);
        let mut d2 = DisparityMap::filled_occluded(4, 1);
        d1.set(3, 0, Disparity::Valid(-2));
        d2.set(1, 0, Disparity::Valid(2)); // D2 stores -d convention
        let out = filter_occlusions(&d1, &d2, 0);
        assert_eq!(out.get(3, 0), Disparity::Valid(-2));
    }

    #[test]
    fn inconsistent_pair_is_occluded() {
        let mut d1 = DisparityMap::filled_occluded(4, 1);
        let mut d2 = DisparityMap::filled_occluded(4, 1);
        d1.set(3, 0, Disparity::Valid(-2));
        d2.set(1, 0, Disparity::Valid(5));
        let out = filter_occlusions(&d1, &d2, 0);
        assert_eq!(out.get(3, 0), Disparity::Occluded);
    }

    #[test]
    fn out_of_bounds_target_column_is_occluded() {
        let mut d1 = DisparityMap::filled_occluded(4, 1);
        let d2 = DisparityMap::filled_occluded(4, 1);
        d1.set(0, 0, Disparity::Valid(-3)); // x+d = -3, out of bounds
        let out = filter_occlusions(&d1, &d2, 0);
        assert_eq!(out.get(0, 0), Disparity::Occluded);
    }

    /// S5: tolDisp effectively infinite makes the filter an identity on D1.
    #[test]
    fn large_tolerance_is_identity() {
        let mut d1 = DisparityMap::filled_occluded(4, 1);
        let mut d2 = DisparityMap::filled_occluded(4, 1);
        d1.set(2, 0, Disparity::Valid(1));
        d2.set(3, 0, Disparity::Valid(-99));
        let out = filter_occlusions(&d1, &d2, i32::MAX);
        assert_eq!(out.get(2, 0), Disparity::Valid(1));
    }

    /// R2: applying the filter twice with the same tolerance is idempotent.
    #[test]
    fn idempotent_under_repeated_application() {
        let mut d1 = DisparityMap::filled_occluded(4, 1);
        let mut d2 = DisparityMap::filled_occluded(4, 1);
        d1.set(3, 0, Disparity::Valid(-2));
        d2.set(1, 0, Disparity::Valid(2));
        let once = filter_occlusions(&d1, &d2, 0);
        // Feeding the already-filtered D1 back in (with its own D2
        // unchanged) must reproduce the same result.
        let twice = filter_occlusions(&once, &d2, 0);
        for x in 0..4 {
            assert_eq!(once.get(x, 0), twice.get(x, 0));
        }
    }
}
