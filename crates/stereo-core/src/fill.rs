//! Monotone per-row fill, the pre-densification baseline (§4.H).

use crate::disparity_map::{Disparity, DisparityMap};
use crate::params::FillSense;

/// Scan each row left-to-right and right-to-left, replacing occluded
/// pixels with the nearest valid disparity in each direction. At a gap
/// bordered by two different valid values, `FillSense::MaxX` takes the
/// larger of the two, `FillSense::MinX` the smaller. A row with no valid
/// disparity at all is left entirely [`Disparity::Occluded`] (the tagged
/// stand-in for "left as the sentinel", since the literal sentinel would
/// otherwise read as a spurious valid sample downstream).
pub fn monotone_fill(d1: &DisparityMap, sense: FillSense) -> DisparityMap {
    let w = d1.width() as usize;
    let h = d1.height();
    let mut out = d1.clone();

    for y in 0..h {
        let row = d1.row(y);

        let mut left_fill = vec![None; w];
        let mut last = None;
        for (x, left_fill) in left_fill.iter_mut().enumerate() {
            if let Disparity::Valid(v) = row[x] {
                last = Some(v);
            }
            *left_fill = last;
        }

        let mut right_fill = vec![None; w];
        let mut next = None;
        for x in (0..w).rev() {
            if let Disparity::Valid(v) = row[x] {
                next = Some(v);
            }
            right_fill[x] = next;
        }

        for x in 0..w {
            if row[x].is_valid() {
                continue;
            }
            let filled = match (left_fill[x], right_fill[x]) {
                (Some(l), Some(r)) => Some(match sense {
                    FillSense::MaxX => l.max(r),
                    FillSense::MinX => l.min(r),
                }),
                (Some(l), None) => Some(l),
                (None, Some(r)) => Some(r),
                (None, None) => None,
            };
            if let Some(v) = filled {
                out.set(x as u32, y, Disparity::Valid(v));
            }
        }
    }

    out
}
