//! Row-parallel winner-take-all aggregator (§4.F, the crux).

use rayon::prelude::*;

use crate::cost::CostVolume;
use crate::disparity_map::{Disparity, DisparityMap};
use crate::image::Image;
use crate::params::Combinator;
use crate::support::Window;
use crate::tables::KernelTables;

/// Forward (`D1`, over `left`'s grid) and backward (`D2`, over `right`'s
/// grid) disparity maps produced by one aggregation pass.
pub struct AggregateResult {
    pub d1: DisparityMap,
    pub d2: DisparityMap,
}

/// Run the adaptive-weight aggregator.
///
/// Rows are independent shared-nothing work units (§5): each row worker
/// owns its own ring of target-support windows and its own row-local
/// `E1`/`D1`/`E2`/`D2` scratch. `D2`/`E2` writes from row `y` only ever
/// target column `x+d` *within row `y`* (never another row), so collecting
/// one `(d1_row, d2_row)` pair per row and concatenating them in row order
/// reconstructs both full maps with no cross-row synchronization.
pub fn aggregate(
    left: &Image,
    right: &Image,
    cost_volume: &CostVolume,
    tables: &KernelTables,
    radius: u32,
    d_min: i32,
    d_max: i32,
    combinator: Combinator,
) -> AggregateResult {
    let w = left.width();
    let h = left.height();

    let rows: Vec<(Vec<Disparity>, Vec<Disparity>)> = (0..h)
        .into_par_iter()
        .map(|y| {
            compute_row(
                left,
                right,
                cost_volume,
                tables,
                radius,
                d_min,
                d_max,
                combinator,
                y,
            )
        })
        .collect();

    let mut d1_data = Vec::with_capacity((w as usize) * (h as usize));
    let mut d2_data = Vec::with_capacity((w as usize) * (h as usize));
    for (d1_row, d2_row) in rows {
        d1_data.extend(d1_row);
        d2_data.extend(d2_row);
    }

    AggregateResult {
        d1: DisparityMap::from_rows(w, h, d1_data),
        d2: DisparityMap::from_rows(w, h, d2_data),
    }
}

#[inline]
fn slot_of(target_col: i32, d_min: i32, nd: i32) -> usize {
    (target_col - d_min).rem_euclid(nd) as usize
}

#[allow(clippy::too_many_arguments)]
fn compute_row(
    left: &Image,
    right: &Image,
    cost_volume: &CostVolume,
    tables: &KernelTables,
    radius: u32,
    d_min: i32,
    d_max: i32,
    combinator: Combinator,
    y: u32,
) -> (Vec<Disparity>, Vec<Disparity>) {
    let w = left.width() as i32;
    let h = left.height() as i32;
    let r = radius as i32;
    let yi = y as i32;
    let needs_target = combinator.needs_target_support();
    let nd = if needs_target { d_max - d_min + 1 } else { 1 };

    let mut ring: Vec<Window> = (0..nd).map(|_| Window::new(radius)).collect();
    let mut w1 = Window::new(radius);

    let mut e1 = vec![f32::INFINITY; w as usize];
    let mut d1 = vec![Disparity::Occluded; w as usize];
    let mut e2 = vec![f32::INFINITY; w as usize];
    let mut d2 = vec![Disparity::Occluded; w as usize];

    if needs_target {
        // Pre-fill the full [dMin, dMax] window of target centers so that
        // every slot the x=0 read step needs is already populated; x=0's
        // own build of column dMax (step b) redundantly rebuilds one slot,
        // which is harmless (see the ring pre-fill design note).
        for tc in d_min..=d_max {
            let slot = slot_of(tc, d_min, nd);
            ring[slot].fill(right, tc, yi, tables);
        }
    }

    for x in 0..w {
        w1.fill(left, x, yi, tables);

        if needs_target {
            let tc = x + d_max;
            let slot = slot_of(tc, d_min, nd);
            ring[slot].fill(right, tc, yi, tables);
        }

        for d in d_min..=d_max {
            let xd = x + d;
            if xd < 0 || xd >= w {
                continue;
            }
            let layer = cost_volume
                .layer(d)
                .expect("d is within [dMin, dMax] by construction");
            let w2 = &ring[slot_of(xd, d_min, nd)];

            let mut num = 0.0f32;
            let mut den = 0.0f32;
            for dy in -r..=r {
                let py = yi + dy;
                if py < 0 || py >= h {
                    continue;
                }
                for dx in -r..=r {
                    let px = x + dx;
                    if px < 0 || px >= w {
                        continue;
                    }
                    if xd + dx < 0 || xd + dx >= w {
                        continue;
                    }
                    let weight = combinator.combine(w1.get(dx, dy), w2.get(dx, dy));
                    let cost = layer.get_unchecked(px as u32, py as u32, 0);
                    num += weight * cost;
                    den += weight;
                }
            }

            if den == 0.0 {
                continue;
            }
            let e = num / den;

            if e < e1[x as usize] {
                e1[x as usize] = e;
                d1[x as usize] = Disparity::Valid(d);
            }
            if e < e2[xd as usize] {
                e2[xd as usize] = e;
                d2[xd as usize] = Disparity::Valid(-d);
            }
        }
    }

    (d1, d2)
}
