//! Precomputed color- and spatial-distance exponential tables (§4.B).

/// Color- and spatial-distance lookup tables, built once per run and shared
/// by reference across every row worker — the same "build once, pass
/// `&self`" shape as `leptonica_filter::kernel::Kernel`.
#[derive(Debug, Clone)]
pub struct KernelTables {
    /// `dist_c[k] = exp(-k / (channels * gamma_col))`, indexed by rounded
    /// integer L1 color distance, `k` in `0..=channels*255`.
    dist_c: Vec<f32>,
    /// `dist_p[(dy+r)*(2r+1)+(dx+r)] = exp(-alpha*sqrt(dx^2+dy^2)/gamma_pos)`.
    dist_p: Vec<f32>,
    radius: u32,
}

impl KernelTables {
    /// Build both tables. `alpha` is the spatial-kernel exponent: `1.0` for
    /// the aggregator, `2.0` for the single-window weight visualizer (§9,
    /// open question — the two forms are intentionally different tools).
    pub fn build(channels: u32, gamma_col: f32, gamma_pos: f32, radius: u32, alpha: f32) -> Self {
        let c = channels as usize;
        let n_color = c * 255 + 1;
        let mut dist_c = Vec::with_capacity(n_color);
        let e2 = (-1.0f32 / (channels as f32 * gamma_col)).exp();
        let mut v = 1.0f32;
        for _ in 0..n_color {
            dist_c.push(v);
            v *= e2;
        }

        let r = radius as i64;
        let side = (2 * r + 1) as usize;
        let mut dist_p = vec![0.0f32; side * side];
        for dy in -r..=r {
            for dx in -r..=r {
                let rho = ((dx * dx + dy * dy) as f32).sqrt();
                let w = (-alpha * rho / gamma_pos).exp();
                let idx = ((dy + r) as usize) * side + (dx + r) as usize;
                dist_p[idx] = w;
            }
        }

        KernelTables {
            dist_c,
            dist_p,
            radius,
        }
    }

    #[inline]
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Look up the color-distance weight for a rounded integer L1 distance.
    /// The rounding convention (§9, open question) is truncating `as usize`
    /// at the call site; this accessor just clamps to the table's range.
    #[inline]
    pub fn dist_c(&self, index: usize) -> f32 {
        self.dist_c[index.min(self.dist_c.len() - 1)]
    }

    /// Look up the spatial-distance weight for an offset `(dx, dy)` with
    /// `|dx| <= radius` and `|dy| <= radius`.
    #[inline]
    pub fn dist_p(&self, dx: i32, dy: i32) -> f32 {
        let r = self.radius as i32;
        let side = (2 * r + 1) as usize;
        let idx = ((dy + r) as usize) * side + (dx + r) as usize;
        self.dist_p[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dist_c_starts_at_one_and_decreases() {
        let t = KernelTables::build(3, 12.0, 17.5, 1, 1.0);
        assert_eq!(t.dist_c(0), 1.0);
        for k in 1..3 * 255 {
            assert!(t.dist_c(k) < t.dist_c(k - 1));
        }
    }

    #[test]
    fn dist_c_recurrence_holds() {
        let channels = 3u32;
        let gamma_col = 12.0f32;
        let t = KernelTables::build(channels, gamma_col, 17.5, 1, 1.0);
        let e2 = (-1.0f32 / (channels as f32 * gamma_col)).exp();
        for k in 0..3 * 255 {
            let expected = t.dist_c(k) * e2;
            assert!((t.dist_c(k + 1) - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn dist_p_maximal_at_center() {
        let t = KernelTables::build(3, 12.0, 17.5, 2, 1.0);
        let center = t.dist_p(0, 0);
        assert_eq!(center, 1.0);
        for dy in -2..=2 {
            for dx in -2..=2 {
                assert!(t.dist_p(dx, dy) <= center);
            }
        }
        // decreasing with Euclidean distance
        assert!(t.dist_p(1, 0) > t.dist_p(2, 0));
    }

    #[test]
    fn alpha_changes_spatial_falloff() {
        let t1 = KernelTables::build(3, 12.0, 17.5, 2, 1.0);
        let t2 = KernelTables::build(3, 12.0, 17.5, 2, 2.0);
        assert!(t2.dist_p(2, 0) < t1.dist_p(2, 0));
    }
}
