//! Explicit parameter structs and the weight-combination operator.
//!
//! Replaces macro-selected globals with plain structs/enums passed by value,
//! per the "pass an explicit parameter struct" design note.

use crate::error::{Error, Result};

/// Parameters controlling cost-volume construction and aggregation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchParams {
    pub tau_col: f32,
    pub tau_grad: f32,
    pub alpha: f32,
    pub gamma_col: f32,
    pub gamma_pos: f32,
    pub radius: u32,
}

impl Default for MatchParams {
    fn default() -> Self {
        MatchParams {
            tau_col: 30.0,
            tau_grad: 2.0,
            alpha: 0.9,
            gamma_col: 12.0,
            gamma_pos: 17.5,
            radius: 17,
        }
    }
}

impl MatchParams {
    /// Validate the invariants of §3: `tauCol>=0, tauGrad>=0, 0<=alpha<=1,
    /// gammaCol>0, gammaPos>0, radius>=0` (the last is automatic under `u32`).
    pub fn validate(&self) -> Result<()> {
        if self.tau_col < 0.0 {
            return Err(Error::InvalidParameter("tauCol must be >= 0".into()));
        }
        if self.tau_grad < 0.0 {
            return Err(Error::InvalidParameter("tauGrad must be >= 0".into()));
        }
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(Error::InvalidParameter("alpha must be in [0,1]".into()));
        }
        if self.gamma_col <= 0.0 {
            return Err(Error::InvalidParameter("gammaCol must be > 0".into()));
        }
        if self.gamma_pos <= 0.0 {
            return Err(Error::InvalidParameter("gammaPos must be > 0".into()));
        }
        Ok(())
    }
}

/// Parameters controlling occlusion filtering and weighted-median densification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostParams {
    pub tol_disp: i32,
    pub median_radius: u32,
    pub sigma_color: f32,
    pub sigma_space: f32,
}

impl Default for PostParams {
    fn default() -> Self {
        PostParams {
            tol_disp: 0,
            median_radius: 9,
            sigma_color: 25.5,
            sigma_space: 9.0,
        }
    }
}

impl PostParams {
    pub fn validate(&self) -> Result<()> {
        if self.tol_disp < 0 {
            return Err(Error::InvalidParameter("tolDisp must be >= 0".into()));
        }
        if self.sigma_color <= 0.0 {
            return Err(Error::InvalidParameter("sigmaColor must be > 0".into()));
        }
        if self.sigma_space <= 0.0 {
            return Err(Error::InvalidParameter("sigmaSpace must be > 0".into()));
        }
        Ok(())
    }
}

/// Weight-combination operator applied pointwise to (reference, target)
/// bilateral support weights before multiplying by cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Combinator {
    /// Uses only the reference support; the target support is never built.
    Left,
    Max,
    Min,
    #[default]
    Mult,
    Plus,
}

impl Combinator {
    /// Whether this operator needs a target support window at all. Only
    /// `Left` can skip building it (§4.F step 1).
    #[inline]
    pub fn needs_target_support(&self) -> bool {
        !matches!(self, Combinator::Left)
    }

    #[inline]
    pub fn combine(&self, a: f32, b: f32) -> f32 {
        match self {
            Combinator::Left => a,
            Combinator::Max => a.max(b),
            Combinator::Min => a.min(b),
            Combinator::Mult => a * b,
            Combinator::Plus => a + b,
        }
    }
}

/// CLI encoding of the weight-combination operator (the `-o` flag): `0`
/// maps to the default `Mult`, matching the flag's documented default
/// value `-o 0`.
impl TryFrom<i32> for Combinator {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(Combinator::Mult),
            1 => Ok(Combinator::Left),
            2 => Ok(Combinator::Max),
            3 => Ok(Combinator::Min),
            4 => Ok(Combinator::Plus),
            other => Err(Error::InvalidParameter(format!(
                "combinator code must be 0..=4, got {other}"
            ))),
        }
    }
}

/// Which side of a monotone-fill gap to prefer, per §4.H / §9's open question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillSense {
    /// sense=0: left-to-right camera motion, fill gaps with the max of the
    /// two bordering valid disparities.
    #[default]
    MaxX,
    /// sense=1: fill gaps with the min of the two bordering valid disparities.
    MinX,
}

impl TryFrom<i32> for FillSense {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(FillSense::MaxX),
            1 => Ok(FillSense::MinX),
            other => Err(Error::InvalidParameter(format!(
                "sense must be 0 or 1, got {other}"
            ))),
        }
    }
}
