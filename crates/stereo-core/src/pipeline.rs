//! End-to-end wiring of the stereo matching pipeline: the single function
//! the core exposes to its CLI wrapper (§6).

use crate::aggregate::aggregate;
use crate::cost::CostVolume;
use crate::densify::densify;
use crate::error::{Error, Result};
use crate::fill::monotone_fill;
use crate::gradient::horizontal_gradient;
use crate::image::Image;
use crate::occlusion::filter_occlusions;
use crate::params::{Combinator, FillSense, MatchParams, PostParams};
use crate::stage::to_output_image;
use crate::tables::KernelTables;

/// The three persisted outputs named in §6: the initial dense disparity
/// map, the map with occlusions marked, and the final densified map.
pub struct PipelineOutput {
    pub initial: Image,
    pub occluded: Image,
    pub densified: Image,
}

/// Run the full pipeline on a rectified stereo pair.
#[allow(clippy::too_many_arguments)]
pub fn run(
    left: &Image,
    right: &Image,
    d_min: i32,
    d_max: i32,
    match_params: &MatchParams,
    post_params: &PostParams,
    combinator: Combinator,
    fill_sense: FillSense,
) -> Result<PipelineOutput> {
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
    match_params.validate()?;
    post_params.validate()?;

    let gray_left = left.to_grayscale()?;
    let gray_right = right.to_grayscale()?;
    let grad_left = horizontal_gradient(&gray_left)?;
    let grad_right = horizontal_gradient(&gray_right)?;

    let cost_volume = CostVolume::build(
        left,
        right,
        &grad_left,
        &grad_right,
        d_min,
        d_max,
        match_params,
    )?;

    let tables = KernelTables::build(
        left.channels(),
        match_params.gamma_col,
        match_params.gamma_pos,
        match_params.radius,
        1.0,
    );

    let result = aggregate(
        left,
        right,
        &cost_volume,
        &tables,
        match_params.radius,
        d_min,
        d_max,
        combinator,
    );

    let initial = to_output_image(&result.d1, d_min, d_max);

    let occlusion_filtered =
        filter_occlusions(&result.d1, &result.d2, post_params.tol_disp);
    let occluded = to_output_image(&occlusion_filtered, d_min, d_max);

    let disp_dense = monotone_fill(&occlusion_filtered, fill_sense);
    let densified_map = densify(
        &occlusion_filtered,
        &disp_dense,
        left,
        post_params,
        d_min,
        d_max,
    );
    let densified = to_output_image(&densified_map, d_min, d_max);

    Ok(PipelineOutput {
        initial,
        occluded,
        densified,
    })
}
