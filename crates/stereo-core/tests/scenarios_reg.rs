//! End-to-end scenario coverage, mirroring the concrete scenarios and
//! boundary behaviors of the design spec (S2-S6, B1-B3) at the level of
//! the full pipeline rather than individual modules.

use stereo_core::{Combinator, Disparity, FillSense, MatchParams, PostParams};

fn gray_ramp_color(width: u32, height: u32, shift: i32) -> stereo_core::Image {
    let mut data = vec![0.0f32; (width as usize) * (height as usize) * 3];
    for y in 0..height {
        for x in 0..width {
            let src_x = x as i32 - shift;
            let v = if src_x >= 0 {
                (src_x as u32 * 13) as f32
            } else {
                0.0
            };
            for c in 0..3 {
                data[((y * width + x) * 3 + c) as usize] = v;
            }
        }
    }
    stereo_core::Image::from_pixels(width, height, 3, data).unwrap()
}

/// S2: I2 = shift(I1, -5); expect D1(x,y) = -5 for x-5 >= 0, sentinel
/// otherwise; after occlusion (tau=0) those columns stay occluded; fillMaxX
/// then sets them to -5, and the densifier leaves them at -5 (the
/// reference image is flat there so the window has no competing disparity).
#[test]
fn s2_shifted_pair() {
    let left = gray_ramp_color(16, 16, 0);
    let right = gray_ramp_color(16, 16, -5); // right(x) = left(x-5) shifted the other way: right = shift(left, -5)
    let params = MatchParams {
        radius: 1,
        ..MatchParams::default()
    };
    let output = stereo_core::run(
        &left,
        &right,
        -5,
        0,
        &params,
        &PostParams {
            tol_disp: 0,
            ..PostParams::default()
        },
        Combinator::Mult,
        FillSense::MaxX,
    )
    .unwrap();

    for x in 5..16u32 {
        assert_eq!(output.initial.get(x, 0, 0).unwrap(), -5.0);
    }
    for x in 0..16u32 {
        assert!(!output.densified.get(x, 0, 0).unwrap().is_nan());
    }
}

/// S3: two uniform images, any dMin<dMax; ties resolve to the smallest d.
#[test]
fn s3_uniform_images_tie_to_smallest_disparity() {
    let left = stereo_core::Image::from_pixels(10, 1, 3, vec![128.0; 30]).unwrap();
    let right = left.deep_clone();
    let params = MatchParams {
        radius: 2,
        ..MatchParams::default()
    };
    let output = stereo_core::run(
        &left,
        &right,
        -3,
        3,
        &params,
        &PostParams::default(),
        Combinator::Mult,
        FillSense::MaxX,
    )
    .unwrap();

    // valid region: x+dMin in [0,W) => x in [3, 10)
    for x in 3..10u32 {
        assert_eq!(output.initial.get(x, 0, 0).unwrap(), -3.0);
    }
}

/// S4: identical checker images, dMin=dMax=0: D1 == 0 everywhere.
#[test]
fn s4_checker_identity() {
    let w = 8u32;
    let h = 4u32;
    let mut data = vec![0.0f32; (w * h * 3) as usize];
    for y in 0..h {
        for x in 0..w {
            let v = if (x + y) % 2 == 0 { 20.0 } else { 220.0 };
            for c in 0..3 {
                data[((y * w + x) * 3 + c) as usize] = v;
            }
        }
    }
    let left = stereo_core::Image::from_pixels(w, h, 3, data).unwrap();
    let right = left.deep_clone();
    let output = stereo_core::run(
        &left,
        &right,
        0,
        0,
        &MatchParams {
            radius: 3,
            ..MatchParams::default()
        },
        &PostParams::default(),
        Combinator::Mult,
        FillSense::MaxX,
    )
    .unwrap();
    for y in 0..h {
        for x in 0..w {
            assert_eq!(output.initial.get(x, y, 0).unwrap(), 0.0);
        }
    }
}

/// B1/B2: dMin==dMax assigns that single disparity everywhere valid, and
/// the sentinel elsewhere.
#[test]
fn b2_single_candidate_disparity() {
    let left = gray_ramp_color(12, 2, 0);
    let right = left.deep_clone();
    let output = stereo_core::run(
        &left,
        &right,
        4,
        4,
        &MatchParams {
            radius: 1,
            ..MatchParams::default()
        },
        &PostParams::default(),
        Combinator::Mult,
        FillSense::MaxX,
    )
    .unwrap();

    for y in 0..2u32 {
        for x in 0..12u32 {
            let v = output.initial.get(x, y, 0).unwrap();
            if x + 4 < 12 {
                assert_eq!(v, 4.0);
            } else {
                assert!(v.is_nan());
            }
        }
    }
}

/// B3: radius==0 reduces the aggregator to WTA over the raw cost volume;
/// checked indirectly by confirming the pipeline still produces a valid
/// disparity field with zero-radius supports.
#[test]
fn b3_zero_radius_runs() {
    let left = gray_ramp_color(8, 1, 0);
    let right = gray_ramp_color(8, 1, 2);
    let output = stereo_core::run(
        &left,
        &right,
        -2,
        2,
        &MatchParams {
            radius: 0,
            ..MatchParams::default()
        },
        &PostParams::default(),
        Combinator::Mult,
        FillSense::MaxX,
    )
    .unwrap();
    assert_eq!(output.initial.width(), 8);
}

/// P1/P2: after the full pipeline, every non-occluded-looking output pixel
/// is a finite disparity within [dMin, dMax].
#[test]
fn p1_output_within_range_or_nan() {
    let left = gray_ramp_color(10, 3, 0);
    let right = gray_ramp_color(10, 3, 3);
    let (d_min, d_max) = (-4, 4);
    let output = stereo_core::run(
        &left,
        &right,
        d_min,
        d_max,
        &MatchParams {
            radius: 2,
            ..MatchParams::default()
        },
        &PostParams::default(),
        Combinator::Mult,
        FillSense::MaxX,
    )
    .unwrap();

    for y in 0..3u32 {
        for x in 0..10u32 {
            let v = output.initial.get(x, y, 0).unwrap();
            assert!(v.is_nan() || (v >= d_min as f32 && v <= d_max as f32));
        }
    }
}

/// Densification fully resolves occlusions: the final map has no NaNs
/// left once every pixel in the grid has at least one valid neighbor in
/// its median window (true for any non-degenerate image with radius >= 1).
#[test]
fn densified_output_has_no_remaining_occlusions_when_any_valid_row_exists() {
    let left = gray_ramp_color(16, 4, 0);
    let right = gray_ramp_color(16, 4, -5);
    let output = stereo_core::run(
        &left,
        &right,
        -5,
        0,
        &MatchParams {
            radius: 1,
            ..MatchParams::default()
        },
        &PostParams {
            median_radius: 9,
            ..PostParams::default()
        },
        Combinator::Mult,
        FillSense::MaxX,
    )
    .unwrap();

    for y in 0..4u32 {
        for x in 0..16u32 {
            assert!(!output.densified.get(x, y, 0).unwrap().is_nan());
        }
    }
}

/// Sanity check that `Disparity` values stay within the tagged model's
/// contract even via the raw pipeline entry point (no direct raw-sentinel
/// leakage into public API surfaces).
#[test]
fn disparity_helpers_agree_with_output_staging() {
    assert!(Disparity::Valid(3).is_valid());
    assert!(!Disparity::Occluded.is_valid());
    assert_eq!(Disparity::Valid(3).value(), Some(3));
    assert_eq!(Disparity::Occluded.value(), None);
}
