//! `disparity`: CLI wrapper around the stereo matching pipeline (§6).

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;

use stereo_core::{Combinator, FillSense, MatchParams, PostParams};

#[derive(Debug, Parser)]
#[command(
    name = "disparity",
    about = "Yoon-Kweon adaptive-weight stereo disparity matcher"
)]
struct Opt {
    /// Left (reference) image
    im1: PathBuf,
    /// Right (target) image
    im2: PathBuf,
    /// Minimum disparity (inclusive)
    d_min: i32,
    /// Maximum disparity (inclusive)
    d_max: i32,
    /// Prefix for the three output TIFF files
    #[arg(default_value = "disparity")]
    out_prefix: String,

    /// Color-distance kernel gamma
    #[arg(long = "gcol", default_value_t = 12.0)]
    gamma_col: f32,
    /// Spatial-distance kernel gamma
    #[arg(long = "gpos", default_value_t = 17.5)]
    gamma_pos: f32,
    /// Support window radius
    #[arg(short = 'R', default_value_t = 17)]
    radius: u32,
    /// Color/gradient cost blend factor
    #[arg(short = 'A', default_value_t = 0.9)]
    alpha: f32,
    /// Color cost truncation
    #[arg(short = 't', default_value_t = 30.0)]
    tau_col: f32,
    /// Gradient cost truncation
    #[arg(short = 'g', default_value_t = 2.0)]
    tau_grad: f32,
    /// Weight-combination operator: 0=MULT 1=LEFT 2=MAX 3=MIN 4=PLUS
    #[arg(short = 'o', default_value_t = 0)]
    combinator: i32,
    /// Monotone-fill sense: 0=fillMaxX 1=fillMinX
    #[arg(short = 'O', default_value_t = 0)]
    sense: i32,
    /// Weighted-median densifier radius
    #[arg(short = 'r', default_value_t = 9)]
    median_radius: u32,
    /// Densifier color sigma
    #[arg(short = 'c', default_value_t = 25.5)]
    sigma_color: f32,
    /// Densifier spatial sigma
    #[arg(short = 's', default_value_t = 9.0)]
    sigma_space: f32,
}

fn main() -> ExitCode {
    env_logger::init();
    let opt = match Opt::try_parse() {
        Ok(opt) => opt,
        // --help/--version print and exit 0 via clap's own handling; any
        // other parse error is reported and exits 1, per the CLI's
        // documented exit-code contract (clap's own default is 2).
        Err(err)
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) =>
        {
            err.exit()
        }
        Err(err) => {
            let _ = err.print();
            return ExitCode::FAILURE;
        }
    };

    match run(&opt) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("disparity: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(opt: &Opt) -> Result<(), String> {
    if opt.d_min > opt.d_max {
        return Err(format!(
            "dMin ({}) must be <= dMax ({})",
            opt.d_min, opt.d_max
        ));
    }
    let combinator = Combinator::try_from(opt.combinator).map_err(|e| e.to_string())?;
    let sense = FillSense::try_from(opt.sense).map_err(|e| e.to_string())?;

    let match_params = MatchParams {
        tau_col: opt.tau_col,
        tau_grad: opt.tau_grad,
        alpha: opt.alpha,
        gamma_col: opt.gamma_col,
        gamma_pos: opt.gamma_pos,
        radius: opt.radius,
    };
    let post_params = PostParams {
        tol_disp: 0,
        median_radius: opt.median_radius,
        sigma_color: opt.sigma_color,
        sigma_space: opt.sigma_space,
    };

    log::info!("reading {} / {}", opt.im1.display(), opt.im2.display());
    let left_file = File::open(&opt.im1).map_err(|e| format!("{}: {e}", opt.im1.display()))?;
    let right_file = File::open(&opt.im2).map_err(|e| format!("{}: {e}", opt.im2.display()))?;
    let (left, right) = stereo_io::png::read_stereo_pair(left_file, right_file)
        .map_err(|e| e.to_string())?;

    log::info!(
        "matching {}x{} over d in [{}, {}]",
        left.width(),
        left.height(),
        opt.d_min,
        opt.d_max
    );
    let output = stereo_core::run(
        &left,
        &right,
        opt.d_min,
        opt.d_max,
        &match_params,
        &post_params,
        combinator,
        sense,
    )
    .map_err(|e| e.to_string())?;

    write_tif(&output.initial, &format!("{}.tif", opt.out_prefix))?;
    write_tif(&output.occluded, &format!("{}_occ.tif", opt.out_prefix))?;
    write_tif(&output.densified, &format!("{}_pp.tif", opt.out_prefix))?;

    Ok(())
}

fn write_tif(image: &stereo_core::Image, path: &str) -> Result<(), String> {
    let file = File::create(path).map_err(|e| format!("{path}: {e}"))?;
    stereo_io::tiff::write_tiff(image, BufWriter::new(file)).map_err(|e| format!("{path}: {e}"))
}
