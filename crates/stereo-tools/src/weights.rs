//! `weights`: renders a single bilateral support window as a grayscale PNG.
//!
//! Out of `stereo-core`'s scope per §1; uses the visualizer's `alpha=2`
//! spatial-kernel exponent (§3/§9), distinct from the aggregator's `alpha=1`.

use std::fs::File;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;

use stereo_core::{KernelTables, Window};

#[derive(Debug, Parser)]
#[command(name = "weights", about = "Visualize a single bilateral support window")]
struct Opt {
    /// Source image (PNG)
    image: std::path::PathBuf,
    /// Center column
    x: u32,
    /// Center row
    y: u32,
    /// Support window radius
    #[arg(short = 'R', default_value_t = 17)]
    radius: u32,
    /// Color-distance kernel gamma
    #[arg(long = "gcol", default_value_t = 12.0)]
    gamma_col: f32,
    /// Spatial-distance kernel gamma
    #[arg(long = "gpos", default_value_t = 17.5)]
    gamma_pos: f32,
    /// Output PNG path
    #[arg(default_value = "weights.png")]
    out: std::path::PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let opt = match Opt::try_parse() {
        Ok(opt) => opt,
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
            eprintln!("weights: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(opt: &Opt) -> Result<(), String> {
    let file = File::open(&opt.image).map_err(|e| format!("{}: {e}", opt.image.display()))?;
    let image = stereo_io::png::read_png(file).map_err(|e| e.to_string())?;

    if opt.x >= image.width() || opt.y >= image.height() {
        return Err(format!(
            "center ({}, {}) is outside the {}x{} image",
            opt.x,
            opt.y,
            image.width(),
            image.height()
        ));
    }

    let tables = KernelTables::build(
        image.channels(),
        opt.gamma_col,
        opt.gamma_pos,
        opt.radius,
        2.0,
    );
    let mut window = Window::new(opt.radius);
    window.fill(&image, opt.x as i32, opt.y as i32, &tables);

    let side = (2 * opt.radius + 1) as usize;
    let mut samples = vec![0u8; side * side];
    let r = opt.radius as i32;
    for (row, dy) in (-r..=r).enumerate() {
        for (col, dx) in (-r..=r).enumerate() {
            let w = window.get(dx, dy).clamp(0.0, 1.0);
            samples[row * side + col] = (w * 255.0).round() as u8;
        }
    }

    let out_file = File::create(&opt.out).map_err(|e| format!("{}: {e}", opt.out.display()))?;
    stereo_io::png::write_gray8(side as u32, side as u32, &samples, out_file)
        .map_err(|e| e.to_string())
}
