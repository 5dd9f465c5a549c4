//! `tiff2png`: renders a persisted float disparity TIFF as an 8-bit PNG
//! via affine rescaling (§6). NaN or out-of-range pixels render as cyan.

use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "tiff2png", about = "Render a float disparity TIFF as an 8-bit PNG")]
struct Opt {
    /// Input 32-bit float TIFF
    input: std::path::PathBuf,
    /// Output PNG path
    output: std::path::PathBuf,
    /// Minimum value of the rescaled domain
    v_min: f32,
    /// Maximum value of the rescaled domain
    v_max: f32,
    /// Minimum output gray level
    #[arg(default_value_t = 0.0)]
    gray_min: f32,
    /// Maximum output gray level
    #[arg(default_value_t = 255.0)]
    gray_max: f32,
}

const CYAN: [u8; 3] = [0, 255, 255];

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
            eprintln!("tiff2png: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(opt: &Opt) -> Result<(), String> {
    if opt.v_max <= opt.v_min {
        return Err(format!("vMax ({}) must be > vMin ({})", opt.v_max, opt.v_min));
    }

    let file = File::open(&opt.input).map_err(|e| format!("{}: {e}", opt.input.display()))?;
    let image = stereo_io::tiff::read_tiff(BufReader::new(file)).map_err(|e| e.to_string())?;

    let a = (opt.gray_max - opt.gray_min) / (opt.v_max - opt.v_min);
    let b = (opt.gray_min * opt.v_max - opt.gray_max * opt.v_min) / (opt.v_max - opt.v_min);

    let w = image.width();
    let h = image.height();
    let mut out = vec![0u8; (w as usize) * (h as usize) * 3];

    for y in 0..h {
        for x in 0..w {
            let value = image.get(x, y, 0).unwrap();
            let idx = ((y * w + x) * 3) as usize;
            if value.is_nan() || value < opt.v_min || value > opt.v_max {
                out[idx..idx + 3].copy_from_slice(&CYAN);
            } else {
                let gray = (a * value + b).clamp(0.0, 255.0).round() as u8;
                out[idx..idx + 3].copy_from_slice(&[gray, gray, gray]);
            }
        }
    }

    let out_file =
        File::create(&opt.output).map_err(|e| format!("{}: {e}", opt.output.display()))?;
    stereo_io::png::write_rgb8(w, h, &out, out_file).map_err(|e| e.to_string())
}
