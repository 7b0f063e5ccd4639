//! gapfill CLI

use anyhow::{Context, Result};
use clap::Parser;
use gapfill::{
    image_io, process_image, FillConfig, GapValue, ImageFormat, InterpolationMethod, OutputDepth,
};
use std::path::PathBuf;
use std::time::Instant;

/// gapfill: fill gap pixels in RGB images by row and column interpolation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input image file (TIFF, PNG, JPEG)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file (default: INPUT_filled.EXT)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Interpolation method: previous, next, nearest, linear, spline, pchip
    #[arg(short, long, value_name = "METHOD")]
    method: Option<InterpolationMethod>,

    /// Gap value: a scalar ("0"), one value per channel ("255,0,255") or "nan"
    #[arg(short, long, value_name = "VALUE", allow_hyphen_values = true)]
    gap_value: Option<GapValue>,

    /// Output format: tiff, png, jpeg (default: same as input)
    #[arg(short = 'f', long, value_name = "FORMAT")]
    format: Option<String>,

    /// Keep the input sample type instead of writing 8-bit output
    #[arg(long)]
    keep_depth: bool,

    /// Interpolate on a single thread
    #[arg(long)]
    sequential: bool,

    /// Suppress progress output
    #[arg(short, long)]
    quiet: bool,

    /// Show timing information
    #[arg(long)]
    benchmark: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if !cli.input.exists() {
        anyhow::bail!("Input file does not exist: {}", cli.input.display());
    }

    let output_path = if let Some(out) = cli.output {
        out
    } else {
        let fmt = cli
            .format
            .as_ref()
            .and_then(|f| ImageFormat::from_extension(f));
        image_io::generate_output_path(&cli.input, fmt)
            .context("Failed to generate output path")?
    };

    let config = FillConfig {
        method: cli.method,
        gap_value: cli.gap_value,
        output: if cli.keep_depth {
            OutputDepth::Preserve
        } else {
            OutputDepth::Canonical
        },
        parallel: !cli.sequential,
    };

    if !cli.quiet {
        println!("gapfill v{}", env!("CARGO_PKG_VERSION"));
        println!("Input:  {}", cli.input.display());
        println!("Output: {}\n", output_path.display());
    }

    let start = Instant::now();
    let summary = process_image(&cli.input, &output_path, &config)
        .with_context(|| format!("Failed to fill {}", cli.input.display()))?;

    if !cli.quiet {
        println!("Gap pixels filled: {}", summary.gap_pixels - summary.unresolved_pixels);
        if summary.unresolved_pixels > 0 {
            println!(
                "Unresolved:        {} (no anchor for this method)",
                summary.unresolved_pixels
            );
        }
    }
    if cli.benchmark {
        println!("  Total time: {:.2}s", start.elapsed().as_secs_f32());
    }

    Ok(())
}
