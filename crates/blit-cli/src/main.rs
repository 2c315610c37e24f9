//! blit - RGBA raster drawing from the command line
//!
//! Reports the detected blend kernels, renders a demo scene and applies
//! buffer transforms and blits to PNG files.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "blit")]
#[command(author, version, about = "RGBA raster drawing and compositing")]
#[command(long_about = "
Pixel-exact 2D drawing on RGBA8 images with alpha-aware blend modes.

Examples:
  blit info                               # CPU features and blend kernels
  blit info sprite.png                    # ... plus image details
  blit demo -o scene.png                  # Render the demo scene
  blit demo -o scene.png --scalar         # Same, scalar kernels only
  blit transform in.png -o out.png --rotate 90 --flip-h
  blit composite fg.png bg.png -o out.png --mode add --x 10 --y 20 --angle 30 --scale 0.5

Set BLIT_SIMD=off to disable the vector kernels, BLIT_SIMD_MIN_RUN to tune
the shortest vectorized run, RUST_LOG for log filtering.
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show CPU capabilities, kernel dispatch and optional image info
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Render a scene exercising every primitive
    Demo(DemoArgs),

    /// Flip, rotate or desaturate an image
    #[command(visible_alias = "t")]
    Transform(TransformArgs),

    /// Draw one image onto another
    #[command(visible_alias = "comp")]
    Composite(CompositeArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// Image to describe
    input: Option<PathBuf>,
}

#[derive(Args)]
struct DemoArgs {
    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Canvas width
    #[arg(long, default_value = "320")]
    width: i32,

    /// Canvas height
    #[arg(long, default_value = "240")]
    height: i32,

    /// Force scalar blend kernels
    #[arg(long)]
    scalar: bool,
}

#[derive(Args)]
struct TransformArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Flip horizontal
    #[arg(long)]
    flip_h: bool,

    /// Flip vertical
    #[arg(long)]
    flip_v: bool,

    /// Rotate clockwise: 90, 180, 270 (or -90)
    #[arg(short, long)]
    rotate: Option<i32>,

    /// Convert to greyscale
    #[arg(long)]
    grey: bool,
}

#[derive(Args)]
struct CompositeArgs {
    /// Foreground image
    fg: PathBuf,

    /// Background image
    bg: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Blend mode: set, mix, add, subtract, multiply
    #[arg(short, long, default_value = "mix")]
    mode: String,

    /// Left edge of the unrotated foreground
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    x: i32,

    /// Top edge of the unrotated foreground
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    y: i32,

    /// Rotation in degrees, clockwise
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    angle: f32,

    /// Uniform scale
    #[arg(long, default_value = "1.0")]
    scale: f32,

    /// Opacity (0-255)
    #[arg(long, default_value = "255")]
    opacity: u8,
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Demo(args) => commands::demo::run(args, cli.verbose),
        Commands::Transform(args) => commands::transform::run(args, cli.verbose),
        Commands::Composite(args) => commands::composite::run(args, cli.verbose),
    }
}
