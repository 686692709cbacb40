use anyhow::Context;
use clap::Parser;
use speedometer::{Speedometer, SpeedometerConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Animated speedometer gauge", long_about = None)]
struct Args {
    /// Window width in logical pixels
    #[arg(long, default_value_t = 800)]
    width: usize,

    /// Window height in logical pixels
    #[arg(long, default_value_t = 600)]
    height: usize,

    /// Upper bound on redraws per second
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Window title
    #[arg(long, default_value = "Speedometer")]
    title: String,

    /// Font for dial labels (TTF/OTF)
    #[arg(long, env = "SPEEDOMETER_FONT")]
    font: Option<PathBuf>,

    /// Font for the frame counter overlay (TTF/OTF)
    #[arg(long, env = "SPEEDOMETER_SERIF_FONT")]
    serif_font: Option<PathBuf>,

    /// Hide the frame counter in the top-left corner
    #[arg(long)]
    no_frame_counter: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = SpeedometerConfig::builder()
        .title(args.title)
        .window_width(args.width)
        .window_height(args.height)
        .max_framerate(args.fps)
        .maybe_font_path(args.font)
        .maybe_serif_font_path(args.serif_font)
        .show_frame_counter(!args.no_frame_counter)
        .build();

    Speedometer::new(config)
        .show()
        .context("speedometer window failed")
}
