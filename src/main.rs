mod engine;
mod error;
mod renderer;
mod shared;
mod sync;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::engine::config::Preset;
use crate::engine::GlitchConfig;
use crate::error::ConfigError;
use crate::shared::constants;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the letter-glitch animation
    Run {
        /// Palette color (repeatable), e.g. -c "#61dca3"
        #[arg(short, long = "color")]
        colors: Vec<String>,
        /// Milliseconds between mutation ticks
        #[arg(short, long)]
        speed: Option<u64>,
        /// Frame rate target
        #[arg(short, long, default_value_t = constants::DEFAULT_FPS)]
        fps: f64,
        /// Snap colors instead of blending them
        #[arg(long, default_value_t = false)]
        no_smooth: bool,
        /// Fix the random seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
        /// JSON preset file (defaults applied for missing fields)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Stop after this many seconds instead of waiting for a key
        #[arg(short, long)]
        duration: Option<u64>,
    },
    /// Query the terminal size as crossterm sees it
    TerminalSize,
}

/// Merge CLI flags over an optional preset over the built-in defaults.
fn build_config(
    colors: &[String],
    speed: Option<u64>,
    no_smooth: bool,
    seed: Option<u64>,
    preset: Option<Preset>,
) -> Result<GlitchConfig> {
    let preset = preset.unwrap_or_default();

    let palette: Vec<String> = if !colors.is_empty() {
        colors.to_vec()
    } else if let Some(colors) = preset.colors {
        colors
    } else {
        constants::DEFAULT_PALETTE
            .iter()
            .map(|c| c.to_string())
            .collect()
    };

    let tick_interval_ms = speed
        .or(preset.speed)
        .unwrap_or(constants::DEFAULT_TICK_INTERVAL_MS);
    let smooth = if no_smooth {
        false
    } else {
        preset.smooth.unwrap_or(true)
    };

    let mut config = GlitchConfig::from_hex_palette(&palette, tick_interval_ms, smooth)?;
    config.seed = seed;
    Ok(config)
}

/// Reject non-positive or non-finite frame rates before the animation loop
/// starts; the pacer divides by this value.
fn validate_fps(fps: f64) -> Result<f64, ConfigError> {
    if fps.is_finite() && fps > 0.0 {
        Ok(fps)
    } else {
        Err(ConfigError::InvalidFrameRate(fps))
    }
}

/// Load `letterglitch.config` from the working directory when present.
fn default_preset() -> Option<Preset> {
    let path = PathBuf::from(constants::CONFIG_FILE);
    if path.exists() {
        Preset::load(&path).ok()
    } else {
        None
    }
}

fn main() -> Result<()> {
    // 1. Initialize logger (error.log / debug.log)
    crate::utils::logger::init();

    // 2. Reset terminal state left over from a previous crash.
    // Errors are ignored because the terminal may not be in raw mode.
    let _ = crossterm::terminal::disable_raw_mode();
    let _ = crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen);

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            colors,
            speed,
            fps,
            no_smooth,
            seed,
            config,
            duration,
        } => {
            let preset = match config {
                Some(path) => Some(Preset::load(&path)?),
                None => default_preset(),
            };
            let config = build_config(&colors, speed, no_smooth, seed, preset)?;
            let fps = validate_fps(fps)?;
            let duration = duration.map(Duration::from_secs);
            crate::engine::runner::run(config, fps, duration)?;
        }
        Commands::TerminalSize => {
            let (cols, rows) = crossterm::terminal::size()?;
            println!("{}x{}", cols, rows);
        }
    }

    Ok(())
}
