//! Motus CLI
//!
//! Simulate view animation presets offline and print their property traces.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod simulate;

use config::MotusConfig;
use simulate::{PresetArgs, PresetName};

#[derive(Parser)]
#[command(name = "motus")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Motus animation preset simulator", long_about = None)]
struct Cli {
    /// Preset to simulate
    #[arg(value_enum, required_unless_present = "print_config")]
    preset: Option<PresetName>,

    /// Configuration file, or a directory containing motus.toml
    #[arg(short, long, default_value = "motus.toml")]
    config: PathBuf,

    /// Preset duration in milliseconds (preset default when omitted)
    #[arg(short, long)]
    duration: Option<u32>,

    /// Simulated frame rate (overrides the config file)
    #[arg(long)]
    fps: Option<u32>,

    /// Target rotation in degrees for rotate-on-y
    #[arg(long, default_value = "180")]
    rotation: f32,

    /// Destination for move-to-position
    #[arg(long, default_value = "40", allow_negative_numbers = true)]
    x: f32,

    /// Destination for move-to-position
    #[arg(long, default_value = "30", allow_negative_numbers = true)]
    y: f32,

    /// Detach the view from its container after disappear
    #[arg(long)]
    remove: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mut config = MotusConfig::load(&cli.config)?;
    if let Some(fps) = cli.fps {
        if fps == 0 {
            anyhow::bail!("--fps must be greater than zero");
        }
        config.simulation.fps = fps;
    }

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let Some(preset) = cli.preset else {
        anyhow::bail!("No preset given");
    };

    let args = PresetArgs {
        duration_ms: cli.duration,
        rotation: cli.rotation,
        target_x: cli.x,
        target_y: cli.y,
        remove_from_parent: cli.remove,
    };

    let trace = simulate::run(preset, &args, config.presets, &config.simulation);

    let every = config.simulation.trace_every.max(1) as usize;
    let last = trace.frames.len().saturating_sub(1);
    let mut events = trace.events.iter().peekable();
    for (index, frame) in trace.frames.iter().enumerate() {
        while let Some(event) = events.next_if(|event| event.t_ms <= frame.t_ms) {
            println!("t={:.1} event={}", event.t_ms, event.label);
        }
        if index % every == 0 || index == last {
            println!("{frame}");
        }
    }
    for event in events {
        println!("t={:.1} event={}", event.t_ms, event.label);
    }

    if trace.capped {
        info!(
            "Stopped after {}ms; the preset was still running",
            config.simulation.max_ms
        );
    }

    Ok(())
}
