//! Handmouse CLI: replay landmark traces through the gesture pipeline.
//!
//! Usage:
//!   handmouse replay <TRACE>   Drive the pointer from a recorded trace
//!   handmouse instructions     Print the gesture guide
//!   handmouse config           Print the effective configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use handmouse_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "handmouse",
    about = "Control the mouse pointer with hand gestures",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/handmouse/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a landmark trace through the tracker
    Replay {
        /// Path to a JSONL landmark trace
        trace: PathBuf,

        /// Display width in pixels
        #[arg(long)]
        display_width: Option<u32>,

        /// Display height in pixels
        #[arg(long)]
        display_height: Option<u32>,

        /// Cursor smoothing constant (higher = smoother, slower)
        #[arg(long)]
        smoothening: Option<f64>,

        /// Cursor amplification factor
        #[arg(long)]
        amplification: Option<f64>,

        /// Skip the pause after a right click
        #[arg(long)]
        no_pause: bool,

        /// Sleep between frames to honor trace timestamps
        #[arg(long)]
        realtime: bool,

        /// Move the real system cursor (requires the `enigo` feature)
        #[arg(long)]
        os_cursor: bool,
    },

    /// Print the gesture guide
    Instructions,

    /// Print the effective configuration as JSON
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };

    handmouse_common::logging::init_cli_logging(&config.logging, cli.verbose);

    match cli.command {
        Commands::Replay {
            trace,
            display_width,
            display_height,
            smoothening,
            amplification,
            no_pause,
            realtime,
            os_cursor,
        } => {
            if let Some(width) = display_width {
                config.tracking.display_width = Some(width);
            }
            if let Some(height) = display_height {
                config.tracking.display_height = Some(height);
            }
            if let Some(k) = smoothening {
                config.tracking.smoothening = k;
            }
            if let Some(a) = amplification {
                config.tracking.amplification = a;
            }
            if no_pause {
                config.gestures.right_click_pause_secs = 0.0;
            }
            config.validate()?;

            commands::replay::run(
                config,
                commands::replay::ReplayOptions {
                    trace,
                    realtime,
                    os_cursor,
                },
            )
            .await
        }
        Commands::Instructions => commands::instructions::run(&config),
        Commands::Config => commands::config::run(&config),
    }
}
