//! StickHeat CLI: accumulate joystick heatmaps and inspect saved ones.
//!
//! Usage:
//!   stickheat run [OPTIONS]       Run the live accumulation loop
//!   stickheat render <FILE>       Render a saved heatmap file to PNG
//!   stickheat info <FILE>         Show heatmap statistics
//!   stickheat check               Check joystick availability
//!   stickheat config [--write]    Show or write the configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stickheat_common::config::AppConfig;
use stickheat_core::tone::ToneMode;
use stickheat_core::tuning::TuningParams;

mod commands;
mod control;

#[derive(Parser)]
#[command(
    name = "stickheat",
    about = "Two-stick joystick heatmaps with live tone mapping",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/stickheat/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the live accumulation loop
    Run {
        /// Tick rate in Hz (overrides tick.period_ms)
        #[arg(long)]
        hz: Option<u32>,

        /// Stop after this many ticks
        #[arg(long)]
        ticks: Option<u64>,

        /// Replay a JSONL snapshot script instead of reading a joystick
        #[arg(long)]
        script: Option<PathBuf>,

        /// Load saved heatmaps before starting
        #[arg(long)]
        load: Option<PathBuf>,

        /// Save heatmaps here when the loop stops
        #[arg(long)]
        save_on_exit: Option<PathBuf>,

        /// Write PNG frame snapshots under this directory
        #[arg(long)]
        snapshot_dir: Option<PathBuf>,

        /// Write one snapshot every N frames
        #[arg(long, default_value = "250")]
        snapshot_every: u64,

        /// Initial kernel scale
        #[arg(long, default_value = "0.1")]
        scale: f32,

        /// Initial kernel radius [1, 20]
        #[arg(long, default_value = "15")]
        radius: i32,

        /// Initial display saturation [0.05, 5.0]
        #[arg(long, default_value = "1.0")]
        saturation: f32,

        /// Initial tone mode: linear|log|histeq
        #[arg(long, default_value = "linear")]
        mode: ToneMode,

        /// Ignore control commands on stdin
        #[arg(long)]
        no_stdin: bool,
    },

    /// Render a saved heatmap file to left.png and right.png
    Render {
        /// Heatmap file written by `run`
        path: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Tone mode: linear|log|histeq
        #[arg(long, default_value = "linear")]
        mode: ToneMode,

        /// Display saturation [0.05, 5.0]
        #[arg(long, default_value = "1.0")]
        saturation: f32,

        /// File name prefix for the images
        #[arg(long, default_value = "")]
        prefix: String,
    },

    /// Show statistics for a saved heatmap file
    Info {
        /// Heatmap file written by `run`
        path: PathBuf,
    },

    /// Check joystick availability
    Check,

    /// Show the effective configuration
    Config {
        /// Write it to the config file
        #[arg(long)]
        write: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };

    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    stickheat_common::logging::init_logging(&logging);
    config.validate()?;

    match cli.command {
        Commands::Run {
            hz,
            ticks,
            script,
            load,
            save_on_exit,
            snapshot_dir,
            snapshot_every,
            scale,
            radius,
            saturation,
            mode,
            no_stdin,
        } => {
            let options = commands::run::RunOptions {
                hz,
                max_ticks: ticks,
                script,
                load,
                save_on_exit,
                snapshot_dir,
                snapshot_every,
                tuning: TuningParams::new(scale, radius, saturation, mode),
                stdin_controls: !no_stdin,
            };
            commands::run::run(config, options).await
        }
        Commands::Render {
            path,
            output,
            mode,
            saturation,
            prefix,
        } => commands::render::run(path, output, mode, saturation, prefix),
        Commands::Info { path } => commands::info::run(path),
        Commands::Check => commands::check::run(&config),
        Commands::Config { write } => commands::config::run(&config, cli.config, write),
    }
}
