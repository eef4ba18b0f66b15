// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sheetwerk — score-sheet digitizer
//
// Entry point. Initialises logging, loads the configuration, and dispatches
// to a subcommand. Logs go to stderr so JSON on stdout stays machine-readable.

mod args;
mod commands;
mod overlay;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sheetwerk_core::AppConfig;

use args::{InitConfigArgs, PreviewArgs, RectifyArgs, SnapArgs};
use commands::CliResult;

#[derive(Parser)]
#[command(name = "sheetwerk")]
#[command(about = "Flatten photographed score sheets with assisted corner placement")]
#[command(version)]
struct Cli {
    /// JSON configuration file; defaults apply to anything it omits.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rectify a photo from four corners.
    Rectify(RectifyArgs),

    /// Print the snap decision for one simulated corner move (JSON).
    Snap(SnapArgs),

    /// Draw the corner quad and parallelogram ghost onto the photo.
    Preview(PreviewArgs),

    /// Write the default configuration file.
    InitConfig(InitConfigArgs),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "sheetwerk failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    match cli.command {
        Commands::Rectify(args) => {
            let calibration = commands::rectify(&args, &config)?;
            println!("{}", serde_json::to_string_pretty(&calibration)?);
        }
        Commands::Snap(args) => {
            let feedback = commands::snap(&args, &config)?;
            println!("{}", serde_json::to_string_pretty(&feedback)?);
        }
        Commands::Preview(args) => commands::preview(&args)?,
        Commands::InitConfig(args) => commands::init_config(&args)?,
    }
    Ok(())
}
