// ABOUTME: rep-counter CLI - replays landmark recordings through the exercise classifier
// ABOUTME: Handles the replay and exercises subcommands, logging setup and Ctrl-C shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors
//!
//! Usage:
//! ```bash
//! # Count squats in a recorded session
//! rep-counter replay --input session.jsonl --exercise squat
//!
//! # Stream per-frame JSON reports from stdin
//! pose-detector | rep-counter replay --input - --exercise tree-pose --output json
//!
//! # Reset the counter before frames 120 and 300
//! rep-counter replay --input session.jsonl --exercise hand-raise --reset-at 120 --reset-at 300
//!
//! # List supported exercises and their thresholds
//! rep-counter exercises
//! ```

mod commands;
mod helpers;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use rep_counter::config::environment::AppConfig;
use rep_counter::errors::AppError;
use rep_counter::logging::LoggingConfig;
use rep_counter::presentation::write_error_line;
use tracing::error;

#[derive(Parser)]
#[command(
    name = "rep-counter",
    about = "Exercise repetition counter",
    long_about = "Counts squats, hand raises and yoga pose holds from body-landmark recordings."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Replay a JSON-lines landmark recording through the classifier
    Replay {
        /// Recording to read, or `-` for stdin
        #[arg(long, short = 'i')]
        input: PathBuf,

        /// Exercise to count (defaults to REP_DEFAULT_EXERCISE)
        #[arg(long, short = 'e')]
        exercise: Option<String>,

        /// Per-frame output format
        #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Log)]
        output: OutputFormat,

        /// Reset the counter just before this frame index (repeatable)
        #[arg(long = "reset-at", value_name = "FRAME")]
        reset_at: Vec<u64>,

        /// Override the pose hold duration in seconds
        #[arg(long)]
        hold_seconds: Option<f64>,
    },

    /// List supported exercises and the thresholds in effect
    Exercises,
}

/// Per-frame output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON report per frame on stdout
    Json,
    /// Structured log events on stderr
    Log,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.verbose();
    }
    if let Err(e) = logging.init() {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    // JSON consumers read errors from stdout as well
    let json_errors = matches!(
        cli.command,
        Command::Replay {
            output: OutputFormat::Json,
            ..
        }
    );

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("Error: {e:#}");
            let app_error = e
                .downcast::<AppError>()
                .unwrap_or_else(|other| AppError::internal(format!("{other:#}")));
            if json_errors {
                if let Err(write_error) = write_error_line(&mut io::stdout().lock(), &app_error) {
                    eprintln!("Failed to write error report: {write_error}");
                }
            }
            ExitCode::from(u8::try_from(app_error.code.exit_code()).unwrap_or(1))
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    match cli.command {
        Command::Replay {
            input,
            exercise,
            output,
            reset_at,
            hold_seconds,
        } => {
            let options = commands::replay::ReplayOptions {
                input,
                exercise,
                output,
                reset_at,
                hold_seconds,
            };
            commands::replay::run(&config, options).await?;
        }
        Command::Exercises => commands::exercises::list(&config),
    }

    Ok(())
}
