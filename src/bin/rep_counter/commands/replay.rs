// ABOUTME: Replay command for rep-counter
// ABOUTME: Streams a landmark recording through one classifier session with Ctrl-C support
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors

use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Duration;

use rep_counter::clock::MonotonicClock;
use rep_counter::config::environment::AppConfig;
use rep_counter::errors::{AppError, AppResult};
use rep_counter::frames::{FrameSource, JsonLinesFrameSource};
use rep_counter::lifecycle::StopSignal;
use rep_counter::models::ExerciseKind;
use rep_counter::presentation::{FeedbackSink, JsonLinesSink, TracingSink};
use rep_counter::runner::{SessionRunner, SessionSummary};
use tracing::{info, warn};

use crate::helpers::display::display_summary;
use crate::OutputFormat;

/// Parsed `replay` arguments
pub struct ReplayOptions {
    pub input: PathBuf,
    pub exercise: Option<String>,
    pub output: OutputFormat,
    pub reset_at: Vec<u64>,
    pub hold_seconds: Option<f64>,
}

/// Run a replay to completion or until Ctrl-C
pub async fn run(config: &AppConfig, options: ReplayOptions) -> anyhow::Result<SessionSummary> {
    let exercise = match options.exercise.as_deref() {
        Some(name) => name.parse::<ExerciseKind>()?,
        None => config.default_exercise,
    };

    let mut thresholds = config.thresholds.clone();
    if let Some(seconds) = options.hold_seconds {
        thresholds.hold_duration = Duration::try_from_secs_f64(seconds).map_err(|_| {
            AppError::invalid_input(format!("--hold-seconds must be non-negative, got {seconds}"))
        })?;
        thresholds.validate().map_err(AppError::from)?;
    }

    info!(
        exercise = exercise.as_str(),
        input = %options.input.display(),
        resets = options.reset_at.len(),
        "Starting replay"
    );

    let stop = StopSignal::new();
    let signal = stop.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => signal.stop(),
            Err(e) => warn!("Failed to listen for Ctrl-C: {e}"),
        }
    });

    let runner = SessionRunner::new(exercise, thresholds).with_reset_at(options.reset_at);
    let output = options.output;
    let input = options.input;
    let summary =
        tokio::task::spawn_blocking(move || replay_blocking(runner, &input, output, &stop))
            .await
            .map_err(|e| AppError::internal(format!("replay task failed: {e}")))??;

    if output == OutputFormat::Log {
        display_summary(&summary);
    }
    Ok(summary)
}

/// Frame sources and sinks wrap stdio locks, so they are built on the blocking thread
fn replay_blocking(
    mut runner: SessionRunner,
    input: &Path,
    output: OutputFormat,
    stop: &StopSignal,
) -> AppResult<SessionSummary> {
    let source: Box<dyn FrameSource> = if input == Path::new("-") {
        Box::new(JsonLinesFrameSource::stdin())
    } else {
        Box::new(JsonLinesFrameSource::open(input)?)
    };
    let mut sink: Box<dyn FeedbackSink> = match output {
        OutputFormat::Json => Box::new(JsonLinesSink::new(BufWriter::new(io::stdout()))),
        OutputFormat::Log => Box::new(TracingSink),
    };

    runner.run(source, &MonotonicClock::new(), sink.as_mut(), stop)
}
