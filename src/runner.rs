// ABOUTME: Session runner driving one classifier from a frame source to a feedback sink
// ABOUTME: Honors the stop signal between frames and supports resets at chosen frame indices
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors

//! Session runner
//!
//! Pulls frames until the source ends or the stop signal trips. Each frame is
//! classified exactly once and reported exactly once, in order.

use crate::clock::Clock;
use crate::errors::AppResult;
use crate::frames::FrameSource;
use crate::lifecycle::StopSignal;
use crate::logging::AppLogger;
use crate::presentation::{FeedbackSink, FrameReport};
use rep_counter_core::models::ExerciseKind;
use rep_counter_intelligence::{RepClassifier, RuleThresholds};
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Totals for a finished session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    /// Exercise the session ran
    pub exercise: ExerciseKind,
    /// Frames pulled from the source and classified
    pub frames_processed: u64,
    /// Frames that had no body or lacked a required landmark
    pub frames_skipped: u64,
    /// Final repetition count
    pub rep_count: u32,
    /// Counter resets performed during the session
    pub resets: u32,
    /// Time between the first and last classified frame
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
    /// Whether the stop signal ended the session before the source did
    pub stopped: bool,
}

impl SessionSummary {
    /// Session duration in whole milliseconds
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        millis(self.duration)
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(millis(*duration))
}

/// Drives one classifier session
#[derive(Debug, Clone)]
pub struct SessionRunner {
    classifier: RepClassifier,
    exercise: ExerciseKind,
    reset_at: BTreeSet<u64>,
}

impl SessionRunner {
    /// Create a runner for `exercise` with the given thresholds
    #[must_use]
    pub fn new(exercise: ExerciseKind, thresholds: RuleThresholds) -> Self {
        Self {
            classifier: RepClassifier::new(thresholds),
            exercise,
            reset_at: BTreeSet::new(),
        }
    }

    /// Reset the counter just before classifying each of these frame indices
    #[must_use]
    pub fn with_reset_at(mut self, frames: impl IntoIterator<Item = u64>) -> Self {
        self.reset_at.extend(frames);
        self
    }

    /// Exercise this runner classifies
    #[must_use]
    pub const fn exercise(&self) -> ExerciseKind {
        self.exercise
    }

    /// Classifier state so far
    #[must_use]
    pub const fn classifier(&self) -> &RepClassifier {
        &self.classifier
    }

    /// Run until the source is exhausted or `stop` trips
    ///
    /// A frame's own timestamp wins over `clock`. Soft failures (no body,
    /// missing landmark) are reported and counted as skipped frames.
    ///
    /// # Errors
    ///
    /// Returns the first error from the source or the sink, tagged with the
    /// frame index it occurred at
    #[instrument(skip_all, fields(exercise = %self.exercise.as_str()))]
    pub fn run<S, C, K>(
        &mut self,
        mut source: S,
        clock: &C,
        sink: &mut K,
        stop: &StopSignal,
    ) -> AppResult<SessionSummary>
    where
        S: FrameSource,
        C: Clock + ?Sized,
        K: FeedbackSink + ?Sized,
    {
        let mut frames_processed: u64 = 0;
        let mut frames_skipped: u64 = 0;
        let mut resets: u32 = 0;
        let mut first_seen: Option<Duration> = None;
        let mut last_seen = Duration::ZERO;
        let mut stopped = false;

        info!("Session started");

        let mut frame_index: u64 = 0;
        loop {
            if stop.is_stopped() {
                stopped = true;
                break;
            }
            let Some(frame) = source.next() else {
                break;
            };
            let frame = frame.map_err(|e| e.with_frame_index(frame_index))?;

            if self.reset_at.contains(&frame_index) {
                AppLogger::log_counter_reset(frame_index, self.classifier.rep_count());
                self.classifier.reset();
                resets += 1;
            }

            let now = frame.timestamp.unwrap_or_else(|| clock.now());
            first_seen.get_or_insert(now);
            last_seen = now;

            let outcome = self
                .classifier
                .process(self.exercise, frame.landmarks.as_ref(), now);
            if outcome.skipped.is_some() {
                frames_skipped += 1;
            }
            frames_processed += 1;

            let report = FrameReport {
                frame_index,
                timestamp_ms: millis(now),
                exercise: self.exercise,
                rep_count: outcome.state.rep_count(),
                feedback: outcome.label,
                event: outcome.event,
                skipped: outcome.skipped,
            };
            sink.report(&report)
                .map_err(|e| e.with_frame_index(frame_index))?;
            frame_index += 1;
        }

        let summary = SessionSummary {
            exercise: self.exercise,
            frames_processed,
            frames_skipped,
            rep_count: self.classifier.rep_count(),
            resets,
            duration: first_seen.map_or(Duration::ZERO, |first| last_seen.saturating_sub(first)),
            stopped,
        };
        debug!(?summary, "Session summary");
        sink.finish(&summary)?;
        Ok(summary)
    }
}
