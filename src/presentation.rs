// ABOUTME: Per-frame reports and the sinks that present them
// ABOUTME: Structured tracing output, JSON-lines output and an in-memory collector
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors

//! Presentation boundary
//!
//! The classifier only produces a count and a label. Sinks decide how those
//! reach a person; none of them know anything about screen layout.

use crate::errors::{AppError, AppResult, ErrorResponse};
use crate::logging::AppLogger;
use crate::runner::SessionSummary;
use rep_counter_core::models::{ExerciseKind, FeedbackLabel};
use rep_counter_intelligence::{RepEvent, SkipReason};
use serde::Serialize;
use std::io::Write;
use tracing::{info, trace};

/// Everything a presenter needs for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameReport {
    /// Zero-based frame index within the session
    pub frame_index: u64,
    /// Timestamp the classifier used, in milliseconds since session start
    pub timestamp_ms: u64,
    /// Active exercise
    pub exercise: ExerciseKind,
    /// Running repetition count after this frame
    pub rep_count: u32,
    /// Feedback text, empty when there is nothing to say
    pub feedback: FeedbackLabel,
    /// Transition observed on this frame
    pub event: RepEvent,
    /// Why the frame was not classified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<SkipReason>,
}

/// Receives one report per processed frame
pub trait FeedbackSink {
    /// Present one frame
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be delivered
    fn report(&mut self, report: &FrameReport) -> AppResult<()>;

    /// Called once when the session ends
    ///
    /// # Errors
    ///
    /// Returns an error if pending output cannot be flushed
    fn finish(&mut self, _summary: &SessionSummary) -> AppResult<()> {
        Ok(())
    }
}

/// Emits reports as tracing events
#[derive(Debug, Default)]
pub struct TracingSink;

impl FeedbackSink for TracingSink {
    fn report(&mut self, report: &FrameReport) -> AppResult<()> {
        if let Some(reason) = report.skipped {
            AppLogger::log_frame_skipped(report.frame_index, report.exercise, reason);
            return Ok(());
        }
        match report.event {
            RepEvent::RepCounted => {
                AppLogger::log_rep_counted(report.frame_index, report.exercise, report.rep_count);
            }
            RepEvent::HoldStarted | RepEvent::HoldBroken => {
                info!(
                    frame.index = %report.frame_index,
                    rep.exercise = %report.exercise.as_str(),
                    hold.event = ?report.event,
                    "Hold state changed"
                );
            }
            RepEvent::None => {
                trace!(
                    frame.index = %report.frame_index,
                    rep.feedback = %report.feedback,
                    "Frame classified"
                );
            }
        }
        Ok(())
    }

    fn finish(&mut self, summary: &SessionSummary) -> AppResult<()> {
        info!(
            session.frames = %summary.frames_processed,
            session.skipped = %summary.frames_skipped,
            session.reps = %summary.rep_count,
            session.duration_ms = %summary.duration_ms(),
            session.stopped = %summary.stopped,
            "Session finished"
        );
        Ok(())
    }
}

/// Writes one JSON object per frame, then the summary as the final line
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    /// Wrap a writer
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> FeedbackSink for JsonLinesSink<W> {
    fn report(&mut self, report: &FrameReport) -> AppResult<()> {
        serde_json::to_writer(&mut self.writer, report)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self, summary: &SessionSummary) -> AppResult<()> {
        serde_json::to_writer(&mut self.writer, &serde_json::json!({ "summary": summary }))?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Write an error as a single `{"error": ...}` line, for JSON-lines consumers
///
/// # Errors
///
/// Returns an error if the writer fails
pub fn write_error_line<W: Write>(writer: &mut W, error: &AppError) -> AppResult<()> {
    serde_json::to_writer(&mut *writer, &ErrorResponse::from(error))?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Keeps every report in memory
#[derive(Debug, Default)]
pub struct CollectingSink {
    /// Reports in arrival order
    pub reports: Vec<FrameReport>,
    /// Summary passed to `finish`, if the session ended
    pub summary: Option<SessionSummary>,
}

impl CollectingSink {
    /// Frame indices on which a repetition was counted
    #[must_use]
    pub fn counted_frames(&self) -> Vec<u64> {
        self.reports
            .iter()
            .filter(|r| r.event == RepEvent::RepCounted)
            .map(|r| r.frame_index)
            .collect()
    }
}

impl FeedbackSink for CollectingSink {
    fn report(&mut self, report: &FrameReport) -> AppResult<()> {
        self.reports.push(*report);
        Ok(())
    }

    fn finish(&mut self, summary: &SessionSummary) -> AppResult<()> {
        self.summary = Some(summary.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rep_counter_core::models::BodyPoint;

    fn report(event: RepEvent) -> FrameReport {
        FrameReport {
            frame_index: 7,
            timestamp_ms: 233,
            exercise: ExerciseKind::Squat,
            rep_count: 1,
            feedback: FeedbackLabel::Lower,
            event,
            skipped: None,
        }
    }

    #[test]
    fn test_json_lines_sink_writes_one_object_per_line() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.report(&report(RepEvent::RepCounted)).unwrap();
        sink.report(&FrameReport {
            skipped: Some(SkipReason::MissingLandmark(BodyPoint::LeftAnkle)),
            feedback: FeedbackLabel::None,
            event: RepEvent::None,
            ..report(RepEvent::None)
        })
        .unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["feedback"], "Lower!");
        assert_eq!(first["event"], "rep_counted");
        assert_eq!(first["exercise"], "squat");
        assert!(first.get("skipped").is_none());

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["feedback"], "");
        assert_eq!(second["skipped"]["point"], "LEFT_ANKLE");
    }

    #[test]
    fn test_error_line_carries_code_and_frame() {
        let error = AppError::invalid_format("line 4: expected value").with_frame_index(3);
        let mut output = Vec::new();
        write_error_line(&mut output, &error).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(value["error"]["code"], "INVALID_FORMAT");
        assert_eq!(value["error"]["frame_index"], 3);
        assert_eq!(value["error"]["message"], "line 4: expected value");
        assert!(value["error"].get("session_id").is_none());
    }

    #[test]
    fn test_collecting_sink_tracks_counted_frames() {
        let mut sink = CollectingSink::default();
        sink.report(&report(RepEvent::None)).unwrap();
        sink.report(&FrameReport {
            frame_index: 9,
            ..report(RepEvent::RepCounted)
        })
        .unwrap();
        assert_eq!(sink.counted_frames(), vec![9]);
    }
}
