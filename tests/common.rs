// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides quiet logging, landmark fixtures for each exercise and recording helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `rep_counter`

use std::io::Write;
use std::sync::Once;
use std::time::Duration;

use rep_counter::frames::{to_json_line, Frame};
use rep_counter::models::{BodyPoint, Landmark, LandmarkSnapshot};
use tempfile::NamedTempFile;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG controls the level; tests are quiet by default
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Left leg with the hip straight above the knee and the knee bent to `degrees`
pub fn leg_at(degrees: f64) -> LandmarkSnapshot {
    let direction = (degrees - 90.0).to_radians();
    LandmarkSnapshot::new()
        .with_point(BodyPoint::LeftHip, Landmark::new(0.5, 0.3))
        .with_point(BodyPoint::LeftKnee, Landmark::new(0.5, 0.5))
        .with_point(
            BodyPoint::LeftAnkle,
            Landmark::new(0.5 + 0.2 * direction.cos(), 0.5 + 0.2 * direction.sin()),
        )
}

/// Left wrist above (`raised`) or below the left shoulder
pub fn hands(raised: bool) -> LandmarkSnapshot {
    let wrist_y = if raised { 0.2 } else { 0.6 };
    LandmarkSnapshot::new()
        .with_point(BodyPoint::LeftShoulder, Landmark::new(0.45, 0.4))
        .with_point(BodyPoint::LeftWrist, Landmark::new(0.4, wrist_y))
}

/// Tree pose keypoints, in or out of tolerance
pub fn tree(correct: bool) -> LandmarkSnapshot {
    let ankle_x = if correct { 0.53 } else { 0.75 };
    LandmarkSnapshot::new()
        .with_point(BodyPoint::LeftAnkle, Landmark::new(ankle_x, 0.74))
        .with_point(BodyPoint::RightKnee, Landmark::new(0.55, 0.70))
        .with_point(BodyPoint::RightHip, Landmark::new(0.50, 0.50))
}

/// Timestamp of frame `i` at 30 fps, in whole milliseconds
pub fn at_30fps(i: u64) -> Duration {
    Duration::from_millis(i * 100 / 3)
}

/// Write frames to a temporary JSON-lines recording
pub fn write_recording(frames: &[Frame]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for frame in frames {
        writeln!(file, "{}", to_json_line(frame).unwrap()).unwrap();
    }
    file.flush().unwrap();
    file
}
