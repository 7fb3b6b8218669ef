// ABOUTME: Exercise classification engine for the rep counter
// ABOUTME: Geometry, per-exercise rules and the per-session classifier state machine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors

#![deny(unsafe_code)]

//! # Rep Counter Intelligence
//!
//! Turns a stream of landmark snapshots into rep counts and feedback labels.
//! Everything in this crate is synchronous and free of I/O; the hosting
//! application supplies frames, timestamps and a place to show results.

/// Threshold configuration with environment overrides
pub mod config;

/// Joint angle computation
pub mod geometry;

/// Per-exercise rules
pub mod rules;

/// Classifier state, frame dispatch and reset
pub mod session;

pub use config::{ConfigError, RuleThresholds};
pub use geometry::{angle_at, Point2};
pub use rules::RepEvent;
pub use session::{
    process_frame, process_frame_with, required_points, reset, ClassifierState, FrameOutcome,
    RepClassifier, SkipReason,
};
