// ABOUTME: Main library entry point for the rep counter hosting application
// ABOUTME: Wires frame sources, clocks, sinks and the session registry around the classifier
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy
#![deny(unsafe_code)]

//! # Rep Counter
//!
//! Counts exercise repetitions from a stream of body landmarks produced by an
//! external pose detector. The classifier itself lives in
//! `rep-counter-intelligence`; this crate hosts it.
//!
//! ## Features
//!
//! - **Four exercises**: squats, hand raises, tree pose and Warrior II
//! - **Pull-based frames**: JSON-lines recordings or in-memory frame lists
//! - **Cooperative stop**: a shared stop signal checked between frames
//! - **Multi-session hosting**: one classifier per session, bounded registry
//! - **Structured output**: tracing events or one JSON report per frame
//!
//! ## Architecture
//!
//! - **Frames**: `FrameSource` implementations feeding landmark snapshots
//! - **Clock**: monotonic or manual time for frames without timestamps
//! - **Presentation**: `FeedbackSink` implementations receiving `FrameReport`s
//! - **Runner**: drives one classifier from a source to a sink
//! - **Sessions**: concurrent registry keyed by `SessionId`
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use rep_counter::clock::MonotonicClock;
//! use rep_counter::config::environment::AppConfig;
//! use rep_counter::errors::AppResult;
//! use rep_counter::frames::JsonLinesFrameSource;
//! use rep_counter::lifecycle::StopSignal;
//! use rep_counter::presentation::TracingSink;
//! use rep_counter::runner::SessionRunner;
//!
//! fn main() -> AppResult<()> {
//!     let config = AppConfig::from_env()?;
//!     let source = JsonLinesFrameSource::open("session.jsonl")?;
//!     let mut runner = SessionRunner::new(config.default_exercise, config.thresholds);
//!     let summary = runner.run(
//!         source,
//!         &MonotonicClock::new(),
//!         &mut TracingSink::default(),
//!         &StopSignal::new(),
//!     )?;
//!     println!("{} reps", summary.rep_count);
//!     Ok(())
//! }
//! ```

/// Monotonic and manual clocks
pub mod clock;

/// Environment configuration
pub mod config;

/// Application constants
pub mod constants;

/// Unified error handling system with standard error codes
pub mod errors;

/// Frame sources feeding landmark snapshots to a session
pub mod frames;

/// Cooperative cancellation
pub mod lifecycle;

/// Production logging and structured output
pub mod logging;

/// Per-frame reports and the sinks that receive them
pub mod presentation;

/// Drives one classifier from a frame source to a feedback sink
pub mod runner;

/// Concurrent registry of classifier sessions
pub mod sessions;

pub use rep_counter_core::models;
pub use rep_counter_intelligence as intelligence;
