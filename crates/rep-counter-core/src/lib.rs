// ABOUTME: Core types and constants for the rep counter
// ABOUTME: Foundation crate with error handling, the landmark model, exercise kinds and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors

#![deny(unsafe_code)]

//! # Rep Counter Core
//!
//! Foundation crate providing the shared types of the rep counter. Both the
//! classifier crate and the hosting application build on these, so this crate
//! is kept small and changes rarely.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Landmark layout and default rule thresholds
//! - **models**: Body landmarks, snapshots, exercise kinds, stages and feedback labels

/// Unified error handling system with standard error codes
pub mod errors;

/// Landmark layout constants and default rule thresholds
pub mod constants;

/// Core data models (`LandmarkSnapshot`, `ExerciseKind`, `FeedbackLabel`, etc.)
pub mod models;
