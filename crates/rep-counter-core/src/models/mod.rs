// ABOUTME: Core data models for landmarks, exercises and feedback
// ABOUTME: Re-exports the landmark model and exercise vocabulary used across the workspace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors

/// Body keypoints and per-frame landmark snapshots
pub mod landmark;

/// Exercise kinds, stages and feedback labels
pub mod exercise;

pub use exercise::{ExerciseKind, FeedbackLabel, Stage};
pub use landmark::{BodyPoint, Landmark, LandmarkSnapshot, MissingLandmark};
