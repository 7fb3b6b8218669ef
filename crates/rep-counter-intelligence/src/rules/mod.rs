// ABOUTME: Per-exercise classification rules mapping stage state plus landmarks to a step result
// ABOUTME: Motion rules debounce with a stage flag, hold rules with a dwell timer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors

//! # Exercise Rules
//!
//! One pure module per exercise. Each exposes the keypoints it reads, an
//! `extract` function pulling them out of a snapshot, and an `evaluate`
//! function computing the next stage or dwell state, whether a rep was
//! counted, and the feedback label. Nothing here holds state between calls.
//!
//! - `squat` and `hand_raise` are motion rules returning a [`MotionStep`]
//! - `tree_pose` and `warrior_ii` are hold rules built on [`hold::advance`]

/// Hand raise: wrist above shoulder, edge-triggered
pub mod hand_raise;
/// Shared dwell-timer logic for held poses
pub mod hold;
/// Squat: knee angle with an up/down stage
pub mod squat;
/// Tree pose: raised foot below the standing knee, aligned with the hip
pub mod tree_pose;
/// Warrior II: front knee bent near a right angle
pub mod warrior_ii;

use std::time::Duration;

use rep_counter_core::models::{FeedbackLabel, Stage};
use serde::{Deserialize, Serialize};

/// Transition observed while evaluating one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepEvent {
    /// Nothing notable happened
    #[default]
    None,
    /// The rep counter was incremented
    RepCounted,
    /// A held pose became correct and its dwell timer started
    HoldStarted,
    /// A held pose was broken before it counted
    HoldBroken,
}

/// Result of a motion rule for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionStep {
    /// Stage after this frame
    pub stage: Stage,
    /// `RepCounted` on the counting edge, otherwise `None`
    pub event: RepEvent,
    /// Feedback for this frame
    pub label: FeedbackLabel,
}

impl MotionStep {
    /// Whether this frame counted a rep
    #[must_use]
    pub fn counted(&self) -> bool {
        self.event == RepEvent::RepCounted
    }
}

/// Result of a hold rule for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldStep {
    /// Dwell timer start after this frame, `None` when not holding
    pub hold_start: Option<Duration>,
    /// Transition observed this frame
    pub event: RepEvent,
    /// Feedback for this frame
    pub label: FeedbackLabel,
}

impl HoldStep {
    /// Whether this frame counted a rep
    #[must_use]
    pub fn counted(&self) -> bool {
        self.event == RepEvent::RepCounted
    }
}
