// ABOUTME: Hand raise rule comparing the left wrist height with the left shoulder
// ABOUTME: Counts once per raise; lowering is a level condition that re-arms the counter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors

use rep_counter_core::models::{BodyPoint, FeedbackLabel, LandmarkSnapshot, MissingLandmark, Stage};

use super::{MotionStep, RepEvent};

/// Keypoints this rule reads
pub const REQUIRED_POINTS: [BodyPoint; 2] = [BodyPoint::LeftWrist, BodyPoint::LeftShoulder];

/// Vertical positions the rule compares
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandRaiseInput {
    /// `LEFT_WRIST.y`
    pub wrist_y: f64,
    /// `LEFT_SHOULDER.y`
    pub shoulder_y: f64,
}

impl HandRaiseInput {
    /// Smaller `y` is higher in the image
    #[must_use]
    pub fn is_raised(&self) -> bool {
        self.wrist_y < self.shoulder_y
    }
}

/// Pull wrist and shoulder heights from a snapshot
///
/// # Errors
///
/// Returns [`MissingLandmark`] for the first unusable keypoint
pub fn extract(
    snapshot: &LandmarkSnapshot,
    min_visibility: f64,
) -> Result<HandRaiseInput, MissingLandmark> {
    Ok(HandRaiseInput {
        wrist_y: snapshot.point(BodyPoint::LeftWrist, min_visibility)?.y,
        shoulder_y: snapshot.point(BodyPoint::LeftShoulder, min_visibility)?.y,
    })
}

/// Evaluate one frame
#[must_use]
pub fn evaluate(stage: Stage, input: HandRaiseInput) -> MotionStep {
    if input.is_raised() {
        let event = if stage == Stage::Up {
            RepEvent::None
        } else {
            RepEvent::RepCounted
        };
        MotionStep {
            stage: Stage::Up,
            event,
            label: FeedbackLabel::Raised,
        }
    } else {
        MotionStep {
            stage: Stage::Down,
            event: RepEvent::None,
            label: FeedbackLabel::LowerHands,
        }
    }
}
