// ABOUTME: Squat rule driven by the left knee angle with an up/down debounce stage
// ABOUTME: Counts on the transition into depth after having stood fully upright
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors

use rep_counter_core::models::{BodyPoint, FeedbackLabel, LandmarkSnapshot, MissingLandmark, Stage};

use super::{MotionStep, RepEvent};
use crate::config::RuleThresholds;
use crate::geometry::angle_at;

/// Keypoints this rule reads
pub const REQUIRED_POINTS: [BodyPoint; 3] =
    [BodyPoint::LeftHip, BodyPoint::LeftKnee, BodyPoint::LeftAnkle];

/// Knee angle at `LEFT_KNEE` between hip and ankle
///
/// # Errors
///
/// Returns [`MissingLandmark`] for the first unusable keypoint
pub fn extract(snapshot: &LandmarkSnapshot, min_visibility: f64) -> Result<f64, MissingLandmark> {
    let hip = snapshot.point(BodyPoint::LeftHip, min_visibility)?;
    let knee = snapshot.point(BodyPoint::LeftKnee, min_visibility)?;
    let ankle = snapshot.point(BodyPoint::LeftAnkle, min_visibility)?;
    Ok(angle_at(hip.into(), knee.into(), ankle.into()))
}

/// Evaluate one frame
///
/// The "stand up" check runs before the "count" check; the two angle bands
/// cannot overlap once thresholds are validated.
#[must_use]
pub fn evaluate(stage: Stage, knee_angle: f64, thresholds: &RuleThresholds) -> MotionStep {
    let mut next = stage;
    let mut event = RepEvent::None;

    if knee_angle > thresholds.squat_up_angle {
        next = Stage::Up;
    }
    if knee_angle < thresholds.squat_down_angle && next == Stage::Up {
        next = Stage::Down;
        event = RepEvent::RepCounted;
    }

    let label = if knee_angle < thresholds.squat_down_angle {
        FeedbackLabel::Lower
    } else if knee_angle > thresholds.squat_up_angle {
        FeedbackLabel::Good
    } else {
        FeedbackLabel::None
    };

    MotionStep {
        stage: next,
        event,
        label,
    }
}
