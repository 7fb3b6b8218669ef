// ABOUTME: Warrior II rule checking that the front knee is bent close to a right angle
// ABOUTME: Uses its own dwell timer so it never interferes with tree pose
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors

use std::time::Duration;

use rep_counter_core::models::{BodyPoint, LandmarkSnapshot, MissingLandmark};

use super::{hold, HoldStep};
use crate::config::RuleThresholds;
use crate::geometry::angle_at;

/// Keypoints this rule reads (front leg is the left leg)
pub const REQUIRED_POINTS: [BodyPoint; 3] =
    [BodyPoint::LeftHip, BodyPoint::LeftKnee, BodyPoint::LeftAnkle];

/// Front knee angle at `LEFT_KNEE` between hip and ankle
///
/// # Errors
///
/// Returns [`MissingLandmark`] for the first unusable keypoint
pub fn extract(snapshot: &LandmarkSnapshot, min_visibility: f64) -> Result<f64, MissingLandmark> {
    let hip = snapshot.point(BodyPoint::LeftHip, min_visibility)?;
    let front_knee = snapshot.point(BodyPoint::LeftKnee, min_visibility)?;
    let front_ankle = snapshot.point(BodyPoint::LeftAnkle, min_visibility)?;
    Ok(angle_at(hip.into(), front_knee.into(), front_ankle.into()))
}

/// Whether the knee angle lies strictly inside the configured band
#[must_use]
pub fn is_correct(knee_angle: f64, thresholds: &RuleThresholds) -> bool {
    thresholds.warrior_min_angle < knee_angle && knee_angle < thresholds.warrior_max_angle
}

/// Evaluate one frame
#[must_use]
pub fn evaluate(
    hold_start: Option<Duration>,
    knee_angle: f64,
    now: Duration,
    thresholds: &RuleThresholds,
) -> HoldStep {
    hold::advance(
        hold_start,
        is_correct(knee_angle, thresholds),
        now,
        thresholds.hold_duration,
    )
}
