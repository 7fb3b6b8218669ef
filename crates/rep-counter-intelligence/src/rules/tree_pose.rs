// ABOUTME: Tree pose rule checking the raised foot against the standing knee and hip
// ABOUTME: Pose correctness feeds the shared dwell timer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors

use std::time::Duration;

use rep_counter_core::models::{BodyPoint, LandmarkSnapshot, MissingLandmark};

use super::{hold, HoldStep};
use crate::config::RuleThresholds;
use crate::geometry::Point2;

/// Keypoints this rule reads
pub const REQUIRED_POINTS: [BodyPoint; 3] =
    [BodyPoint::LeftAnkle, BodyPoint::RightKnee, BodyPoint::RightHip];

/// Keypoints of the raised and standing legs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreePoseInput {
    /// `LEFT_ANKLE`
    pub raised_ankle: Point2,
    /// `RIGHT_KNEE`
    pub standing_knee: Point2,
    /// `RIGHT_HIP`
    pub standing_hip: Point2,
}

impl TreePoseInput {
    /// Foot below the standing knee and horizontally under the standing hip
    #[must_use]
    pub fn is_correct(&self, x_tolerance: f64) -> bool {
        self.raised_ankle.y > self.standing_knee.y
            && (self.raised_ankle.x - self.standing_hip.x).abs() < x_tolerance
    }
}

/// Pull the three keypoints from a snapshot
///
/// # Errors
///
/// Returns [`MissingLandmark`] for the first unusable keypoint
pub fn extract(
    snapshot: &LandmarkSnapshot,
    min_visibility: f64,
) -> Result<TreePoseInput, MissingLandmark> {
    Ok(TreePoseInput {
        raised_ankle: snapshot.point(BodyPoint::LeftAnkle, min_visibility)?.into(),
        standing_knee: snapshot.point(BodyPoint::RightKnee, min_visibility)?.into(),
        standing_hip: snapshot.point(BodyPoint::RightHip, min_visibility)?.into(),
    })
}

/// Evaluate one frame
#[must_use]
pub fn evaluate(
    hold_start: Option<Duration>,
    input: &TreePoseInput,
    now: Duration,
    thresholds: &RuleThresholds,
) -> HoldStep {
    hold::advance(
        hold_start,
        input.is_correct(thresholds.tree_pose_x_tolerance),
        now,
        thresholds.hold_duration,
    )
}
