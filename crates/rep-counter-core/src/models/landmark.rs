// ABOUTME: Named body keypoints and the immutable per-frame landmark snapshot
// ABOUTME: Handles detector buffers (flat float arrays) and visibility-gated point lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::landmarks::{FLAT_STRIDE_XYZ, FLAT_STRIDE_XYZV, LANDMARK_COUNT};
use crate::errors::{AppError, AppResult};

/// The 33 body keypoints produced by the pose detector, in detector index order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum BodyPoint {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl BodyPoint {
    /// All keypoints in detector index order
    pub const ALL: [Self; LANDMARK_COUNT] = [
        Self::Nose,
        Self::LeftEyeInner,
        Self::LeftEye,
        Self::LeftEyeOuter,
        Self::RightEyeInner,
        Self::RightEye,
        Self::RightEyeOuter,
        Self::LeftEar,
        Self::RightEar,
        Self::MouthLeft,
        Self::MouthRight,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftPinky,
        Self::RightPinky,
        Self::LeftIndex,
        Self::RightIndex,
        Self::LeftThumb,
        Self::RightThumb,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
        Self::LeftHeel,
        Self::RightHeel,
        Self::LeftFootIndex,
        Self::RightFootIndex,
    ];

    /// Detector index of this keypoint
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Keypoint at a detector index
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Detector name, e.g. `LEFT_SHOULDER`
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nose => "NOSE",
            Self::LeftEyeInner => "LEFT_EYE_INNER",
            Self::LeftEye => "LEFT_EYE",
            Self::LeftEyeOuter => "LEFT_EYE_OUTER",
            Self::RightEyeInner => "RIGHT_EYE_INNER",
            Self::RightEye => "RIGHT_EYE",
            Self::RightEyeOuter => "RIGHT_EYE_OUTER",
            Self::LeftEar => "LEFT_EAR",
            Self::RightEar => "RIGHT_EAR",
            Self::MouthLeft => "MOUTH_LEFT",
            Self::MouthRight => "MOUTH_RIGHT",
            Self::LeftShoulder => "LEFT_SHOULDER",
            Self::RightShoulder => "RIGHT_SHOULDER",
            Self::LeftElbow => "LEFT_ELBOW",
            Self::RightElbow => "RIGHT_ELBOW",
            Self::LeftWrist => "LEFT_WRIST",
            Self::RightWrist => "RIGHT_WRIST",
            Self::LeftPinky => "LEFT_PINKY",
            Self::RightPinky => "RIGHT_PINKY",
            Self::LeftIndex => "LEFT_INDEX",
            Self::RightIndex => "RIGHT_INDEX",
            Self::LeftThumb => "LEFT_THUMB",
            Self::RightThumb => "RIGHT_THUMB",
            Self::LeftHip => "LEFT_HIP",
            Self::RightHip => "RIGHT_HIP",
            Self::LeftKnee => "LEFT_KNEE",
            Self::RightKnee => "RIGHT_KNEE",
            Self::LeftAnkle => "LEFT_ANKLE",
            Self::RightAnkle => "RIGHT_ANKLE",
            Self::LeftHeel => "LEFT_HEEL",
            Self::RightHeel => "RIGHT_HEEL",
            Self::LeftFootIndex => "LEFT_FOOT_INDEX",
            Self::RightFootIndex => "RIGHT_FOOT_INDEX",
        }
    }
}

impl fmt::Display for BodyPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single keypoint in normalized image coordinates
///
/// `x` and `y` lie in `[0, 1]` with the origin at the top-left corner, so a
/// smaller `y` is higher in the image.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal position, 0 = left edge
    pub x: f64,
    /// Vertical position, 0 = top edge
    pub y: f64,
    /// Relative depth, when the detector reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    /// Detector confidence in `[0, 1]`, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
}

impl Landmark {
    /// Landmark with position only
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            visibility: None,
        }
    }

    /// Attach a visibility score
    #[must_use]
    pub const fn with_visibility(mut self, visibility: f64) -> Self {
        self.visibility = Some(visibility);
        self
    }

    /// Whether this landmark can be used at the given visibility threshold
    #[must_use]
    pub fn is_usable(&self, min_visibility: f64) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && !matches!(self.visibility, Some(v) if v < min_visibility)
    }
}

/// A required keypoint was absent or below the visibility threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("landmark {point} is missing or below the visibility threshold")]
pub struct MissingLandmark {
    /// The keypoint that could not be used
    pub point: BodyPoint,
}

/// Immutable set of keypoints for one processed frame
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSnapshot {
    points: BTreeMap<BodyPoint, Landmark>,
}

impl LandmarkSnapshot {
    /// Empty snapshot
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot with one more keypoint
    #[must_use]
    pub fn with_point(mut self, point: BodyPoint, landmark: Landmark) -> Self {
        self.points.insert(point, landmark);
        self
    }

    /// Build a snapshot from a flat detector buffer
    ///
    /// Accepts 33 × 3 floats (`x, y, z`) or 33 × 4 floats (`x, y, z, visibility`).
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error when the buffer has any other length.
    pub fn from_flat(data: &[f32]) -> AppResult<Self> {
        let stride = match data.len() {
            n if n == LANDMARK_COUNT * FLAT_STRIDE_XYZ => FLAT_STRIDE_XYZ,
            n if n == LANDMARK_COUNT * FLAT_STRIDE_XYZV => FLAT_STRIDE_XYZV,
            n => {
                return Err(AppError::invalid_input(format!(
                    "Invalid landmark buffer length: {n} (expected {} or {})",
                    LANDMARK_COUNT * FLAT_STRIDE_XYZ,
                    LANDMARK_COUNT * FLAT_STRIDE_XYZV
                )));
            }
        };

        let points = BodyPoint::ALL
            .iter()
            .zip(data.chunks_exact(stride))
            .map(|(&point, chunk)| {
                let landmark = Landmark {
                    x: f64::from(chunk[0]),
                    y: f64::from(chunk[1]),
                    z: Some(f64::from(chunk[2])),
                    visibility: chunk.get(3).map(|&v| f64::from(v)),
                };
                (point, landmark)
            })
            .collect();

        Ok(Self { points })
    }

    /// Raw keypoint lookup, ignoring visibility
    #[must_use]
    pub fn get(&self, point: BodyPoint) -> Option<&Landmark> {
        self.points.get(&point)
    }

    /// Keypoint lookup that rejects absent, non-finite or low-visibility points
    ///
    /// # Errors
    ///
    /// Returns [`MissingLandmark`] naming the point that cannot be used.
    pub fn point(
        &self,
        point: BodyPoint,
        min_visibility: f64,
    ) -> Result<Landmark, MissingLandmark> {
        self.points
            .get(&point)
            .filter(|landmark| landmark.is_usable(min_visibility))
            .copied()
            .ok_or(MissingLandmark { point })
    }

    /// Number of keypoints present
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no keypoints are present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate keypoints in detector index order
    pub fn iter(&self) -> impl Iterator<Item = (BodyPoint, &Landmark)> {
        self.points
            .iter()
            .map(|(&point, landmark)| (point, landmark))
    }
}

impl FromIterator<(BodyPoint, Landmark)> for LandmarkSnapshot {
    fn from_iter<I: IntoIterator<Item = (BodyPoint, Landmark)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip_matches_detector_layout() {
        assert_eq!(BodyPoint::LeftShoulder.index(), 11);
        assert_eq!(BodyPoint::LeftHip.index(), 23);
        assert_eq!(BodyPoint::RightKnee.index(), 26);
        assert_eq!(BodyPoint::LeftAnkle.index(), 27);
        for (i, point) in BodyPoint::ALL.iter().enumerate() {
            assert_eq!(point.index(), i);
            assert_eq!(BodyPoint::from_index(i), Some(*point));
        }
        assert_eq!(BodyPoint::from_index(LANDMARK_COUNT), None);
    }

    #[test]
    fn test_from_flat_xyz() {
        let mut data = vec![0.0_f32; LANDMARK_COUNT * 3];
        data[BodyPoint::LeftKnee.index() * 3] = 0.25;
        data[BodyPoint::LeftKnee.index() * 3 + 1] = 0.75;

        let snapshot = LandmarkSnapshot::from_flat(&data).unwrap();
        assert_eq!(snapshot.len(), LANDMARK_COUNT);
        let knee = snapshot.get(BodyPoint::LeftKnee).unwrap();
        assert!((knee.x - 0.25).abs() < 1e-6);
        assert!((knee.y - 0.75).abs() < 1e-6);
        assert_eq!(knee.visibility, None);
    }

    #[test]
    fn test_from_flat_with_visibility() {
        let data = vec![0.9_f32; LANDMARK_COUNT * 4];
        let snapshot = LandmarkSnapshot::from_flat(&data).unwrap();
        let nose = snapshot.get(BodyPoint::Nose).unwrap();
        assert!((nose.visibility.unwrap() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_from_flat_rejects_bad_length() {
        let result = LandmarkSnapshot::from_flat(&[0.0; 98]);
        assert!(result.is_err());
        assert!(result.unwrap_err().message.contains("98"));
    }

    #[test]
    fn test_point_visibility_gate() {
        let snapshot = LandmarkSnapshot::new()
            .with_point(BodyPoint::LeftWrist, Landmark::new(0.5, 0.2).with_visibility(0.3))
            .with_point(BodyPoint::LeftShoulder, Landmark::new(0.5, 0.4));

        assert_eq!(
            snapshot.point(BodyPoint::LeftWrist, 0.5),
            Err(MissingLandmark {
                point: BodyPoint::LeftWrist
            })
        );
        assert!(snapshot.point(BodyPoint::LeftWrist, 0.2).is_ok());
        // No reported visibility means the point is trusted
        assert!(snapshot.point(BodyPoint::LeftShoulder, 0.9).is_ok());
        assert!(snapshot.point(BodyPoint::LeftHip, 0.0).is_err());
    }

    #[test]
    fn test_non_finite_point_is_missing() {
        let snapshot =
            LandmarkSnapshot::new().with_point(BodyPoint::LeftHip, Landmark::new(f64::NAN, 0.5));
        assert!(snapshot.point(BodyPoint::LeftHip, 0.0).is_err());
    }

    #[test]
    fn test_snapshot_json_uses_detector_names() {
        let snapshot =
            LandmarkSnapshot::new().with_point(BodyPoint::RightHip, Landmark::new(0.4, 0.6));
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(json, r#"{"RIGHT_HIP":{"x":0.4,"y":0.6}}"#);

        let parsed: LandmarkSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }
}
