// ABOUTME: Exercise vocabulary: supported exercise kinds, debounce stages and feedback labels
// ABOUTME: Parses user-facing exercise names and renders the fixed feedback strings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::errors::AppError;

/// Exercises the classifier knows how to count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    /// Knee-angle driven squat
    Squat,
    /// Wrist raised above shoulder
    HandRaise,
    /// Yoga tree pose, counted per held interval
    TreePose,
    /// Yoga warrior II, counted per held interval
    #[serde(rename = "warrior_ii")]
    WarriorII,
}

impl ExerciseKind {
    /// All supported exercises
    pub const ALL: [Self; 4] = [Self::Squat, Self::HandRaise, Self::TreePose, Self::WarriorII];

    /// Machine-friendly identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Squat => "squat",
            Self::HandRaise => "hand_raise",
            Self::TreePose => "tree_pose",
            Self::WarriorII => "warrior_ii",
        }
    }

    /// Name shown to the user
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Squat => "Squats",
            Self::HandRaise => "Hand Raises",
            Self::TreePose => "Yoga - Tree Pose",
            Self::WarriorII => "Yoga - Warrior II",
        }
    }

    /// Whether reps are counted by holding a pose rather than by a motion edge
    #[must_use]
    pub const fn is_hold_based(self) -> bool {
        matches!(self, Self::TreePose | Self::WarriorII)
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ExerciseKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "squat" | "squats" => Ok(Self::Squat),
            "hand_raise" | "hand_raises" | "handraise" => Ok(Self::HandRaise),
            "tree_pose" | "tree" | "yoga___tree_pose" => Ok(Self::TreePose),
            "warrior_ii" | "warrior_2" | "warrior" | "yoga___warrior_ii" => Ok(Self::WarriorII),
            _ => Err(AppError::invalid_exercise(s)),
        }
    }
}

/// Debounce stage of a motion-based exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Standing / raised position
    Up,
    /// Lowered position
    Down,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => f.write_str("up"),
            Self::Down => f.write_str("down"),
        }
    }
}

/// Feedback text shown next to the counter for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FeedbackLabel {
    /// No feedback this frame
    #[default]
    None,
    /// Squat: standing tall
    Good,
    /// Squat: at depth
    Lower,
    /// Hand raise: hand above shoulder
    Raised,
    /// Hand raise: hand at or below shoulder
    LowerHands,
    /// Yoga: pose held correctly
    GoodPose,
    /// Yoga: pose out of tolerance
    AdjustPose,
}

impl FeedbackLabel {
    /// Text to render, empty for [`FeedbackLabel::None`]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Good => "Good!",
            Self::Lower => "Lower!",
            Self::Raised => "Raised!",
            Self::LowerHands => "Lower Hands!",
            Self::GoodPose => "Good Pose!",
            Self::AdjustPose => "Adjust Pose!",
        }
    }

    /// Whether there is nothing to render
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for FeedbackLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FeedbackLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_parse_display_names() {
        for kind in ExerciseKind::ALL {
            assert_eq!(kind.display_name().parse::<ExerciseKind>().unwrap(), kind);
            assert_eq!(kind.as_str().parse::<ExerciseKind>().unwrap(), kind);
        }
        assert_eq!("  SQUATS ".parse::<ExerciseKind>().unwrap(), ExerciseKind::Squat);
        assert_eq!("warrior-2".parse::<ExerciseKind>().unwrap(), ExerciseKind::WarriorII);
    }

    #[test]
    fn test_unknown_exercise_fails_fast() {
        let err = "jumping jacks".parse::<ExerciseKind>().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidExerciseSelector);
    }

    #[test]
    fn test_hold_based() {
        assert!(!ExerciseKind::Squat.is_hold_based());
        assert!(!ExerciseKind::HandRaise.is_hold_based());
        assert!(ExerciseKind::TreePose.is_hold_based());
        assert!(ExerciseKind::WarriorII.is_hold_based());
    }

    #[test]
    fn test_feedback_label_text() {
        assert_eq!(FeedbackLabel::LowerHands.to_string(), "Lower Hands!");
        assert!(FeedbackLabel::None.is_empty());
        assert_eq!(
            serde_json::to_string(&FeedbackLabel::GoodPose).unwrap(),
            r#""Good Pose!""#
        );
        assert_eq!(
            serde_json::to_string(&ExerciseKind::WarriorII).unwrap(),
            r#""warrior_ii""#
        );
    }
}
