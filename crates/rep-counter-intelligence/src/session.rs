// ABOUTME: Classifier session state and per-frame dispatch to the exercise rules
// ABOUTME: The only mutable state of the classifier; soft-fails on absent bodies and landmarks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors

//! # Classifier Session
//!
//! [`ClassifierState`] is a plain value: [`process_frame`] and [`reset`] take
//! one and return the next. [`RepClassifier`] owns a state together with its
//! thresholds for hosts that keep one long-lived classifier per session.
//!
//! Frames must be applied in order. Stage transitions do not commute, so a
//! host that receives frames concurrently has to serialize them per session.

use std::time::Duration;

use rep_counter_core::models::{
    BodyPoint, ExerciseKind, FeedbackLabel, LandmarkSnapshot, MissingLandmark, Stage,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::RuleThresholds;
use crate::rules::{hand_raise, squat, tree_pose, warrior_ii, HoldStep, MotionStep, RepEvent};

/// Rep counter plus the per-exercise debounce and dwell fields
///
/// Each exercise owns its own fields, so switching exercise mid-session never
/// disturbs another exercise's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierState {
    rep_count: u32,
    squat_stage: Stage,
    hand_raise_stage: Stage,
    tree_pose_hold_start: Option<Duration>,
    warrior_hold_start: Option<Duration>,
}

impl Default for ClassifierState {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassifierState {
    /// Fresh session state: zero reps, squat `Up`, hand raise `Down`, no holds
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rep_count: 0,
            squat_stage: Stage::Up,
            hand_raise_stage: Stage::Down,
            tree_pose_hold_start: None,
            warrior_hold_start: None,
        }
    }

    /// Reps counted since the session started or was last reset
    #[must_use]
    pub const fn rep_count(&self) -> u32 {
        self.rep_count
    }

    /// Current squat stage
    #[must_use]
    pub const fn squat_stage(&self) -> Stage {
        self.squat_stage
    }

    /// Current hand raise stage
    #[must_use]
    pub const fn hand_raise_stage(&self) -> Stage {
        self.hand_raise_stage
    }

    /// Dwell timer start of a hold-based exercise, `None` for motion exercises
    #[must_use]
    pub const fn hold_start(&self, exercise: ExerciseKind) -> Option<Duration> {
        match exercise {
            ExerciseKind::TreePose => self.tree_pose_hold_start,
            ExerciseKind::WarriorII => self.warrior_hold_start,
            ExerciseKind::Squat | ExerciseKind::HandRaise => None,
        }
    }

    fn count_rep(&mut self) {
        self.rep_count = self.rep_count.saturating_add(1);
    }
}

/// Why a frame was not evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "point", rename_all = "snake_case")]
pub enum SkipReason {
    /// The detector found no body in the frame
    NoBodyDetected,
    /// A keypoint the active rule needs was absent or low-confidence
    MissingLandmark(BodyPoint),
}

impl From<MissingLandmark> for SkipReason {
    fn from(missing: MissingLandmark) -> Self {
        Self::MissingLandmark(missing.point)
    }
}

/// Everything one frame produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameOutcome {
    /// State to carry into the next frame
    pub state: ClassifierState,
    /// Feedback to render for this frame
    pub label: FeedbackLabel,
    /// Transition observed this frame
    pub event: RepEvent,
    /// Set when the frame was skipped; state is then unchanged
    pub skipped: Option<SkipReason>,
}

impl FrameOutcome {
    fn skip(state: ClassifierState, reason: SkipReason) -> Self {
        Self {
            state,
            label: FeedbackLabel::None,
            event: RepEvent::None,
            skipped: Some(reason),
        }
    }

    /// Split into the new state and the feedback label
    #[must_use]
    pub const fn into_parts(self) -> (ClassifierState, FeedbackLabel) {
        (self.state, self.label)
    }
}

/// Keypoints the rule for `exercise` reads
#[must_use]
pub const fn required_points(exercise: ExerciseKind) -> &'static [BodyPoint] {
    match exercise {
        ExerciseKind::Squat => &squat::REQUIRED_POINTS,
        ExerciseKind::HandRaise => &hand_raise::REQUIRED_POINTS,
        ExerciseKind::TreePose => &tree_pose::REQUIRED_POINTS,
        ExerciseKind::WarriorII => &warrior_ii::REQUIRED_POINTS,
    }
}

/// Process one frame with the default thresholds
///
/// `snapshot` is `None` when the detector found no body. Skipped frames
/// return the input state unchanged with an empty label.
#[must_use]
pub fn process_frame(
    state: ClassifierState,
    exercise: ExerciseKind,
    snapshot: Option<&LandmarkSnapshot>,
    now: Duration,
) -> FrameOutcome {
    process_frame_with(state, exercise, snapshot, now, &RuleThresholds::default())
}

/// Process one frame with explicit thresholds
#[must_use]
pub fn process_frame_with(
    state: ClassifierState,
    exercise: ExerciseKind,
    snapshot: Option<&LandmarkSnapshot>,
    now: Duration,
    thresholds: &RuleThresholds,
) -> FrameOutcome {
    let Some(snapshot) = snapshot else {
        return FrameOutcome::skip(state, SkipReason::NoBodyDetected);
    };

    match apply_rule(state, exercise, snapshot, now, thresholds) {
        Ok(outcome) => outcome,
        Err(missing) => FrameOutcome::skip(state, missing.into()),
    }
}

fn apply_rule(
    mut state: ClassifierState,
    exercise: ExerciseKind,
    snapshot: &LandmarkSnapshot,
    now: Duration,
    thresholds: &RuleThresholds,
) -> Result<FrameOutcome, MissingLandmark> {
    let min_visibility = thresholds.min_visibility;

    let (label, event) = match exercise {
        ExerciseKind::Squat => {
            let knee_angle = squat::extract(snapshot, min_visibility)?;
            let step = squat::evaluate(state.squat_stage, knee_angle, thresholds);
            state.squat_stage = step.stage;
            apply_motion(&mut state, step)
        }
        ExerciseKind::HandRaise => {
            let input = hand_raise::extract(snapshot, min_visibility)?;
            let step = hand_raise::evaluate(state.hand_raise_stage, input);
            state.hand_raise_stage = step.stage;
            apply_motion(&mut state, step)
        }
        ExerciseKind::TreePose => {
            let input = tree_pose::extract(snapshot, min_visibility)?;
            let step = tree_pose::evaluate(state.tree_pose_hold_start, &input, now, thresholds);
            state.tree_pose_hold_start = step.hold_start;
            apply_hold(&mut state, step)
        }
        ExerciseKind::WarriorII => {
            let knee_angle = warrior_ii::extract(snapshot, min_visibility)?;
            let step = warrior_ii::evaluate(state.warrior_hold_start, knee_angle, now, thresholds);
            state.warrior_hold_start = step.hold_start;
            apply_hold(&mut state, step)
        }
    };

    Ok(FrameOutcome {
        state,
        label,
        event,
        skipped: None,
    })
}

fn apply_motion(state: &mut ClassifierState, step: MotionStep) -> (FeedbackLabel, RepEvent) {
    if step.counted() {
        state.count_rep();
    }
    (step.label, step.event)
}

fn apply_hold(state: &mut ClassifierState, step: HoldStep) -> (FeedbackLabel, RepEvent) {
    if step.counted() {
        state.count_rep();
    }
    (step.label, step.event)
}

/// Zero the counter and return every stage and timer to its initial value
#[must_use]
pub const fn reset(_state: ClassifierState) -> ClassifierState {
    ClassifierState::new()
}

/// Long-lived classifier for one session: state plus thresholds
#[derive(Debug, Clone)]
pub struct RepClassifier {
    state: ClassifierState,
    thresholds: RuleThresholds,
}

impl Default for RepClassifier {
    fn default() -> Self {
        Self::new(RuleThresholds::default())
    }
}

impl RepClassifier {
    /// Create a classifier with fresh state
    #[must_use]
    pub fn new(thresholds: RuleThresholds) -> Self {
        Self {
            state: ClassifierState::new(),
            thresholds,
        }
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &ClassifierState {
        &self.state
    }

    /// Thresholds in use
    #[must_use]
    pub const fn thresholds(&self) -> &RuleThresholds {
        &self.thresholds
    }

    /// Reps counted so far
    #[must_use]
    pub const fn rep_count(&self) -> u32 {
        self.state.rep_count
    }

    /// Feed one frame and keep the resulting state
    pub fn process(
        &mut self,
        exercise: ExerciseKind,
        snapshot: Option<&LandmarkSnapshot>,
        now: Duration,
    ) -> FrameOutcome {
        let outcome = process_frame_with(self.state, exercise, snapshot, now, &self.thresholds);

        match (outcome.skipped, outcome.event) {
            (Some(reason), _) => {
                trace!(exercise = exercise.as_str(), ?reason, "Frame skipped");
            }
            (None, RepEvent::RepCounted) => {
                debug!(
                    exercise = exercise.as_str(),
                    reps = outcome.state.rep_count,
                    "Rep counted"
                );
            }
            (None, RepEvent::HoldBroken) => {
                trace!(exercise = exercise.as_str(), "Hold broken");
            }
            (None, RepEvent::None | RepEvent::HoldStarted) => {}
        }

        self.state = outcome.state;
        outcome
    }

    /// Zero the counter and restore initial stages and timers
    pub fn reset(&mut self) {
        self.state = reset(self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rep_counter_core::models::Landmark;

    /// Hip straight above the knee, ankle placed so the knee angle is `degrees`
    fn squat_snapshot(degrees: f64) -> LandmarkSnapshot {
        let direction = (degrees - 90.0).to_radians();
        LandmarkSnapshot::new()
            .with_point(BodyPoint::LeftHip, Landmark::new(0.5, 0.3))
            .with_point(BodyPoint::LeftKnee, Landmark::new(0.5, 0.5))
            .with_point(
                BodyPoint::LeftAnkle,
                Landmark::new(0.5 + 0.2 * direction.cos(), 0.5 + 0.2 * direction.sin()),
            )
    }

    #[test]
    fn test_initial_state() {
        let state = ClassifierState::new();
        assert_eq!(state.rep_count(), 0);
        assert_eq!(state.squat_stage(), Stage::Up);
        assert_eq!(state.hand_raise_stage(), Stage::Down);
        assert_eq!(state.hold_start(ExerciseKind::TreePose), None);
        assert_eq!(state.hold_start(ExerciseKind::WarriorII), None);
    }

    #[test]
    fn test_no_body_leaves_state_unchanged() {
        let state = ClassifierState::new();
        let outcome = process_frame(state, ExerciseKind::Squat, None, Duration::ZERO);
        assert_eq!(outcome.state, state);
        assert_eq!(outcome.label, FeedbackLabel::None);
        assert_eq!(outcome.skipped, Some(SkipReason::NoBodyDetected));
    }

    #[test]
    fn test_required_points_cover_rules() {
        assert_eq!(required_points(ExerciseKind::HandRaise).len(), 2);
        assert!(required_points(ExerciseKind::TreePose).contains(&BodyPoint::RightKnee));
    }

    #[test]
    fn test_reset_restores_initial_values() {
        let mut classifier = RepClassifier::default();
        let outcome = classifier.process(
            ExerciseKind::Squat,
            Some(&squat_snapshot(80.0)),
            Duration::ZERO,
        );
        assert_eq!(outcome.event, RepEvent::RepCounted);
        assert_eq!(outcome.label, FeedbackLabel::Lower);
        assert_eq!(classifier.rep_count(), 1);
        assert_eq!(classifier.state().squat_stage(), Stage::Down);

        classifier.reset();
        assert_eq!(*classifier.state(), ClassifierState::new());
    }

    #[test]
    fn test_missing_landmark_reports_point() {
        let snapshot =
            LandmarkSnapshot::new().with_point(BodyPoint::LeftWrist, Landmark::new(0.5, 0.2));
        let outcome = process_frame(
            ClassifierState::new(),
            ExerciseKind::HandRaise,
            Some(&snapshot),
            Duration::ZERO,
        );
        assert_eq!(
            outcome.skipped,
            Some(SkipReason::MissingLandmark(BodyPoint::LeftShoulder))
        );
        assert_eq!(outcome.state, ClassifierState::new());
    }

    #[test]
    fn test_skip_reason_serialization() {
        let json =
            serde_json::to_string(&SkipReason::MissingLandmark(BodyPoint::LeftKnee)).unwrap();
        assert_eq!(json, r#"{"reason":"missing_landmark","point":"LEFT_KNEE"}"#);
    }
}
