// ABOUTME: Dwell-timer state machine shared by the held yoga poses
// ABOUTME: Counts one rep per uninterrupted hold and restarts the timer after every count
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors

use std::time::Duration;

use rep_counter_core::models::FeedbackLabel;

use super::{HoldStep, RepEvent};

/// Advance a dwell timer by one frame
///
/// While the pose is correct the timer starts on the first frame and counts a
/// rep once `now - start >= hold`; the timer is then cleared, so the next rep
/// needs a fresh full hold. Any incorrect frame clears the timer.
#[must_use]
pub fn advance(
    hold_start: Option<Duration>,
    pose_correct: bool,
    now: Duration,
    hold: Duration,
) -> HoldStep {
    if !pose_correct {
        return HoldStep {
            hold_start: None,
            event: if hold_start.is_some() {
                RepEvent::HoldBroken
            } else {
                RepEvent::None
            },
            label: FeedbackLabel::AdjustPose,
        };
    }

    let (start, event) = hold_start.map_or((now, RepEvent::HoldStarted), |start| {
        (start, RepEvent::None)
    });

    // A clock stepping backwards reads as zero elapsed
    if now.saturating_sub(start) >= hold {
        HoldStep {
            hold_start: None,
            event: RepEvent::RepCounted,
            label: FeedbackLabel::GoodPose,
        }
    } else {
        HoldStep {
            hold_start: Some(start),
            event,
            label: FeedbackLabel::GoodPose,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOLD: Duration = Duration::from_secs(2);

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_first_correct_frame_starts_timer() {
        let step = advance(None, true, ms(500), HOLD);
        assert_eq!(step.hold_start, Some(ms(500)));
        assert_eq!(step.event, RepEvent::HoldStarted);
        assert_eq!(step.label, FeedbackLabel::GoodPose);
    }

    #[test]
    fn test_counts_at_exact_boundary() {
        let step = advance(Some(ms(1_000)), true, ms(3_000), HOLD);
        assert!(step.counted());
        assert_eq!(step.hold_start, None);
    }

    #[test]
    fn test_incomplete_hold_keeps_start() {
        let step = advance(Some(ms(1_000)), true, ms(2_990), HOLD);
        assert!(!step.counted());
        assert_eq!(step.hold_start, Some(ms(1_000)));
        assert_eq!(step.event, RepEvent::None);
    }

    #[test]
    fn test_break_clears_timer() {
        let step = advance(Some(ms(1_000)), false, ms(1_500), HOLD);
        assert_eq!(step.hold_start, None);
        assert_eq!(step.event, RepEvent::HoldBroken);
        assert_eq!(step.label, FeedbackLabel::AdjustPose);

        let idle = advance(None, false, ms(1_600), HOLD);
        assert_eq!(idle.event, RepEvent::None);
    }

    #[test]
    fn test_clock_going_backwards_does_not_count() {
        let step = advance(Some(ms(5_000)), true, ms(4_000), HOLD);
        assert!(!step.counted());
        assert_eq!(step.hold_start, Some(ms(5_000)));
    }
}
