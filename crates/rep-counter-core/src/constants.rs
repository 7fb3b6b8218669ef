// ABOUTME: Application-wide constants for landmark layout and exercise rule thresholds
// ABOUTME: Defaults here are the canonical values; configuration may override the thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors

//! Constants shared by the classifier and the hosting application.

/// Layout of the detector output
pub mod landmarks {
    /// Number of body keypoints emitted per detected body
    pub const LANDMARK_COUNT: usize = 33;

    /// Floats per landmark in a flat `x, y, z` buffer
    pub const FLAT_STRIDE_XYZ: usize = 3;

    /// Floats per landmark in a flat `x, y, z, visibility` buffer
    pub const FLAT_STRIDE_XYZV: usize = 4;
}

/// Default thresholds for the per-exercise rules
pub mod thresholds {
    /// Knee angle above which a squat is standing (degrees)
    pub const SQUAT_UP_ANGLE_DEG: f64 = 160.0;

    /// Knee angle below which a squat is at depth (degrees)
    pub const SQUAT_DOWN_ANGLE_DEG: f64 = 90.0;

    /// Maximum horizontal offset between raised ankle and standing hip (normalized)
    pub const TREE_POSE_X_TOLERANCE: f64 = 0.1;

    /// Warrior II front knee angle lower bound, exclusive (degrees)
    pub const WARRIOR_MIN_ANGLE_DEG: f64 = 80.0;

    /// Warrior II front knee angle upper bound, exclusive (degrees)
    pub const WARRIOR_MAX_ANGLE_DEG: f64 = 100.0;

    /// Continuous hold required to count one yoga pose repetition
    pub const POSE_HOLD_MILLIS: u64 = 2_000;

    /// Minimum reported visibility for a landmark to be used
    pub const MIN_VISIBILITY: f64 = 0.5;
}

/// Service identification used in logs
pub mod service_names {
    /// Name reported by the hosting application
    pub const REP_COUNTER: &str = "rep-counter";
}

/// Session registry limits
pub mod limits {
    /// Default upper bound on concurrently open sessions
    pub const DEFAULT_MAX_SESSIONS: usize = 64;
}
