// ABOUTME: Threshold configuration for the exercise rules with environment overrides
// ABOUTME: Validates angle ranges, tolerances and hold durations before the classifier uses them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors

//! Rule threshold configuration
//!
//! Defaults come from `rep_counter_core::constants::thresholds`. Each value can
//! be overridden through an environment variable; the result is validated
//! before use.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use rep_counter_core::constants::thresholds;
use rep_counter_core::errors::{AppError, ErrorCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Two related thresholds are in the wrong order
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// Failed to parse configuration value
    #[error("Parse error: {0}")]
    Parse(String),

    /// Numeric value outside valid range for parameter
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let code = match error {
            ConfigError::Parse(_) => ErrorCode::ConfigError,
            ConfigError::InvalidRange(_) | ConfigError::ValueOutOfRange(_) => {
                ErrorCode::ConfigInvalid
            }
        };
        Self::new(code, error.to_string())
    }
}

/// Thresholds used by the per-exercise rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleThresholds {
    /// Knee angle above which a squat counts as standing (degrees)
    pub squat_up_angle: f64,
    /// Knee angle below which a squat counts as at depth (degrees)
    pub squat_down_angle: f64,
    /// Maximum `|ankle.x - hip.x|` for tree pose alignment (normalized)
    pub tree_pose_x_tolerance: f64,
    /// Warrior II knee angle lower bound, exclusive (degrees)
    pub warrior_min_angle: f64,
    /// Warrior II knee angle upper bound, exclusive (degrees)
    pub warrior_max_angle: f64,
    /// Continuous hold needed for one yoga repetition
    pub hold_duration: Duration,
    /// Landmarks reporting a lower visibility are treated as missing
    pub min_visibility: f64,
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self {
            squat_up_angle: thresholds::SQUAT_UP_ANGLE_DEG,
            squat_down_angle: thresholds::SQUAT_DOWN_ANGLE_DEG,
            tree_pose_x_tolerance: thresholds::TREE_POSE_X_TOLERANCE,
            warrior_min_angle: thresholds::WARRIOR_MIN_ANGLE_DEG,
            warrior_max_angle: thresholds::WARRIOR_MAX_ANGLE_DEG,
            hold_duration: Duration::from_millis(thresholds::POSE_HOLD_MILLIS),
            min_visibility: thresholds::MIN_VISIBILITY,
        }
    }
}

impl RuleThresholds {
    /// Load thresholds from defaults plus environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable cannot be parsed or the
    /// resulting thresholds fail validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Check that thresholds are internally consistent
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint
    pub fn validate(&self) -> Result<(), ConfigError> {
        let angles = [
            self.squat_up_angle,
            self.squat_down_angle,
            self.warrior_min_angle,
            self.warrior_max_angle,
        ];
        if angles.iter().any(|a| !(0.0..360.0).contains(a)) {
            return Err(ConfigError::ValueOutOfRange(
                "angles must lie within [0, 360)",
            ));
        }
        if self.squat_down_angle >= self.squat_up_angle {
            return Err(ConfigError::InvalidRange(
                "squat_down_angle must be < squat_up_angle",
            ));
        }
        if self.warrior_min_angle >= self.warrior_max_angle {
            return Err(ConfigError::InvalidRange(
                "warrior_min_angle must be < warrior_max_angle",
            ));
        }
        if !(0.0..=1.0).contains(&self.tree_pose_x_tolerance) {
            return Err(ConfigError::ValueOutOfRange(
                "tree_pose_x_tolerance must be within [0, 1]",
            ));
        }
        if !(0.0..=1.0).contains(&self.min_visibility) {
            return Err(ConfigError::ValueOutOfRange(
                "min_visibility must be within [0, 1]",
            ));
        }
        if self.hold_duration.is_zero() {
            return Err(ConfigError::ValueOutOfRange(
                "hold_duration must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .trim()
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}: '{val}'")))?;
        }
        Ok(())
    }

    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        Self::apply_env_var("REP_SQUAT_UP_ANGLE", &mut self.squat_up_angle)?;
        Self::apply_env_var("REP_SQUAT_DOWN_ANGLE", &mut self.squat_down_angle)?;
        Self::apply_env_var("REP_TREE_X_TOLERANCE", &mut self.tree_pose_x_tolerance)?;
        Self::apply_env_var("REP_WARRIOR_MIN_ANGLE", &mut self.warrior_min_angle)?;
        Self::apply_env_var("REP_WARRIOR_MAX_ANGLE", &mut self.warrior_max_angle)?;
        Self::apply_env_var("REP_MIN_VISIBILITY", &mut self.min_visibility)?;

        let mut hold_seconds = self.hold_duration.as_secs_f64();
        Self::apply_env_var("REP_HOLD_SECONDS", &mut hold_seconds)?;
        self.hold_duration = Duration::try_from_secs_f64(hold_seconds)
            .map_err(|_| ConfigError::ValueOutOfRange("REP_HOLD_SECONDS must be non-negative"))?;

        Ok(self)
    }
}
