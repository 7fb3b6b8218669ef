// ABOUTME: Environment configuration management for the rep counter
// ABOUTME: Parses deployment mode, log level, default exercise, session limits and thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors

//! Environment-based configuration

use crate::constants::{env_vars, limits};
use crate::errors::{AppError, AppResult};
use rep_counter_core::models::ExerciseKind;
use rep_counter_intelligence::RuleThresholds;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use tracing::info;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational events
    #[default]
    Info,
    /// Per-rep detail
    Debug,
    /// Per-frame detail
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback
    ///
    /// Only the leading directive is considered, so `debug,hyper=warn` is `Debug`.
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        let head = s.split(',').next().unwrap_or_default();
        match head.trim().to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if this is a testing environment
    #[must_use]
    pub const fn is_testing(self) -> bool {
        matches!(self, Self::Testing)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Default log level
    pub log_level: LogLevel,
    /// Exercise used when a caller does not choose one
    pub default_exercise: ExerciseKind,
    /// Upper bound on concurrently open sessions
    pub max_sessions: usize,
    /// Classifier rule thresholds
    pub thresholds: RuleThresholds,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            log_level: LogLevel::default(),
            default_exercise: ExerciseKind::Squat,
            max_sessions: limits::DEFAULT_MAX_SESSIONS,
            thresholds: RuleThresholds::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed, names an unknown
    /// exercise, or the resulting configuration fails validation
    pub fn from_env() -> AppResult<Self> {
        let environment = env::var(env_vars::ENVIRONMENT)
            .map(|v| Environment::from_str_or_default(&v))
            .unwrap_or_default();
        let log_level = env::var(env_vars::RUST_LOG)
            .map(|v| LogLevel::from_str_or_default(&v))
            .unwrap_or_default();

        let default_exercise = match env::var(env_vars::DEFAULT_EXERCISE) {
            Ok(name) => name.parse()?,
            Err(_) => ExerciseKind::Squat,
        };

        let max_sessions = match env::var(env_vars::MAX_SESSIONS) {
            Ok(raw) => raw.trim().parse().map_err(|_| {
                AppError::config(format!("Invalid {}: '{raw}'", env_vars::MAX_SESSIONS))
            })?,
            Err(_) => limits::DEFAULT_MAX_SESSIONS,
        };

        let config = Self {
            environment,
            log_level,
            default_exercise,
            max_sessions,
            thresholds: RuleThresholds::from_env()?,
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if the session limit is zero or thresholds are inconsistent
    pub fn validate(&self) -> AppResult<()> {
        if self.max_sessions == 0 {
            return Err(AppError::config(format!(
                "{} must be at least 1",
                env_vars::MAX_SESSIONS
            )));
        }
        self.thresholds.validate()?;
        Ok(())
    }

    /// Get a summary of the configuration for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Rep Counter Configuration:\n\
             - Environment: {}\n\
             - Log Level: {}\n\
             - Default Exercise: {}\n\
             - Max Sessions: {}\n\
             - Squat Angles: down < {:.1}, up > {:.1}\n\
             - Warrior II Band: ({:.1}, {:.1})\n\
             - Tree Pose Tolerance: {:.3}\n\
             - Hold Duration: {:.2}s\n\
             - Min Visibility: {:.2}",
            self.environment,
            self.log_level,
            self.default_exercise.display_name(),
            self.max_sessions,
            self.thresholds.squat_down_angle,
            self.thresholds.squat_up_angle,
            self.thresholds.warrior_min_angle,
            self.thresholds.warrior_max_angle,
            self.thresholds.tree_pose_x_tolerance,
            self.thresholds.hold_duration.as_secs_f64(),
            self.thresholds.min_visibility,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str_or_default("DEBUG"), LogLevel::Debug);
        assert_eq!(
            LogLevel::from_str_or_default("trace,hyper=warn"),
            LogLevel::Trace
        );
        assert_eq!(LogLevel::from_str_or_default("nonsense"), LogLevel::Info);
        assert_eq!(LogLevel::Warn.to_tracing_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::from_str_or_default("prod"),
            Environment::Production
        );
        assert!(Environment::from_str_or_default("test").is_testing());
        assert_eq!(
            Environment::from_str_or_default("staging"),
            Environment::Development
        );
    }

    #[test]
    fn test_zero_sessions_rejected() {
        let config = AppConfig {
            max_sessions: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_summary_mentions_exercise() {
        let summary = AppConfig::default().summary();
        assert!(summary.contains("Squats"));
        assert!(summary.contains("Max Sessions: 64"));
    }
}
