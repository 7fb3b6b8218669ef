// ABOUTME: Configuration management module for the rep counter
// ABOUTME: Environment-driven application settings plus the classifier thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors
//! Configuration module for the rep counter
//!
//! - **Environment**: application settings read from environment variables
//! - **Thresholds**: rule thresholds re-exported from the classifier crate

/// Environment and application configuration
pub mod environment;

pub use environment::{AppConfig, Environment, LogLevel};
pub use rep_counter_intelligence::config::{ConfigError, RuleThresholds};
