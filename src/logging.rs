// ABOUTME: Logging configuration and structured logging setup for the rep counter
// ABOUTME: Configures log levels, formatters and output for session, rep and frame events
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors

//! Structured logging configuration
//!
//! Logs go to stderr so that per-frame JSON reports on stdout stay machine
//! readable.

use crate::config::environment::LogLevel;
use crate::constants::service_names;
use anyhow::Result;
use rep_counter_core::models::ExerciseKind;
use rep_counter_intelligence::SkipReason;
use serde_json::json;
use std::env;
use std::fmt::Display;
use std::io;
use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include thread information
    pub include_thread: bool,
    /// Include span information for tracing
    pub include_spans: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Environment (development, testing, production)
    pub environment: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` format for production logging
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for terminals
    Compact,
}

impl LogFormat {
    /// Parse a `LOG_FORMAT` value, falling back to pretty output
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
            include_location: false,
            include_thread: false,
            include_spans: false,
            service_name: service_names::REP_COUNTER.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: "development".into(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
        let format = env::var("LOG_FORMAT")
            .map_or(LogFormat::Pretty, |v| LogFormat::from_str_or_default(&v));
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        // In production, use more detailed logging
        let is_production = environment == "production";

        Self {
            level,
            format,
            include_location: is_production || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_thread: is_production || env::var("LOG_INCLUDE_THREAD").is_ok(),
            include_spans: env::var("LOG_INCLUDE_SPANS").is_ok(),
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| service_names::REP_COUNTER.into()),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment,
        }
    }

    /// Raise the level to `debug` unless `RUST_LOG` already asks for more
    #[must_use]
    pub fn verbose(mut self) -> Self {
        if matches!(self.level.as_str(), "info" | "warn" | "error") {
            self.level = "debug".into();
        }
        self
    }

    /// Directives pinning this crate and the classifier to the configured level
    ///
    /// Only the leading level of a directive list counts, so
    /// `info,hyper=warn` yields `rep_counter=info`.
    fn crate_directives(&self) -> [String; 2] {
        let level = LogLevel::from_str_or_default(&self.level);
        [
            format!("rep_counter={level}"),
            format!("rep_counter_intelligence={level}"),
        ]
    }

    /// Build the filter: `RUST_LOG` directives when set, the configured level otherwise
    fn env_filter(&self) -> EnvFilter {
        let base = env::var("RUST_LOG").map_or_else(
            |_| EnvFilter::new(&self.level),
            |directive| EnvFilter::new(&directive),
        );
        self.crate_directives()
            .iter()
            .fold(base, |filter, directive| match directive.parse() {
                Ok(directive) => filter.add_directive(directive),
                Err(_) => filter,
            })
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());
        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        match self.format {
            LogFormat::Json => {
                let json_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_thread_ids(self.include_thread)
                    .with_thread_names(self.include_thread)
                    .with_target(true)
                    .with_writer(io::stderr)
                    .with_span_events(span_events)
                    .json();

                registry.with(json_layer).try_init()?;
            }
            LogFormat::Pretty => {
                let pretty_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_thread_ids(self.include_thread)
                    .with_thread_names(self.include_thread)
                    .with_target(true)
                    .with_writer(io::stderr)
                    .with_span_events(span_events);

                registry.with(pretty_layer).try_init()?;
            }
            LogFormat::Compact => {
                let compact_layer = fmt::layer()
                    .compact()
                    .with_file(false)
                    .with_line_number(false)
                    .with_target(false)
                    .with_writer(io::stderr)
                    .with_span_events(FmtSpan::NONE);

                registry.with(compact_layer).try_init()?;
            }
        }

        self.log_startup_info();
        Ok(())
    }

    fn log_startup_info(&self) {
        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            environment = %self.environment,
            log.level = %self.level,
            log.format = ?self.format,
            "Rep counter starting up"
        );

        let config_summary = json!({
            "service": {
                "name": self.service_name,
                "version": self.service_version,
                "environment": self.environment
            },
            "logging": {
                "level": self.level,
                "format": format!("{:?}", self.format),
                "features": {
                    "location": self.include_location,
                    "thread": self.include_thread,
                    "spans": self.include_spans
                }
            }
        });

        debug!("Logging configured: {}", config_summary);
    }
}

/// Application-specific logging utilities
pub struct AppLogger;

impl AppLogger {
    /// Log a session being opened
    pub fn log_session_opened(session_id: impl Display, owner: &str) {
        info!(
            session.id = %session_id,
            session.owner = %owner,
            "Session opened"
        );
    }

    /// Log a session being closed with its final tallies
    pub fn log_session_closed(session_id: impl Display, rep_count: u32, frames_processed: u64) {
        info!(
            session.id = %session_id,
            session.reps = %rep_count,
            session.frames = %frames_processed,
            "Session closed"
        );
    }

    /// Log a counted repetition
    pub fn log_rep_counted(frame_index: u64, exercise: ExerciseKind, rep_count: u32) {
        info!(
            frame.index = %frame_index,
            rep.exercise = %exercise.as_str(),
            rep.count = %rep_count,
            "Rep counted"
        );
    }

    /// Log a frame the classifier could not use
    pub fn log_frame_skipped(frame_index: u64, exercise: ExerciseKind, reason: SkipReason) {
        debug!(
            frame.index = %frame_index,
            rep.exercise = %exercise.as_str(),
            frame.skip_reason = ?reason,
            "Frame skipped"
        );
    }

    /// Log a counter reset requested by session control
    pub fn log_counter_reset(frame_index: u64, previous_count: u32) {
        info!(
            frame.index = %frame_index,
            rep.previous_count = %previous_count,
            "Counter reset"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_level(level: &str) -> LoggingConfig {
        LoggingConfig {
            level: level.into(),
            ..LoggingConfig::default()
        }
    }

    #[test]
    fn test_crate_directives_follow_plain_level() {
        assert_eq!(
            config_with_level("warn").crate_directives(),
            ["rep_counter=warn", "rep_counter_intelligence=warn"]
        );
    }

    #[test]
    fn test_crate_directives_use_leading_level_of_directive_list() {
        let directives = config_with_level("debug,hyper=warn").crate_directives();
        assert_eq!(directives[0], "rep_counter=debug");
        assert_eq!(directives[1], "rep_counter_intelligence=debug");
        for directive in directives {
            assert!(directive.parse::<tracing_subscriber::filter::Directive>().is_ok());
        }
    }

    #[test]
    fn test_verbose_raises_quiet_levels_only() {
        assert_eq!(config_with_level("info").verbose().level, "debug");
        assert_eq!(config_with_level("trace").verbose().level, "trace");
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::from_str_or_default("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::from_str_or_default("compact"), LogFormat::Compact);
        assert_eq!(LogFormat::from_str_or_default("fancy"), LogFormat::Pretty);
    }
}
