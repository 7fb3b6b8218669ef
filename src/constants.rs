// ABOUTME: Application constants and environment variable names for the rep counter
// ABOUTME: Re-exports the shared constants from rep-counter-core and adds host-side values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors

//! # Constants Module
//!
//! Landmark layout and threshold defaults come from `rep-counter-core`; the
//! modules below cover what only the hosting application needs.

pub use rep_counter_core::constants::{landmarks, limits, service_names, thresholds};

/// Environment variable names read by the hosting application
pub mod env_vars {
    /// Deployment environment (`development`, `production`, `testing`)
    pub const ENVIRONMENT: &str = "ENVIRONMENT";

    /// Log level and filter directives
    pub const RUST_LOG: &str = "RUST_LOG";

    /// Exercise selected when none is given on the command line
    pub const DEFAULT_EXERCISE: &str = "REP_DEFAULT_EXERCISE";

    /// Maximum number of concurrently open sessions
    pub const MAX_SESSIONS: &str = "REP_MAX_SESSIONS";
}
