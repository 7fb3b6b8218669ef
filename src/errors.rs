// ABOUTME: Re-exports the unified error types from rep-counter-core
// ABOUTME: Keeps `rep_counter::errors::*` paths stable for binaries and integration tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors

//! # Unified Error Handling System
//!
//! The error types live in `rep-counter-core` so the classifier crate can
//! share them. Threshold validation errors convert into [`AppError`] through
//! `From<ConfigError>`.

pub use rep_counter_core::errors::{
    AppError, AppResult, ErrorCode, ErrorContext, ErrorResponse, ErrorResponseDetails,
};
