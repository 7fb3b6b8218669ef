// ABOUTME: Unified error handling with standard error codes and structured context
// ABOUTME: Defines AppError, ErrorCode and the serializable ErrorResponse used by the CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors

//! # Unified Error Handling System
//!
//! Every fallible operation outside the classifier returns [`AppResult`]. The
//! classifier itself never fails: missing landmarks and absent bodies are soft
//! outcomes, not errors. The one fatal classifier condition, an unknown
//! exercise selector, is raised here when a name is parsed at the boundary.

use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;
use uuid::Uuid;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Input failed validation
    InvalidInput = 3000,
    /// Input could not be parsed
    InvalidFormat = 3002,
    /// Numeric input outside the accepted range
    ValueOutOfRange = 3003,
    /// Exercise name does not match any supported exercise
    InvalidExerciseSelector = 3004,

    // Resource Management (4000-4999)
    /// Session or other resource does not exist
    ResourceNotFound = 4000,
    /// Resource limit reached
    ResourceUnavailable = 4003,

    // Configuration (6000-6999)
    /// Generic configuration failure
    ConfigError = 6000,
    /// Configuration value failed validation
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    InternalError = 9000,
    /// Reading or writing an input/output stream failed
    StorageError = 9002,
    /// Serialization or deserialization failed
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::InvalidFormat => "The data format is invalid",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::InvalidExerciseSelector => "The selected exercise is not supported",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ResourceUnavailable => "The resource is temporarily unavailable",
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::StorageError => "Input/output operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Process exit code for command-line front ends
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::InvalidInput
            | Self::InvalidFormat
            | Self::ValueOutOfRange
            | Self::InvalidExerciseSelector => 2,
            Self::ConfigError | Self::ConfigInvalid => 3,
            Self::ResourceNotFound | Self::ResourceUnavailable => 4,
            Self::InternalError | Self::StorageError | Self::SerializationError => 1,
        }
    }
}

/// Additional context that can be attached to errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Session the error belongs to, when known
    pub session_id: Option<Uuid>,
    /// Zero-based frame index, when the error is tied to one frame
    pub frame_index: Option<u64>,
    /// Additional key-value context
    pub details: serde_json::Value,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self {
            session_id: None,
            frame_index: None,
            details: serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
#[error("{}: {}", .code.description(), .message)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    pub context: ErrorContext,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Attach a session ID to the error context
    #[must_use]
    pub fn with_session_id(mut self, session_id: Uuid) -> Self {
        self.context.session_id = Some(session_id);
        self
    }

    /// Attach a frame index to the error context
    #[must_use]
    pub fn with_frame_index(mut self, frame_index: u64) -> Self {
        self.context.frame_index = Some(frame_index);
        self
    }

    /// Add details to the error context
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.context.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Unparseable input
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidFormat, message)
    }

    /// Unknown exercise name
    pub fn invalid_exercise(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(
            ErrorCode::InvalidExerciseSelector,
            format!("Unknown exercise '{name}'"),
        )
        .with_details(serde_json::json!({ "exercise": name }))
    }

    /// Resource not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Resource limit reached
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceUnavailable, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        Self::new(ErrorCode::StorageError, error.to_string()).with_source(error)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Serializable error report
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error payload
    pub error: ErrorResponseDetails,
}

/// Body of an [`ErrorResponse`]
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Session the error belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,
    /// Frame the error belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_index: Option<u64>,
    /// Extra details
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub details: serde_json::Value,
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        Self {
            error: ErrorResponseDetails {
                code: error.code,
                message: error.message.clone(),
                session_id: error.context.session_id,
                frame_index: error.context.frame_index,
                details: error.context.details.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_exit_codes() {
        assert_eq!(ErrorCode::InvalidExerciseSelector.exit_code(), 2);
        assert_eq!(ErrorCode::ConfigInvalid.exit_code(), 3);
        assert_eq!(ErrorCode::ResourceNotFound.exit_code(), 4);
        assert_eq!(ErrorCode::StorageError.exit_code(), 1);
    }

    #[test]
    fn test_app_error_creation() {
        let error = AppError::invalid_format("bad line")
            .with_session_id(Uuid::new_v4())
            .with_frame_index(7);

        assert_eq!(error.code, ErrorCode::InvalidFormat);
        assert!(error.context.session_id.is_some());
        assert_eq!(error.context.frame_index, Some(7));
        assert_eq!(error.to_string(), "The data format is invalid: bad line");
    }

    #[test]
    fn test_invalid_exercise_carries_name() {
        let error = AppError::invalid_exercise("burpees");
        let response = ErrorResponse::from(&error);

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("INVALID_EXERCISE_SELECTOR"));
        assert!(json.contains("burpees"));
    }

    #[test]
    fn test_internal_error_exits_with_failure() {
        let error = AppError::internal("replay task panicked");
        assert_eq!(error.code, ErrorCode::InternalError);
        assert_eq!(error.code.exit_code(), 1);
    }

    #[test]
    fn test_io_error_keeps_source() {
        let error = AppError::from(io::Error::new(io::ErrorKind::NotFound, "frames.jsonl"));
        assert_eq!(error.code, ErrorCode::StorageError);
        assert!(std::error::Error::source(&error).is_some());
    }
}
