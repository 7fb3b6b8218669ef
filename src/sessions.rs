// ABOUTME: Concurrent registry of classifier sessions for hosts serving several users
// ABOUTME: SessionId newtype, bounded open/process/reset/status/close operations over a DashMap
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors

//! Session registry
//!
//! Each session owns one [`RepClassifier`]. Every operation on a session goes
//! through the map's per-entry write guard, so frames for one session are
//! applied one at a time even when callers run on several threads. Callers
//! must still submit a session's frames in capture order.
//!
//! Owners are taken as already authenticated; gating access belongs to the
//! host.

use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rep_counter_core::models::{ExerciseKind, LandmarkSnapshot};
use rep_counter_intelligence::{FrameOutcome, RepClassifier, RuleThresholds};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use uuid::Uuid;

/// Type-safe wrapper for session identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Create a new random `SessionId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the inner UUID value
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for SessionId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Point-in-time view of one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    /// Session identifier
    pub session_id: SessionId,
    /// Owner supplied when the session was opened
    pub owner: String,
    /// When the session was opened
    pub started_at: DateTime<Utc>,
    /// Current repetition count
    pub rep_count: u32,
    /// Exercise of the most recent frame, if any
    pub last_exercise: Option<ExerciseKind>,
    /// Frames processed so far
    pub frames_processed: u64,
}

#[derive(Debug)]
struct SessionEntry {
    owner: String,
    started_at: DateTime<Utc>,
    classifier: RepClassifier,
    last_exercise: Option<ExerciseKind>,
    frames_processed: u64,
}

impl SessionEntry {
    fn status(&self, session_id: SessionId) -> SessionStatus {
        SessionStatus {
            session_id,
            owner: self.owner.clone(),
            started_at: self.started_at,
            rep_count: self.classifier.rep_count(),
            last_exercise: self.last_exercise,
            frames_processed: self.frames_processed,
        }
    }
}

/// Bounded set of live classifier sessions
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: DashMap<SessionId, SessionEntry>,
    thresholds: RuleThresholds,
    max_sessions: usize,
    open: AtomicUsize,
}

impl SessionRegistry {
    /// Create a registry holding at most `max_sessions` sessions
    #[must_use]
    pub fn new(thresholds: RuleThresholds, max_sessions: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            thresholds,
            max_sessions,
            open: AtomicUsize::new(0),
        }
    }

    /// Open a session for an already-authenticated owner
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank owner and `ResourceUnavailable` when
    /// the registry is full
    pub fn open_session(&self, owner: &str) -> AppResult<SessionId> {
        let owner = owner.trim();
        if owner.is_empty() {
            return Err(AppError::invalid_input("session owner must not be empty"));
        }

        // Reserve a slot first so concurrent opens cannot overshoot the limit
        self.open
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |open| {
                (open < self.max_sessions).then_some(open + 1)
            })
            .map_err(|open| {
                AppError::unavailable(format!(
                    "session limit reached ({open}/{})",
                    self.max_sessions
                ))
            })?;

        let session_id = SessionId::new();
        self.sessions.insert(
            session_id,
            SessionEntry {
                owner: owner.to_owned(),
                started_at: Utc::now(),
                classifier: RepClassifier::new(self.thresholds.clone()),
                last_exercise: None,
                frames_processed: 0,
            },
        );
        AppLogger::log_session_opened(session_id, owner);
        Ok(session_id)
    }

    /// Classify one frame for a session
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the session does not exist
    pub fn process(
        &self,
        session_id: SessionId,
        exercise: ExerciseKind,
        snapshot: Option<&LandmarkSnapshot>,
        now: Duration,
    ) -> AppResult<FrameOutcome> {
        let mut entry = self
            .sessions
            .get_mut(&session_id)
            .ok_or_else(|| Self::not_found(session_id))?;
        let outcome = entry.classifier.process(exercise, snapshot, now);
        entry.last_exercise = Some(exercise);
        entry.frames_processed += 1;
        Ok(outcome)
    }

    /// Zero a session's counter and restore its initial stages and timers
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the session does not exist
    pub fn reset(&self, session_id: SessionId) -> AppResult<()> {
        let mut entry = self
            .sessions
            .get_mut(&session_id)
            .ok_or_else(|| Self::not_found(session_id))?;
        let previous = entry.classifier.rep_count();
        entry.classifier.reset();
        AppLogger::log_counter_reset(entry.frames_processed, previous);
        Ok(())
    }

    /// Snapshot of a session
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the session does not exist
    pub fn status(&self, session_id: SessionId) -> AppResult<SessionStatus> {
        self.sessions
            .get(&session_id)
            .map(|entry| entry.status(session_id))
            .ok_or_else(|| Self::not_found(session_id))
    }

    /// Close a session and return its final status
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the session does not exist
    pub fn close_session(&self, session_id: SessionId) -> AppResult<SessionStatus> {
        let (_, entry) = self
            .sessions
            .remove(&session_id)
            .ok_or_else(|| Self::not_found(session_id))?;
        self.open.fetch_sub(1, Ordering::SeqCst);

        let status = entry.status(session_id);
        AppLogger::log_session_closed(session_id, status.rep_count, status.frames_processed);
        Ok(status)
    }

    /// Statuses of every session belonging to `owner`
    #[must_use]
    pub fn sessions_for(&self, owner: &str) -> Vec<SessionStatus> {
        self.sessions
            .iter()
            .filter(|entry| entry.owner == owner)
            .map(|entry| entry.status(*entry.key()))
            .collect()
    }

    /// Number of open sessions
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no session is open
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Configured session limit
    #[must_use]
    pub const fn max_sessions(&self) -> usize {
        self.max_sessions
    }

    fn not_found(session_id: SessionId) -> AppError {
        AppError::not_found(format!("session {session_id}")).with_session_id(session_id.as_uuid())
    }
}
