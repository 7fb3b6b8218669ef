// ABOUTME: Cooperative cancellation for long-running sessions
// ABOUTME: A cloneable stop flag tripped by signal handlers and checked between frames
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

/// Shared stop flag
///
/// The session runner checks the flag before pulling each frame, so a frame
/// already being classified always finishes.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    stopped: Arc<AtomicBool>,
}

impl StopSignal {
    /// Create an untripped signal
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every holder of this signal to stop
    pub fn stop(&self) {
        if !self.stopped.swap(true, Ordering::SeqCst) {
            info!("Stop requested");
        }
    }

    /// Whether a stop has been requested
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}
