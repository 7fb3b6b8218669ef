// ABOUTME: Frame sources that feed landmark snapshots to a classifier session
// ABOUTME: JSON-lines recordings and in-memory frame lists behind a pull-based iterator contract
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors

//! Frame sources
//!
//! A frame source is any iterator of `AppResult<Frame>`. The session runner
//! pulls one frame at a time, so a slow producer never piles up work.
//!
//! The JSON-lines format carries one frame per line:
//!
//! ```json
//! {"timestamp_ms": 33, "landmarks": {"LEFT_HIP": {"x": 0.5, "y": 0.3}}}
//! {"timestamp_ms": 66, "landmarks": null}
//! {"timestamp_ms": 99, "flat": [0.5, 0.3, 0.0, ...]}
//! ```
//!
//! `landmarks: null` (or no `landmarks`/`flat` at all) means the detector saw
//! no body in that frame.

use crate::errors::{AppError, AppResult};
use rep_counter_core::models::LandmarkSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::time::Duration;

/// One detector output
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// Capture time relative to session start, when the detector recorded one
    pub timestamp: Option<Duration>,
    /// Detected landmarks, `None` when no body was found
    pub landmarks: Option<LandmarkSnapshot>,
}

impl Frame {
    /// Frame with a detected body
    #[must_use]
    pub fn with_landmarks(landmarks: LandmarkSnapshot) -> Self {
        Self {
            timestamp: None,
            landmarks: Some(landmarks),
        }
    }

    /// Frame in which the detector found no body
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            timestamp: None,
            landmarks: None,
        }
    }

    /// Attach a capture timestamp
    #[must_use]
    pub fn at(mut self, timestamp: Duration) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Pull-based supply of frames
pub trait FrameSource: Iterator<Item = AppResult<Frame>> {}

impl<T> FrameSource for T where T: Iterator<Item = AppResult<Frame>> {}

/// Wire form of one JSON-lines record
#[derive(Debug, Serialize, Deserialize)]
struct FrameRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timestamp_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    landmarks: Option<LandmarkSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    flat: Option<Vec<f32>>,
}

impl FrameRecord {
    fn into_frame(self) -> AppResult<Frame> {
        let landmarks = match (self.landmarks, self.flat) {
            (Some(_), Some(_)) => {
                return Err(AppError::invalid_format(
                    "record carries both 'landmarks' and 'flat'",
                ));
            }
            (Some(snapshot), None) => Some(snapshot),
            (None, Some(flat)) => Some(LandmarkSnapshot::from_flat(&flat)?),
            (None, None) => None,
        };
        Ok(Frame {
            timestamp: self.timestamp_ms.map(Duration::from_millis),
            landmarks,
        })
    }
}

/// Reads frames from newline-delimited JSON
pub struct JsonLinesFrameSource<R: BufRead> {
    reader: R,
    buffer: Vec<u8>,
    line_number: usize,
}

impl<R: BufRead> JsonLinesFrameSource<R> {
    /// Wrap a buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            line_number: 0,
        }
    }

    /// One-based number of the last line read
    pub const fn line_number(&self) -> usize {
        self.line_number
    }

    fn parse_line(&self, line: &str) -> AppResult<Frame> {
        let record: FrameRecord = serde_json::from_str(line).map_err(|e| {
            AppError::invalid_format(format!("line {}: {e}", self.line_number)).with_source(e)
        })?;
        record.into_frame().map_err(|e| {
            AppError::invalid_format(format!("line {}: {}", self.line_number, e.message))
        })
    }
}

impl JsonLinesFrameSource<BufReader<File>> {
    /// Open a recording on disk
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file cannot be opened
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            AppError::from(e)
                .with_details(serde_json::json!({ "path": path.display().to_string() }))
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl JsonLinesFrameSource<io::StdinLock<'static>> {
    /// Read frames from standard input
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> Iterator for JsonLinesFrameSource<R> {
    type Item = AppResult<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buffer.clear();
            match self.reader.read_until(b'\n', &mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(AppError::from(e))),
            }
            self.line_number += 1;
            let line = match std::str::from_utf8(&self.buffer) {
                Ok(line) => line,
                Err(e) => {
                    let message = format!("line {}: {e}", self.line_number);
                    return Some(Err(AppError::invalid_format(message)));
                }
            };
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            return Some(self.parse_line(trimmed));
        }
    }
}

/// In-memory frames, for tests and programmatic replays
#[derive(Debug, Clone, Default)]
pub struct VecFrameSource {
    frames: VecDeque<Frame>,
}

impl VecFrameSource {
    /// Create a source yielding `frames` in order
    pub fn new(frames: impl IntoIterator<Item = Frame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Frames not yet pulled
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl Iterator for VecFrameSource {
    type Item = AppResult<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        self.frames.pop_front().map(Ok)
    }
}

/// Serialize a frame in the JSON-lines wire format
///
/// # Errors
///
/// Returns a serialization error if the snapshot cannot be encoded
pub fn to_json_line(frame: &Frame) -> AppResult<String> {
    let record = FrameRecord {
        timestamp_ms: frame
            .timestamp
            .map(|t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX)),
        landmarks: frame.landmarks.clone(),
        flat: None,
    };
    Ok(serde_json::to_string(&record)?)
}
