// ABOUTME: Joint geometry helpers operating on normalized 2D landmark positions
// ABOUTME: Computes the directed angle at a vertex from two rays, normalized into [0, 360)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rep Counter Contributors

use rep_counter_core::models::Landmark;

/// A position in normalized image space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2 {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate, growing downwards
    pub y: f64,
}

impl Point2 {
    /// Create a point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Same point shifted by `(dx, dy)`
    #[must_use]
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<Landmark> for Point2 {
    fn from(landmark: Landmark) -> Self {
        Self::new(landmark.x, landmark.y)
    }
}

impl From<&Landmark> for Point2 {
    fn from(landmark: &Landmark) -> Self {
        Self::new(landmark.x, landmark.y)
    }
}

/// Angle at vertex `b` from ray `b→a` to ray `b→c`, in degrees within `[0, 360)`
///
/// The angle is directed: swapping `a` and `c` yields `360 - θ` for
/// non-degenerate inputs. Coincident points produce a degenerate value
/// (typically 0) rather than an error; callers only ever see one bad frame.
#[must_use]
pub fn angle_at(a: Point2, b: Point2, c: Point2) -> f64 {
    let radians = (c.y - b.y).atan2(c.x - b.x) - (a.y - b.y).atan2(a.x - b.x);
    let degrees = radians.to_degrees();
    let normalized = if degrees < 0.0 { degrees + 360.0 } else { degrees };
    // -1e-14 + 360 rounds to exactly 360.0
    if normalized >= 360.0 {
        normalized - 360.0
    } else {
        normalized
    }
}
