//! 2-D screen geometry.
//!
//! Coordinates are screen pixels held as `f64` so that stepping along a
//! diagonal keeps sub-pixel precision between ticks.  Hosts that position
//! windows on an integer grid call [`Point::rounded`] at the render edge.

use serde::{Deserialize, Serialize};

/// A position on screen.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset by `(dx, dy)`.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Nearest integer pixel, for hosts that move windows on whole pixels.
    pub fn rounded(self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(f64::from(x), f64::from(y))
    }
}

/// Pet bounding box supplied by the rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions strictly positive and finite.
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Top-left position that centres a box of this size on `center`.
    pub fn top_left_centered_on(self, center: Point) -> Point {
        center.offset(-self.width / 2.0, -self.height / 2.0)
    }
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Advance from `from` toward `to` by at most `max_step`.
///
/// Returns `to` unchanged once it is within reach, so repeated calls land on
/// the exact target coordinate and never overshoot.  Coincident points and a
/// non-positive or non-finite step return `from`.
pub fn step_toward(from: Point, to: Point, max_step: f64) -> Point {
    if !max_step.is_finite() || max_step <= 0.0 {
        return from;
    }
    let dist = distance(from, to);
    if dist == 0.0 {
        return from;
    }
    if dist <= max_step {
        return to;
    }
    let ratio = max_step / dist;
    Point::new(
        from.x + (to.x - from.x) * ratio,
        from.y + (to.y - from.y) * ratio,
    )
}
