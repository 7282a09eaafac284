//! Scripted pointer source.
//!
//! The headless host has no real cursor.  This adapter walks the pointer
//! around a rectangle of waypoints, holding at each one for a number of
//! samples so the pet has time to catch up and settle.

use crate::app::ports::PointerSource;
use crate::geometry::{Point, step_toward};

pub struct ScriptedPointer {
    waypoints: Vec<Point>,
    /// Pointer travel per sample, in pixels.
    step_px: f64,
    /// Samples to hold at each waypoint.
    dwell: u32,
    position: Point,
    next: usize,
    held: u32,
}

impl ScriptedPointer {
    /// Returns `None` for an empty waypoint list.
    pub fn new(waypoints: Vec<Point>, step_px: f64, dwell: u32) -> Option<Self> {
        let position = *waypoints.first()?;
        Some(Self {
            next: 1 % waypoints.len(),
            waypoints,
            step_px,
            dwell,
            position,
            held: 0,
        })
    }

    /// Corners of a `width` x `height` screen, inset by `margin`.
    pub fn screen_tour(width: f64, height: f64, margin: f64) -> Self {
        let corners = vec![
            Point::new(margin, margin),
            Point::new(width - margin, margin),
            Point::new(width - margin, height - margin),
            Point::new(margin, height - margin),
        ];
        Self {
            next: 1,
            position: corners[0],
            waypoints: corners,
            step_px: 40.0,
            dwell: 50,
            held: 0,
        }
    }
}

impl PointerSource for ScriptedPointer {
    fn sample(&mut self) -> Option<Point> {
        let goal = self.waypoints[self.next];
        if self.position == goal {
            self.held += 1;
            if self.held >= self.dwell {
                self.held = 0;
                self.next = (self.next + 1) % self.waypoints.len();
            }
        } else {
            self.position = step_toward(self.position, goal, self.step_px);
        }
        Some(self.position)
    }
}
