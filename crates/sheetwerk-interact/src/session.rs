// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

use sheetwerk_core::{Corner, Point};

use crate::velocity::VelocityTracker;

/// Per-drag state: which corner is held and how fast it is moving.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    corner: Corner,
    velocity: VelocityTracker,
}

impl DragSession {
    /// Start a drag with the pointer-down position as the first velocity sample.
    pub fn start(corner: Corner, at: Point, time_ms: f64) -> Self {
        let mut velocity = VelocityTracker::new();
        velocity.sample(at, time_ms);
        Self { corner, velocity }
    }

    pub fn corner(&self) -> Corner {
        self.corner
    }

    /// Speed in image px/ms since the previous sample.
    pub fn sample(&mut self, at: Point, time_ms: f64) -> f64 {
        self.velocity.sample(at, time_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_move_is_measured_from_pointer_down() {
        let mut s = DragSession::start(Corner::BottomLeft, Point::new(10.0, 10.0), 0.0);
        assert_eq!(s.corner(), Corner::BottomLeft);
        assert_eq!(s.sample(Point::new(10.0, 30.0), 10.0), 2.0);
    }
}
