// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Instantaneous pointer speed between consecutive samples.

use sheetwerk_core::Point;

/// Duplicate timestamps are treated as this many milliseconds apart.
const MIN_ELAPSED_MS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Sample {
    position: Point,
    time_ms: f64,
}

/// Tracks the last sampled position to measure speed in px/ms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VelocityTracker {
    last: Option<Sample>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sample and return the speed since the previous one.
    /// The first sample reports zero.
    pub fn sample(&mut self, position: Point, time_ms: f64) -> f64 {
        let speed = match self.last {
            Some(prev) => {
                let elapsed = (time_ms - prev.time_ms).max(MIN_ELAPSED_MS);
                position.distance_to(prev.position) / elapsed
            }
            None => 0.0,
        };
        self.last = Some(Sample { position, time_ms });
        speed
    }
}
