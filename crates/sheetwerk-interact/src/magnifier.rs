// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Where to draw the loupe while a corner is dragged.

use serde::Serialize;
use sheetwerk_core::Point;

/// Screen-space centre of the magnifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MagnifierAnchor {
    pub x: f64,
    pub y: f64,
    /// True when the loupe sits below the pointer because there was no room above.
    pub flipped: bool,
}

/// Place the loupe `offset` above the pointer, or `offset` below it when a
/// loupe of diameter `size` would cross the top edge.
pub fn anchor_for(pointer: Point, offset: f64, size: f64) -> MagnifierAnchor {
    let above = pointer.y - offset;
    if above - size / 2.0 < 0.0 {
        MagnifierAnchor {
            x: pointer.x,
            y: pointer.y + offset,
            flipped: true,
        }
    } else {
        MagnifierAnchor {
            x: pointer.x,
            y: above,
            flipped: false,
        }
    }
}
