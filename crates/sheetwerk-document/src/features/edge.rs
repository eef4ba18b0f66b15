// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Line snap: the squared-magnitude weighted centroid of the edges in a
// window. Squaring the weight lets the sharpest line dominate weak texture.

use sheetwerk_core::Point;
use tracing::trace;

use super::{EDGE_MAGNITUDE_FLOOR, EDGE_WEIGHT_FLOOR, central_gradient, interior};
use crate::image::PixelBuffer;

/// Pull `(x, y)` onto the dominant line in its `2 * radius` neighbourhood.
///
/// Returns `None` when the accumulated weight stays under 10 000, i.e. no
/// sufficiently strong line is present.
pub fn snap_to_edge(buffer: &PixelBuffer<'_>, x: f64, y: f64, radius: u32) -> Option<Point> {
    let window = buffer.window_around(x, y, radius);

    let (mut sum_x, mut sum_y, mut weight) = (0.0f64, 0.0f64, 0.0f64);
    for (wx, wy) in interior(&window) {
        let (gx, gy) = central_gradient(&window, wx, wy);
        let magnitude = gx.hypot(gy);
        if magnitude <= EDGE_MAGNITUDE_FLOOR {
            continue;
        }
        let w = magnitude * magnitude;
        sum_x += wx as f64 * w;
        sum_y += wy as f64 * w;
        weight += w;
    }

    if weight < EDGE_WEIGHT_FLOOR {
        trace!(x, y, weight, "No strong line nearby");
        return None;
    }

    let (px, py) = window.to_source(sum_x / weight, sum_y / weight);
    trace!(px, py, weight, "Snapped to line");
    Some(Point::new(px, py))
}
