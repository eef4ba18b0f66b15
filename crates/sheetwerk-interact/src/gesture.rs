// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Two-finger pinch/pan. While a pinch is live no corner can be dragged.

use sheetwerk_core::{Point, ViewTransform};

/// Finger distances shorter than this cannot be used as a zoom baseline.
const MIN_PINCH_SPAN: f64 = 1e-6;

/// State captured when the second finger lands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchGesture {
    start_span: f64,
    start_midpoint: Point,
    start_view: ViewTransform,
}

impl PinchGesture {
    pub fn begin(a: Point, b: Point, view: ViewTransform) -> Self {
        Self {
            start_span: a.distance_to(b),
            start_midpoint: midpoint(a, b),
            start_view: view,
        }
    }

    /// View for the current finger positions.
    ///
    /// Zoom follows the ratio of finger spans, clamped to `[min_zoom, max_zoom]`;
    /// the image point that was under the starting midpoint stays under the
    /// current midpoint.
    pub fn update(&self, a: Point, b: Point, min_zoom: f64, max_zoom: f64) -> ViewTransform {
        let ratio = if self.start_span > MIN_PINCH_SPAN {
            a.distance_to(b) / self.start_span
        } else {
            1.0
        };
        let scale = clamp_zoom(self.start_view.scale * ratio, min_zoom, max_zoom);
        let anchor = self.start_view.screen_to_image(self.start_midpoint);
        let mid = midpoint(a, b);
        ViewTransform {
            x: mid.x - anchor.x * scale,
            y: mid.y - anchor.y * scale,
            scale,
        }
    }
}

/// Clamp `scale` into `[min_zoom, max_zoom]`.
///
/// Never panics: an inverted range yields `max_zoom`, and a NaN scale or
/// bound is ignored in favour of the other operand.
pub fn clamp_zoom(scale: f64, min_zoom: f64, max_zoom: f64) -> f64 {
    scale.max(min_zoom).min(max_zoom)
}

fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}
