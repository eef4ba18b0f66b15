// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The seam between the drag controller and the pixel heuristics.

use sheetwerk_core::Point;
use sheetwerk_document::{CornerHit, Luminance, PixelBuffer};

/// Feature queries the controller makes on every pointer move.
///
/// All methods are read-only and return "nothing found" as `None` or an
/// empty list; the controller always has a raw-point fallback.
pub trait FeatureProbe {
    /// Source image size in pixels.
    fn image_size(&self) -> (u32, u32);

    fn strongest_corner(&self, at: Point, radius: u32) -> Option<CornerHit>;

    fn snap_to_edge(&self, at: Point, radius: u32) -> Option<Point>;

    /// Guide angles at `at`, already falling back to `[0, 90]`.
    fn edge_angles(&self, at: Point, radius: u32) -> Vec<f64>;
}

/// [`FeatureProbe`] backed by a borrowed RGBA buffer.
#[derive(Debug, Clone, Copy)]
pub struct PixelProbe<'a> {
    buffer: PixelBuffer<'a>,
}

impl<'a> PixelProbe<'a> {
    pub fn new(buffer: PixelBuffer<'a>) -> Self {
        Self { buffer }
    }

    pub fn buffer(&self) -> &PixelBuffer<'a> {
        &self.buffer
    }
}

impl FeatureProbe for PixelProbe<'_> {
    fn image_size(&self) -> (u32, u32) {
        (self.buffer.width(), self.buffer.height())
    }

    fn strongest_corner(&self, at: Point, radius: u32) -> Option<CornerHit> {
        sheetwerk_document::find_strongest_corner(&self.buffer, at.x, at.y, radius)
    }

    fn snap_to_edge(&self, at: Point, radius: u32) -> Option<Point> {
        sheetwerk_document::snap_to_edge(&self.buffer, at.x, at.y, radius)
    }

    fn edge_angles(&self, at: Point, radius: u32) -> Vec<f64> {
        sheetwerk_document::edge_angles(&self.buffer, at.x, at.y, radius)
    }
}

impl<P: FeatureProbe + ?Sized> FeatureProbe for &P {
    fn image_size(&self) -> (u32, u32) {
        (**self).image_size()
    }

    fn strongest_corner(&self, at: Point, radius: u32) -> Option<CornerHit> {
        (**self).strongest_corner(at, radius)
    }

    fn snap_to_edge(&self, at: Point, radius: u32) -> Option<Point> {
        (**self).snap_to_edge(at, radius)
    }

    fn edge_angles(&self, at: Point, radius: u32) -> Vec<f64> {
        (**self).edge_angles(at, radius)
    }
}
