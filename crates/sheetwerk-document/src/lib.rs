// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// sheetwerk-document — Pixel work for the Sheetwerk score-sheet digitizer.
//
// Provides read-only pixel views, the four-point homography solver, the
// backward-mapping warp, the snap heuristics used while dragging corners
// (corner search, line centroid, edge-direction histogram, parallelogram
// prediction), and the commit-time `SheetRectifier`.

pub mod features;
pub mod geometry;
pub mod image;
pub mod scan;

// Re-export the primary items so callers can use `sheetwerk_document::Homography` etc.
pub use features::{CornerHit, edge_angles, find_strongest_corner, local_edge_directions, snap_to_edge};
pub use geometry::{Homography, parallelogram_point, warp};
pub use crate::image::{Luminance, PixelBuffer};
pub use scan::{RectifiedSheet, SheetRectifier};
