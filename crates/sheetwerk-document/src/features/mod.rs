// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Snap features: lightweight gradient heuristics that run on every pointer
// move. All of them read small windows (at most 60x60) of a borrowed buffer
// and report "nothing found" as `None` or an empty list.
//
// The numeric thresholds below were tuned by hand against real score-sheet
// photos. Changing them changes how the drag feels.

pub mod corner;
pub mod directions;
pub mod edge;

pub use corner::{CornerHit, find_strongest_corner};
pub use directions::{FALLBACK_ANGLES, edge_angles, local_edge_directions};
pub use edge::snap_to_edge;

use crate::image::Luminance;

/// Half-width of the direction-histogram window.
pub const DIRECTION_WINDOW: u32 = 5;
/// Gradients at or below this magnitude are texture noise for the histogram.
pub const DIRECTION_MAGNITUDE_FLOOR: f64 = 60.0;
/// Total histogram mass below which a region is featureless.
pub const FEATURELESS_MASS: f64 = 500.0;
/// Minimum bin score for a histogram peak.
pub const PEAK_SCORE_FLOOR: f64 = 200.0;
/// Reported peaks must differ by more than this many degrees.
pub const PEAK_SEPARATION_DEG: f64 = 20.0;

/// Best cornerness score below which no corner is reported.
pub const CORNER_SCORE_FLOOR: f64 = 150.0;

/// Edge-snap gradients must exceed this magnitude to count.
pub const EDGE_MAGNITUDE_FLOOR: f64 = 50.0;
/// Accumulated squared-magnitude weight needed for an edge snap.
pub const EDGE_WEIGHT_FLOOR: f64 = 10_000.0;

/// Central-difference luminance gradient at an interior pixel.
#[inline]
pub(crate) fn central_gradient<S: Luminance + ?Sized>(src: &S, x: u32, y: u32) -> (f64, f64) {
    let gx = src.luminance(x + 1, y) - src.luminance(x - 1, y);
    let gy = src.luminance(x, y + 1) - src.luminance(x, y - 1);
    (gx, gy)
}

/// Iterate the interior pixels (those with all four neighbours) of `src`.
pub(crate) fn interior<S: Luminance + ?Sized>(src: &S) -> impl Iterator<Item = (u32, u32)> {
    let (w, h) = (src.width(), src.height());
    let xs = 1..w.saturating_sub(1);
    (1..h.saturating_sub(1)).flat_map(move |y| xs.clone().map(move |x| (x, y)))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use image::{Rgba, RgbaImage};
    use imageproc::drawing::draw_filled_rect_mut;
    use imageproc::rect::Rect;

    pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    /// `size x size` white canvas with a black square covering
    /// `[origin, origin + side)` on both axes.
    pub fn black_square(size: u32, origin: i32, side: u32) -> RgbaImage {
        let mut img = RgbaImage::from_pixel(size, size, WHITE);
        draw_filled_rect_mut(&mut img, Rect::at(origin, origin).of_size(side, side), BLACK);
        img
    }

    /// Vertical step of `contrast` grey levels at column `edge_x`.
    pub fn soft_vertical_edge(width: u32, height: u32, edge_x: u32, contrast: u8) -> RgbaImage {
        let dark = 100u8;
        let light = dark.saturating_add(contrast);
        RgbaImage::from_fn(width, height, |x, _| {
            let v = if x < edge_x { dark } else { light };
            Rgba([v, v, v, 255])
        })
    }

    pub fn uniform(size: u32) -> RgbaImage {
        RgbaImage::from_pixel(size, size, Rgba([180, 180, 180, 255]))
    }
}
