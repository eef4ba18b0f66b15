// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Local edge directions from a magnitude-weighted orientation histogram.
// Used for the crosshair guide lines drawn through the active corner.

use tracing::trace;

use super::{
    DIRECTION_MAGNITUDE_FLOOR, DIRECTION_WINDOW, FEATURELESS_MASS, PEAK_SCORE_FLOOR,
    PEAK_SEPARATION_DEG, central_gradient,
};
use crate::image::{Luminance, PixelBuffer};

const BIN_COUNT: usize = 36;
const BIN_WIDTH_DEG: f64 = 180.0 / BIN_COUNT as f64;

/// Guide angles shown when the neighbourhood has no clear lines.
pub const FALLBACK_ANGLES: [f64; 2] = [0.0, 90.0];

/// Up to two dominant line angles (degrees, `[0, 180)`) in the 11x11
/// neighbourhood of `(cx, cy)`.
///
/// Lines are undirected, so each gradient votes for its tangent angle folded
/// into half a turn. Returns an empty list for a featureless region.
pub fn local_edge_directions<S: Luminance + ?Sized>(src: &S, cx: i64, cy: i64) -> Vec<f64> {
    let (w, h) = (src.width() as i64, src.height() as i64);
    let r = DIRECTION_WINDOW as i64;
    let mut histogram = [0.0f64; BIN_COUNT];
    let mut mass = 0.0;

    for y in (cy - r).max(1)..=(cy + r).min(h - 2) {
        for x in (cx - r).max(1)..=(cx + r).min(w - 2) {
            let (gx, gy) = central_gradient(src, x as u32, y as u32);
            let magnitude = gx.hypot(gy);
            if magnitude <= DIRECTION_MAGNITUDE_FLOOR {
                continue;
            }
            let tangent = (gy.atan2(gx).to_degrees() + 90.0).rem_euclid(180.0);
            let bin = ((tangent / BIN_WIDTH_DEG) as usize).min(BIN_COUNT - 1);
            histogram[bin] += magnitude;
            mass += magnitude;
        }
    }

    if mass < FEATURELESS_MASS {
        return Vec::new();
    }

    let mut peaks: Vec<(usize, f64)> = (0..BIN_COUNT)
        .filter_map(|i| {
            let score = histogram[i];
            let left = histogram[(i + BIN_COUNT - 1) % BIN_COUNT];
            let right = histogram[(i + 1) % BIN_COUNT];
            (score > PEAK_SCORE_FLOOR && score >= left && score >= right).then_some((i, score))
        })
        .collect();
    peaks.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut angles: Vec<f64> = Vec::with_capacity(2);
    for (bin, _) in peaks {
        let angle = bin as f64 * BIN_WIDTH_DEG + BIN_WIDTH_DEG / 2.0;
        if angles.iter().all(|&a| line_angle_gap(a, angle) > PEAK_SEPARATION_DEG) {
            angles.push(angle);
        }
        if angles.len() == 2 {
            break;
        }
    }

    trace!(cx, cy, mass, ?angles, "Local edge directions");
    angles
}

/// Guide angles around `(x, y)` in `buffer`, measured over a `2 * radius`
/// crop. Falls back to a plain horizontal/vertical cross.
pub fn edge_angles(buffer: &PixelBuffer<'_>, x: f64, y: f64, radius: u32) -> Vec<f64> {
    let window = buffer.window_around(x, y, radius);
    let angles = local_edge_directions(&window, radius as i64, radius as i64);
    if angles.is_empty() {
        FALLBACK_ANGLES.to_vec()
    } else {
        angles
    }
}

/// Separation between two undirected line angles, in `[0, 90]`.
fn line_angle_gap(a: f64, b: f64) -> f64 {
    let d = (a - b).abs().rem_euclid(180.0);
    d.min(180.0 - d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::fixtures::{black_square, soft_vertical_edge, uniform};

    #[test]
    fn uniform_region_has_no_directions() {
        let img = uniform(40);
        let buf = PixelBuffer::from_image(&img);
        assert!(local_edge_directions(&buf, 20, 20).is_empty());
    }

    #[test]
    fn uniform_region_falls_back_to_cross() {
        let img = uniform(40);
        let buf = PixelBuffer::from_image(&img);
        assert_eq!(edge_angles(&buf, 20.0, 20.0, 10), vec![0.0, 90.0]);
    }

    #[test]
    fn vertical_edge_reports_one_vertical_line() {
        let img = soft_vertical_edge(40, 40, 20, 150);
        let buf = PixelBuffer::from_image(&img);
        let angles = local_edge_directions(&buf, 20, 20);
        assert_eq!(angles, vec![92.5]);
    }

    #[test]
    fn square_corner_reports_two_perpendicular_lines() {
        let img = black_square(120, 40, 40);
        let buf = PixelBuffer::from_image(&img);
        let angles = edge_angles(&buf, 40.0, 40.0, 10);
        assert_eq!(angles.len(), 2, "{angles:?}");
        assert!(line_angle_gap(angles[0], angles[1]) > 60.0, "{angles:?}");
    }

    #[test]
    fn angle_gap_wraps_at_half_turn() {
        assert!((line_angle_gap(2.5, 177.5) - 5.0).abs() < 1e-9);
        assert!((line_angle_gap(2.5, 92.5) - 90.0).abs() < 1e-9);
    }
}
