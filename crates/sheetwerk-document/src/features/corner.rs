// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Corner search: the pixel in a small window with the strongest gradient in
// both axes at once, biased toward where the user is pointing.

use serde::Serialize;
use sheetwerk_core::Point;
use tracing::trace;

use super::directions::{FALLBACK_ANGLES, local_edge_directions};
use super::{CORNER_SCORE_FLOOR, central_gradient, interior};
use crate::image::{Luminance, PixelBuffer};

/// A confident corner near the query point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CornerHit {
    /// Source-image position of the winning pixel.
    pub point: Point,
    /// Guide angles at the winning pixel.
    pub angles: Vec<f64>,
    pub score: f64,
}

/// Scan the `2 * radius` square around `(cx, cy)` for the best corner.
///
/// Per pixel: `(|gx| + |gy|) + 2 * min(|gx|, |gy|) - 2 * distance_from_centre`.
/// The middle term separates corners from plain edges; the last pulls the
/// answer toward the pointer. `None` when the best score is under 150.
pub fn find_strongest_corner(
    buffer: &PixelBuffer<'_>,
    cx: f64,
    cy: f64,
    radius: u32,
) -> Option<CornerHit> {
    let window = buffer.window_around(cx, cy, radius);
    let centre = radius as f64;

    let mut best: Option<(u32, u32, f64)> = None;
    for (x, y) in interior(&window) {
        let (gx, gy) = central_gradient(&window, x, y);
        let (ax, ay) = (gx.abs(), gy.abs());
        let distance = (x as f64 - centre).hypot(y as f64 - centre);
        let score = (ax + ay) + 2.0 * ax.min(ay) - 2.0 * distance;
        if best.is_none_or(|(_, _, s)| score > s) {
            best = Some((x, y, score));
        }
    }

    let (bx, by, score) = best?;
    if score < CORNER_SCORE_FLOOR {
        trace!(cx, cy, score, "No confident corner nearby");
        return None;
    }

    let mut angles = local_edge_directions(&window, bx as i64, by as i64);
    if angles.is_empty() {
        angles = FALLBACK_ANGLES.to_vec();
    }
    let (px, py) = window.to_source(bx as f64, by as f64);
    trace!(px, py, score, ?angles, "Corner found");

    Some(CornerHit {
        point: Point::new(px, py),
        angles,
        score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::fixtures::{black_square, soft_vertical_edge, uniform};

    #[test]
    fn uniform_region_has_no_corner() {
        let img = uniform(60);
        let buf = PixelBuffer::from_image(&img);
        assert!(find_strongest_corner(&buf, 30.0, 30.0, 15).is_none());
    }

    #[test]
    fn recovers_each_corner_of_a_black_square() {
        let img = black_square(160, 50, 50);
        let buf = PixelBuffer::from_image(&img);
        // True corner pixels of the square covering [50, 100).
        let corners = [(50.0, 50.0), (99.0, 50.0), (99.0, 99.0), (50.0, 99.0)];
        let nudges = [(3.0, 2.0), (-4.0, 3.0), (-2.0, -4.0), (4.0, -3.0)];

        for ((tx, ty), (dx, dy)) in corners.into_iter().zip(nudges) {
            let hit = find_strongest_corner(&buf, tx + dx, ty + dy, 10)
                .unwrap_or_else(|| panic!("no corner near ({tx}, {ty})"));
            let err = hit.point.distance_to(Point::new(tx, ty));
            assert!(err <= 2.0, "corner ({tx},{ty}) found at {:?}", hit.point);
            assert_eq!(hit.angles.len(), 2, "{:?}", hit.angles);
        }
    }

    #[test]
    fn soft_edge_is_not_a_corner() {
        // 100 grey levels of contrast: strong enough to be a line, never a corner.
        let img = soft_vertical_edge(80, 80, 40, 100);
        let buf = PixelBuffer::from_image(&img);
        assert!(find_strongest_corner(&buf, 40.0, 40.0, 25).is_none());
    }

    #[test]
    fn window_hanging_off_the_image_sees_the_border() {
        // White photo: the transparent-black overhang makes the image corner
        // itself look like a corner.
        let img = image::RgbaImage::from_pixel(50, 50, crate::features::fixtures::WHITE);
        let buf = PixelBuffer::from_image(&img);
        let hit = find_strongest_corner(&buf, 2.0, 2.0, 10).expect("image corner");
        assert!(hit.point.distance_to(Point::new(0.0, 0.0)) <= 2.0, "{:?}", hit.point);
    }
}
