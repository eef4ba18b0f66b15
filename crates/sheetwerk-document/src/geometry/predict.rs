// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Parallelogram closure: where the active corner would sit if the sheet
// outline were a parallelogram through the other three corners.

use sheetwerk_core::{Corner, Point, Quad};

/// Predict `active` from its two neighbours and the opposite corner:
/// `next + previous - opposite`.
///
/// Pure arithmetic; a non-parallelogram quad simply gets the algebraic answer.
pub fn parallelogram_point(quad: &Quad, active: Corner) -> Point {
    let opposite = quad.corner(active.opposite());
    let n1 = quad.corner(active.next());
    let n3 = quad.corner(active.previous());
    n1 + n3 - opposite
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_every_corner_of_a_parallelogram() {
        let quad = Quad::new([
            Point::new(10.0, 20.0),
            Point::new(110.0, 35.0),
            Point::new(130.0, 235.0),
            Point::new(30.0, 220.0),
        ]);
        for corner in Corner::ALL {
            let predicted = parallelogram_point(&quad, corner);
            assert!(
                predicted.distance_to(quad.corner(corner)) < 1e-9,
                "{corner:?}: {predicted:?}"
            );
        }
    }

    #[test]
    fn irregular_quad_gets_the_algebraic_prediction() {
        let quad = Quad::new([
            Point::new(0.0, 0.0),
            Point::new(100.0, 10.0),
            Point::new(90.0, 120.0),
            Point::new(-5.0, 80.0),
        ]);
        // TopRight: BottomRight + TopLeft - BottomLeft
        let p = parallelogram_point(&quad, Corner::TopRight);
        assert_eq!(p, Point::new(95.0, 40.0));
    }
}
