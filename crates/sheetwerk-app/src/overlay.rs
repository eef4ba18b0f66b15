// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Quad outline, corner handles and the parallelogram ghost, burned into a
// copy of the photo for `sheetwerk preview`.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_cross_mut, draw_hollow_circle_mut, draw_line_segment_mut};
use sheetwerk_core::{Corner, Point, Quad};
use sheetwerk_document::parallelogram_point;

const OUTLINE: Rgba<u8> = Rgba([0, 200, 255, 255]);
const HANDLE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const GHOST: Rgba<u8> = Rgba([255, 64, 160, 255]);
const HANDLE_RADIUS: i32 = 6;

/// Draw the outline and handles, then the ghost for `active` on top.
pub fn draw_quad(img: &mut RgbaImage, quad: &Quad, active: Option<Corner>) {
    for corner in Corner::ALL {
        let a = quad.corner(corner);
        let b = quad.corner(corner.next());
        draw_line_segment_mut(img, to_f32(a), to_f32(b), OUTLINE);
    }
    for p in quad.points() {
        draw_hollow_circle_mut(img, to_i32(*p), HANDLE_RADIUS, HANDLE);
    }
    if let Some(corner) = active {
        let (gx, gy) = to_i32(parallelogram_point(quad, corner));
        draw_hollow_circle_mut(img, (gx, gy), HANDLE_RADIUS, GHOST);
        draw_cross_mut(img, GHOST, gx, gy);
    }
}

fn to_f32(p: Point) -> (f32, f32) {
    (p.x as f32, p.y as f32)
}

fn to_i32(p: Point) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);

    #[test]
    fn outline_and_ghost_are_drawn() {
        let mut img = RgbaImage::from_pixel(100, 100, BACKGROUND);
        let quad = Quad::new([
            Point::new(10.0, 10.0),
            Point::new(80.0, 10.0),
            Point::new(90.0, 90.0),
            Point::new(10.0, 90.0),
        ]);
        draw_quad(&mut img, &quad, Some(Corner::TopRight));

        assert_eq!(*img.get_pixel(40, 10), OUTLINE);
        assert_eq!(*img.get_pixel(10, 50), OUTLINE);
        // Ghost for the top-right corner closes the parallelogram at (90, 10).
        assert_eq!(*img.get_pixel(90, 10), GHOST);
        assert_eq!(*img.get_pixel(50, 50), BACKGROUND);
    }

    #[test]
    fn no_ghost_without_an_active_corner() {
        let mut img = RgbaImage::from_pixel(100, 100, BACKGROUND);
        let quad = Quad::new([
            Point::new(10.0, 10.0),
            Point::new(80.0, 10.0),
            Point::new(90.0, 90.0),
            Point::new(10.0, 90.0),
        ]);
        draw_quad(&mut img, &quad, None);
        assert_eq!(*img.get_pixel(90, 10), BACKGROUND);
    }
}
