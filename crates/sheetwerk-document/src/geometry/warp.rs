// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Backward-mapping warp. Every destination pixel is pushed through the
// homography into source space and filled with the nearest source pixel.
// Destination pixels whose source lies outside the photo stay fully
// transparent; nothing is clamped to the border.

use image::{Rgba, RgbaImage};
use sheetwerk_core::Point;
use sheetwerk_core::error::{Result, SheetwerkError};
use tracing::{debug, instrument};

use super::homography::Homography;
use crate::image::{Luminance, PixelBuffer};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Resample `source` into a `dst_width x dst_height` raster.
///
/// `h` must map destination coordinates to source coordinates.
#[instrument(skip(source, h), fields(src_w = source.width(), src_h = source.height()))]
pub fn warp(
    source: &PixelBuffer<'_>,
    dst_width: u32,
    dst_height: u32,
    h: &Homography,
) -> Result<RgbaImage> {
    if dst_width == 0 || dst_height == 0 {
        return Err(SheetwerkError::InvalidDimensions {
            width: dst_width,
            height: dst_height,
        });
    }

    let (src_w, src_h) = (source.width(), source.height());
    let (src_wf, src_hf) = (src_w as f64, src_h as f64);
    let mut output = RgbaImage::from_pixel(dst_width, dst_height, TRANSPARENT);
    let mut covered = 0usize;

    for (x, y, pixel) in output.enumerate_pixels_mut() {
        let Some(src) = h.map(Point::new(x as f64, y as f64)) else {
            continue;
        };
        // NaN fails every comparison and stays transparent.
        if !(src.x >= 0.0 && src.x < src_wf && src.y >= 0.0 && src.y < src_hf) {
            continue;
        }
        let sx = (src.x.round() as u32).min(src_w - 1);
        let sy = (src.y.round() as u32).min(src_h - 1);
        let [r, g, b, _] = source.rgba(sx, sy);
        *pixel = Rgba([r, g, b, 255]);
        covered += 1;
    }

    debug!(
        dst_width,
        dst_height,
        covered,
        transparent = (dst_width as usize * dst_height as usize) - covered,
        "Warp complete"
    );
    Ok(output)
}
