// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Read-only RGBA pixel views. Every analyzer borrows the decoded source
// through `PixelBuffer`; nothing in this crate ever writes to it.

use image::RgbaImage;
use sheetwerk_core::error::{Result, SheetwerkError};

/// Anything that can report a per-pixel luminance over a fixed grid.
pub trait Luminance {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Rec.601 luma in `0.0..=255.0`. Callers stay inside the grid.
    fn luminance(&self, x: u32, y: u32) -> f64;
}

#[inline]
fn luma601(r: u8, g: u8, b: u8) -> f64 {
    0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64
}

/// Borrowed, contiguous RGBA8 buffer with known dimensions.
#[derive(Debug, Clone, Copy)]
pub struct PixelBuffer<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
}

impl<'a> PixelBuffer<'a> {
    /// Wrap a raw RGBA slice. The slice must hold exactly `width * height * 4` bytes.
    pub fn new(data: &'a [u8], width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SheetwerkError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(SheetwerkError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Borrow an already-decoded `RgbaImage`.
    pub fn from_image(image: &'a RgbaImage) -> Self {
        Self {
            data: image.as_raw(),
            width: image.width(),
            height: image.height(),
        }
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// RGBA value at `(x, y)`.
    pub fn rgba(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// A `width x height` crop whose top-left corner sits at `(origin_x, origin_y)`
    /// in source coordinates. The crop may hang over the source edge.
    pub fn window(&self, origin_x: i64, origin_y: i64, width: u32, height: u32) -> Window<'a> {
        Window {
            source: *self,
            origin_x,
            origin_y,
            width,
            height,
        }
    }

    /// Square window of side `2 * radius` centred on the pixel nearest `(cx, cy)`.
    pub fn window_around(&self, cx: f64, cy: f64, radius: u32) -> Window<'a> {
        let r = radius as i64;
        self.window(
            cx.round() as i64 - r,
            cy.round() as i64 - r,
            radius * 2,
            radius * 2,
        )
    }
}

impl Luminance for PixelBuffer<'_> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn luminance(&self, x: u32, y: u32) -> f64 {
        let [r, g, b, _] = self.rgba(x, y);
        luma601(r, g, b)
    }
}

/// A crop of a [`PixelBuffer`], addressed in window-local coordinates.
///
/// Pixels that fall outside the source read as transparent black, like a
/// canvas `getImageData` call that overhangs the bitmap.
#[derive(Debug, Clone, Copy)]
pub struct Window<'a> {
    source: PixelBuffer<'a>,
    origin_x: i64,
    origin_y: i64,
    width: u32,
    height: u32,
}

impl Window<'_> {
    pub fn origin(&self) -> (i64, i64) {
        (self.origin_x, self.origin_y)
    }

    /// Map window-local coordinates back to source coordinates.
    pub fn to_source(&self, x: f64, y: f64) -> (f64, f64) {
        (self.origin_x as f64 + x, self.origin_y as f64 + y)
    }
}

impl Luminance for Window<'_> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn luminance(&self, x: u32, y: u32) -> f64 {
        let sx = self.origin_x + x as i64;
        let sy = self.origin_y + y as i64;
        if sx < 0 || sy < 0 || sx >= self.source.width as i64 || sy >= self.source.height as i64 {
            return 0.0;
        }
        self.source.luminance(sx as u32, sy as u32)
    }
}
