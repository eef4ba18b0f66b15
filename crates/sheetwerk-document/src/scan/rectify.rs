// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Commit step. Turn the accepted corner quadrilateral into a flat,
// axis-aligned raster plus the calibration record the app persists.

use image::RgbaImage;
use sheetwerk_core::error::{Result, SheetwerkError};
use sheetwerk_core::{AppConfig, Point, Quad, SheetCalibration};
use tracing::{debug, info, instrument, warn};

use crate::geometry::{Homography, warp};
use crate::image::PixelBuffer;

/// Output of a successful rectification.
#[derive(Debug, Clone)]
pub struct RectifiedSheet {
    /// The rectified raster. Pixels that fell outside the photo are transparent.
    pub image: RgbaImage,
    pub calibration: SheetCalibration,
}

/// Rectifies a photographed score sheet from its four corners.
///
/// ```ignore
/// let sheet = SheetRectifier::new(1920)
///     .with_aspect_ratio(210.0 / 297.0)?
///     .rectify(&PixelBuffer::from_image(&photo), &quad)?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetRectifier {
    max_output_dimension: u32,
    aspect_ratio: Option<f64>,
}

impl SheetRectifier {
    // -- Construction ---------------------------------------------------------

    pub fn new(max_output_dimension: u32) -> Self {
        Self {
            max_output_dimension: max_output_dimension.max(1),
            aspect_ratio: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.max_output_dimension)
    }

    /// Force the output height to `width / ratio` instead of the height the
    /// quadrilateral implies.
    pub fn with_aspect_ratio(self, ratio: f64) -> Result<Self> {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(SheetwerkError::InvalidAspectRatio(ratio));
        }
        Ok(Self {
            aspect_ratio: Some(ratio),
            ..self
        })
    }

    // -- Sizing ---------------------------------------------------------------

    /// Output raster size for `quad`.
    ///
    /// Width and height are the longer of each pair of opposite edges. The
    /// aspect override is applied first, then both sides are scaled down
    /// together if the longer one exceeds the cap.
    pub fn output_size(&self, quad: &Quad) -> (u32, u32) {
        let width = quad
            .top_left()
            .distance_to(quad.top_right())
            .max(quad.bottom_left().distance_to(quad.bottom_right()));
        let mut height = quad
            .top_left()
            .distance_to(quad.bottom_left())
            .max(quad.top_right().distance_to(quad.bottom_right()));

        if let Some(ratio) = self.aspect_ratio {
            height = width / ratio;
        }

        let cap = self.max_output_dimension as f64;
        let longest = width.max(height);
        let scale = if longest > cap { cap / longest } else { 1.0 };

        let to_px = |v: f64| (v * scale).round().max(1.0) as u32;
        (to_px(width), to_px(height))
    }

    // -- Rectification --------------------------------------------------------

    /// Solve the rect -> quad homography and warp `source` through it.
    #[instrument(skip(self, source))]
    pub fn rectify(&self, source: &PixelBuffer<'_>, quad: &Quad) -> Result<RectifiedSheet> {
        let (width, height) = self.output_size(quad);
        debug!(width, height, aspect = ?self.aspect_ratio, "Output size chosen");

        let (w, h) = (width as f64, height as f64);
        let rect = [
            Point::new(0.0, 0.0),
            Point::new(w, 0.0),
            Point::new(w, h),
            Point::new(0.0, h),
        ];

        let homography = Homography::solve(&rect, quad.points()).inspect_err(|err| {
            warn!(error = %err, ?quad, "Cannot rectify degenerate quadrilateral");
        })?;
        let image = warp(source, width, height, &homography)?;
        let calibration = SheetCalibration::new(*quad, width, height);

        info!(
            id = %calibration.id,
            width,
            height,
            aspect_ratio = calibration.aspect_ratio,
            "Sheet rectified"
        );
        Ok(RectifiedSheet { image, calibration })
    }
}

impl Default for SheetRectifier {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn quad(w: f64, h: f64) -> Quad {
        Quad::new([
            Point::new(0.0, 0.0),
            Point::new(w, 0.0),
            Point::new(w, h),
            Point::new(0.0, h),
        ])
    }

    #[test]
    fn natural_size_uses_longer_opposite_edges() {
        let q = Quad::new([
            Point::new(10.0, 10.0),
            Point::new(110.0, 10.0),
            Point::new(130.0, 210.0),
            Point::new(0.0, 210.0),
        ]);
        let (w, h) = SheetRectifier::new(1920).output_size(&q);
        assert_eq!(w, 130);
        assert_eq!(h, 201); // right edge: hypot(20, 200)
    }

    #[test]
    fn large_quads_are_capped_proportionally() {
        let (w, h) = SheetRectifier::new(1920).output_size(&quad(4000.0, 3000.0));
        assert_eq!((w, h), (1920, 1440));
    }

    #[test]
    fn aspect_override_replaces_height() {
        let rectifier = SheetRectifier::new(1920).with_aspect_ratio(2.0).unwrap();
        assert_eq!(rectifier.output_size(&quad(800.0, 300.0)), (800, 400));

        // A tall override is still capped.
        let rectifier = SheetRectifier::new(1920).with_aspect_ratio(0.5).unwrap();
        assert_eq!(rectifier.output_size(&quad(1600.0, 100.0)), (960, 1920));
    }

    #[test]
    fn bad_aspect_ratio_is_rejected() {
        assert!(SheetRectifier::new(1920).with_aspect_ratio(0.0).is_err());
        assert!(SheetRectifier::new(1920).with_aspect_ratio(f64::NAN).is_err());
    }

    #[test]
    fn identity_rectification_copies_the_photo() {
        let photo = RgbaImage::from_fn(64, 48, |x, y| Rgba([x as u8, y as u8, 7, 255]));
        let sheet = SheetRectifier::default()
            .rectify(&PixelBuffer::from_image(&photo), &quad(64.0, 48.0))
            .unwrap();
        assert_eq!(sheet.image, photo);
        assert_eq!(sheet.calibration.width, 64);
        assert_eq!(sheet.calibration.height, 48);
        assert!((sheet.calibration.aspect_ratio - 64.0 / 48.0).abs() < 1e-12);
    }

    #[test]
    fn collinear_quad_is_an_error_not_a_nan_raster() {
        let photo = RgbaImage::from_pixel(20, 20, Rgba([1, 2, 3, 255]));
        let q = Quad::new([
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(20.0, 20.0),
            Point::new(0.0, 20.0),
        ]);
        let err = SheetRectifier::default()
            .rectify(&PixelBuffer::from_image(&photo), &q)
            .unwrap_err();
        assert!(matches!(err, SheetwerkError::DegenerateGeometry(_)));
    }
}
