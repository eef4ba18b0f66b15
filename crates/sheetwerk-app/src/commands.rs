// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Subcommand implementations. Each returns its result to `main`, which
// handles printing and exit codes.

use std::path::Path;

use sheetwerk_core::{AppConfig, Corner, Point, Quad, SheetCalibration, ViewTransform};
use sheetwerk_document::image::io;
use sheetwerk_document::{PixelBuffer, SheetRectifier};
use sheetwerk_interact::{DetachedHub, InteractionController, MoveFeedback, PixelProbe};
use tracing::{info, instrument};

use crate::args::{InitConfigArgs, PreviewArgs, RectifyArgs, SnapArgs};
use crate::overlay;

pub type CliError = Box<dyn std::error::Error>;
pub type CliResult<T> = Result<T, CliError>;

/// Spacing of the two synthetic pointer samples used by `snap`.
const SAMPLE_INTERVAL_MS: f64 = 10.0;

/// Shorter gaps are read as 1 ms by the velocity tracker.
const MIN_SAMPLE_INTERVAL_MS: f64 = 1.0;

/// Warp the photo to a flat sheet and optionally persist the calibration.
#[instrument(skip_all, fields(image = %args.image.display()))]
pub fn rectify(args: &RectifyArgs, config: &AppConfig) -> CliResult<SheetCalibration> {
    let quad = match (&args.corners, &args.points) {
        (Some(quad), _) => *quad,
        (None, Some(path)) => load_points(path)?,
        (None, None) => return Err("either --corners or --points is required".into()),
    };
    let photo = io::open_rgba(&args.image)?;

    let mut rectifier = SheetRectifier::from_config(config);
    if let Some(ratio) = args.aspect {
        rectifier = rectifier.with_aspect_ratio(ratio)?;
    }
    let sheet = rectifier.rectify(&PixelBuffer::from_image(&photo), &quad)?;
    io::save(&sheet.image, &args.out)?;

    info!(out = %args.out.display(), "Rectified sheet written");

    if let Some(path) = &args.calibration {
        std::fs::write(path, serde_json::to_string_pretty(&sheet.calibration)?)?;
        info!(path = %path.display(), id = %sheet.calibration.id, "Calibration saved");
    }
    Ok(sheet.calibration)
}

/// Run one simulated pointer move through the drag controller.
///
/// The pointer arrives at `--at` along its row from a point inside the
/// image, timed so the controller measures exactly `--speed`.
#[instrument(skip_all, fields(image = %args.image.display(), corner = args.corner))]
pub fn snap(args: &SnapArgs, config: &AppConfig) -> CliResult<MoveFeedback> {
    let photo = io::open_rgba(&args.image)?;
    let corner = Corner::from_index(args.corner as usize)?;
    let quad = args
        .corners
        .unwrap_or_else(|| Quad::from_image_bounds(photo.width(), photo.height()));

    let hub = DetachedHub;
    let probe = PixelProbe::new(PixelBuffer::from_image(&photo));
    let mut controller = InteractionController::new(probe, quad, config.clone());
    controller.set_view(ViewTransform {
        x: 0.0,
        y: 0.0,
        scale: args.scale,
    });
    let view = controller.view();

    let (at, start, interval) = approach(args.at, args.speed, photo.width(), photo.height())?;
    let mut drag = controller.begin_drag(&hub, corner, view.image_to_screen(start), 0.0)?;
    let feedback = drag
        .pointer_move(view.image_to_screen(at), interval)
        .ok_or("drag ended before the move was applied")?;
    Ok(feedback)
}

/// Draw the quad and the ghost of the active corner onto the photo.
#[instrument(skip_all, fields(image = %args.image.display()))]
pub fn preview(args: &PreviewArgs) -> CliResult<()> {
    let mut photo = io::open_rgba(&args.image)?;
    let active = Corner::from_index(args.active as usize)?;
    overlay::draw_quad(&mut photo, &args.corners, Some(active));
    io::save(&photo, &args.out)?;
    info!(out = %args.out.display(), "Preview written");
    Ok(())
}

pub fn init_config(args: &InitConfigArgs) -> CliResult<()> {
    AppConfig::default().save(&args.out)?;
    info!(out = %args.out.display(), "Default config written");
    Ok(())
}

fn load_points(path: &Path) -> CliResult<Quad> {
    let points: Vec<Point> = serde_json::from_str(&std::fs::read_to_string(path)?)?;
    Ok(Quad::from_slice(&points)?)
}

/// Target, start point and elapsed ms for a pointer arriving at `at` at
/// `speed` px/ms.
///
/// Both points lie on the image so the controller never clamps them. The
/// start is `speed * 10 ms` away on the roomier side of `at`; when that does
/// not fit, the distance shrinks to the room available and the interval
/// shrinks with it.
fn approach(at: Point, speed: f64, width: u32, height: u32) -> CliResult<(Point, Point, f64)> {
    if !speed.is_finite() || speed < 0.0 {
        return Err(format!("--speed must be finite and non-negative, got {speed}").into());
    }
    let at = at.clamp_to(width as f64, height as f64);
    if speed == 0.0 {
        return Ok((at, at, SAMPLE_INTERVAL_MS));
    }

    let (left, right) = (at.x, width as f64 - at.x);
    let distance = (speed * SAMPLE_INTERVAL_MS).min(left.max(right));
    let interval = distance / speed;
    if interval < MIN_SAMPLE_INTERVAL_MS {
        return Err(format!("--speed {speed} px/ms cannot be reached on a {width}px wide image").into());
    }
    let x = if left >= distance { at.x - distance } else { at.x + distance };
    Ok((at, Point::new(x, at.y), interval))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use imageproc::drawing::draw_filled_rect_mut;
    use imageproc::rect::Rect;
    use sheetwerk_core::SnapKind;

    /// 160x120 light photo with a dark sheet from (40, 30) to (120, 90).
    fn write_photo(dir: &Path) -> std::path::PathBuf {
        let mut img = RgbaImage::from_pixel(160, 120, Rgba([240, 240, 240, 255]));
        draw_filled_rect_mut(&mut img, Rect::at(40, 30).of_size(80, 60), Rgba([20, 20, 20, 255]));
        let path = dir.join("photo.png");
        io::save(&img, &path).unwrap();
        path
    }

    fn sheet_quad() -> Quad {
        Quad::new([
            Point::new(40.0, 30.0),
            Point::new(120.0, 30.0),
            Point::new(120.0, 90.0),
            Point::new(40.0, 90.0),
        ])
    }

    #[test]
    fn rectify_writes_png_and_calibration() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_photo(dir.path());
        let args = RectifyArgs {
            image,
            corners: Some(sheet_quad()),
            points: None,
            aspect: None,
            out: dir.path().join("sheet.png"),
            calibration: Some(dir.path().join("sheet.json")),
        };

        let calibration = rectify(&args, &AppConfig::default()).unwrap();
        assert_eq!((calibration.width, calibration.height), (80, 60));

        let out = io::open_rgba(&args.out).unwrap();
        assert_eq!(out.dimensions(), (80, 60));
        // Interior of the sheet is the dark fill.
        assert_eq!(out.get_pixel(40, 30)[0], 20);

        let saved: SheetCalibration =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("sheet.json")).unwrap()).unwrap();
        assert_eq!(saved.id, calibration.id);
        assert_eq!(saved.points, sheet_quad());
        assert_eq!((saved.width, saved.height), (80, 60));
    }

    #[test]
    fn rectify_reads_points_file_and_honours_aspect() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_photo(dir.path());
        let points = dir.path().join("points.json");
        std::fs::write(&points, serde_json::to_string(&sheet_quad()).unwrap()).unwrap();
        let args = RectifyArgs {
            image,
            corners: None,
            points: Some(points),
            aspect: Some(2.0),
            out: dir.path().join("sheet.png"),
            calibration: None,
        };

        let calibration = rectify(&args, &AppConfig::default()).unwrap();
        assert_eq!((calibration.width, calibration.height), (80, 40));
    }

    #[test]
    fn snap_reports_corner_snap_for_slow_pointer() {
        let dir = tempfile::tempdir().unwrap();
        let args = SnapArgs {
            image: write_photo(dir.path()),
            corners: None,
            corner: 0,
            at: Point::new(43.0, 33.0),
            scale: 1.0,
            speed: 0.1,
        };

        let feedback = snap(&args, &AppConfig::default()).unwrap();
        assert_eq!(feedback.snap.kind, SnapKind::Corner);
        assert!(feedback.point.distance_to(Point::new(40.0, 30.0)) < 1.5, "{:?}", feedback.point);
        assert!((feedback.speed - 0.1).abs() < 1e-9);
    }

    #[test]
    fn snap_with_snapping_disabled_returns_the_pointer() {
        let dir = tempfile::tempdir().unwrap();
        let args = SnapArgs {
            image: write_photo(dir.path()),
            corners: None,
            corner: 0,
            at: Point::new(43.0, 33.0),
            scale: 1.0,
            speed: 0.0,
        };
        let config = AppConfig {
            snapping_enabled: false,
            ..AppConfig::default()
        };

        let feedback = snap(&args, &config).unwrap();
        assert_eq!(feedback.snap.kind, SnapKind::None);
        assert_eq!(feedback.point, Point::new(43.0, 33.0));
    }

    #[test]
    fn preview_and_init_config_write_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("preview.png");
        preview(&PreviewArgs {
            image: write_photo(dir.path()),
            corners: sheet_quad(),
            active: 2,
            out: out.clone(),
        })
        .unwrap();
        assert_eq!(io::open_rgba(&out).unwrap().dimensions(), (160, 120));

        let config_path = dir.path().join("config.json");
        init_config(&InitConfigArgs { out: config_path.clone() }).unwrap();
        assert_eq!(AppConfig::load(&config_path).unwrap(), AppConfig::default());
    }

    #[test]
    fn snap_keeps_requested_speed_when_the_run_up_leaves_the_image() {
        let dir = tempfile::tempdir().unwrap();
        // 10 px/ms over 10 ms is 100 px, more than either side of x = 80 offers.
        let args = SnapArgs {
            image: write_photo(dir.path()),
            corners: None,
            corner: 0,
            at: Point::new(80.0, 60.0),
            scale: 1.0,
            speed: 10.0,
        };

        let feedback = snap(&args, &AppConfig::default()).unwrap();
        assert!((feedback.speed - 10.0).abs() < 1e-9, "{}", feedback.speed);
    }

    #[test]
    fn approach_stays_on_the_image() {
        let (_, start, interval) = approach(Point::new(50.0, 5.0), 1.0, 100, 100).unwrap();
        assert_eq!((start, interval), (Point::new(40.0, 5.0), 10.0));

        let (_, start, interval) = approach(Point::new(3.0, 5.0), 1.0, 100, 100).unwrap();
        assert_eq!((start, interval), (Point::new(13.0, 5.0), 10.0));

        let (_, start, interval) = approach(Point::new(80.0, 60.0), 10.0, 160, 120).unwrap();
        assert_eq!((start, interval), (Point::new(0.0, 60.0), 8.0));
    }

    #[test]
    fn approach_clamps_the_target_and_handles_a_still_pointer() {
        let (at, start, interval) = approach(Point::new(500.0, -4.0), 0.0, 160, 120).unwrap();
        assert_eq!(at, Point::new(160.0, 0.0));
        assert_eq!(start, at);
        assert_eq!(interval, SAMPLE_INTERVAL_MS);
    }

    #[test]
    fn approach_rejects_unreachable_or_invalid_speeds() {
        assert!(approach(Point::new(80.0, 60.0), 1000.0, 160, 120).is_err());
        assert!(approach(Point::new(80.0, 60.0), -1.0, 160, 120).is_err());
        assert!(approach(Point::new(80.0, 60.0), f64::NAN, 160, 120).is_err());
    }
}
