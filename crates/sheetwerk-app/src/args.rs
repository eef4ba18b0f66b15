// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Subcommand arguments and the small value parsers they need.

use std::path::PathBuf;

use clap::Args;
use sheetwerk_core::{Point, Quad};

#[derive(Debug, Clone, Args)]
pub struct RectifyArgs {
    /// Path to the source photo.
    #[arg(long)]
    pub image: PathBuf,

    /// Corners as "x,y x,y x,y x,y" (top-left, top-right, bottom-right, bottom-left).
    #[arg(long, value_parser = parse_quad, conflicts_with = "points", required_unless_present = "points")]
    pub corners: Option<Quad>,

    /// JSON file holding an array of four {"x", "y"} points.
    #[arg(long)]
    pub points: Option<PathBuf>,

    /// Force width / height of the output, e.g. 0.7071 for A4 portrait.
    #[arg(long)]
    pub aspect: Option<f64>,

    /// Where to write the rectified PNG.
    #[arg(long)]
    pub out: PathBuf,

    /// Where to write the accepted calibration (JSON).
    #[arg(long)]
    pub calibration: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct SnapArgs {
    /// Path to the source photo.
    #[arg(long)]
    pub image: PathBuf,

    /// Current corners; defaults to the image bounds.
    #[arg(long, value_parser = parse_quad)]
    pub corners: Option<Quad>,

    /// Index of the corner being dragged (0 = top-left, clockwise).
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..4))]
    pub corner: u8,

    /// Pointer position in image pixels, "x,y".
    #[arg(long, value_parser = parse_point)]
    pub at: Point,

    /// View zoom; shrinks the snap radii as it grows.
    #[arg(long, default_value_t = 1.0)]
    pub scale: f64,

    /// Simulated pointer speed in image px/ms.
    #[arg(long, default_value_t = 0.0)]
    pub speed: f64,
}

#[derive(Debug, Clone, Args)]
pub struct PreviewArgs {
    /// Path to the source photo.
    #[arg(long)]
    pub image: PathBuf,

    /// Corners as "x,y x,y x,y x,y".
    #[arg(long, value_parser = parse_quad)]
    pub corners: Quad,

    /// Corner whose parallelogram ghost is drawn.
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..4))]
    pub active: u8,

    /// Where to write the annotated PNG.
    #[arg(long)]
    pub out: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct InitConfigArgs {
    /// Where to write the default configuration.
    #[arg(long)]
    pub out: PathBuf,
}

/// Parse `"x,y"`.
pub fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got {s:?}"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    let p = Point::new(x, y);
    if !p.is_finite() {
        return Err(format!("non-finite point {s:?}"));
    }
    Ok(p)
}

/// Parse four whitespace-separated `"x,y"` points.
pub fn parse_quad(s: &str) -> Result<Quad, String> {
    let points = s
        .split_whitespace()
        .map(parse_point)
        .collect::<Result<Vec<_>, _>>()?;
    Quad::from_slice(&points).map_err(|e| e.to_string())
}
