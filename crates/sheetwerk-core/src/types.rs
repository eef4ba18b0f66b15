// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Sheetwerk: points, the corner quadrilateral, the
// view transform, snap feedback, and the accepted calibration record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};
use uuid::Uuid;

use crate::error::{Result, SheetwerkError};

/// Unique identifier for a rectified score sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SheetId(pub Uuid);

impl SheetId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SheetId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SheetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// -- Points -------------------------------------------------------------------

/// A point in source-image pixel space (or screen space, where noted).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Clamp into the closed rectangle `[0, width] x [0, height]`.
    pub fn clamp_to(self, width: f64, height: f64) -> Self {
        Self {
            x: self.x.clamp(0.0, width),
            y: self.y.clamp(0.0, height),
        }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

// -- Corners and the quadrilateral --------------------------------------------

/// One of the four corners of the sheet, in quadrilateral order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    /// All corners in quadrilateral order.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    /// Position of this corner inside a [`Quad`].
    pub fn index(self) -> usize {
        match self {
            Self::TopLeft => 0,
            Self::TopRight => 1,
            Self::BottomRight => 2,
            Self::BottomLeft => 3,
        }
    }

    /// Corner for a quadrilateral index; anything outside `0..4` is rejected.
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(SheetwerkError::CornerIndex(index))
    }

    /// The following corner, clockwise.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % 4]
    }

    /// The preceding corner, clockwise.
    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + 3) % 4]
    }

    /// The diagonally opposite corner.
    pub fn opposite(self) -> Self {
        Self::ALL[(self.index() + 2) % 4]
    }
}

/// The four sheet corners, ordered `[top_left, top_right, bottom_right, bottom_left]`.
///
/// The order defines the correspondence with the output rectangle
/// `[(0,0), (W,0), (W,H), (0,H)]`, so points are only ever replaced in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quad {
    points: [Point; 4],
}

impl Quad {
    pub const fn new(points: [Point; 4]) -> Self {
        Self { points }
    }

    /// Default quadrilateral covering the whole image.
    pub fn from_image_bounds(width: u32, height: u32) -> Self {
        let (w, h) = (width as f64, height as f64);
        Self::new([
            Point::new(0.0, 0.0),
            Point::new(w, 0.0),
            Point::new(w, h),
            Point::new(0.0, h),
        ])
    }

    /// Restore from a previously persisted point list, which must hold
    /// exactly four points.
    pub fn from_slice(points: &[Point]) -> Result<Self> {
        let points: [Point; 4] = points.try_into().map_err(|_| {
            SheetwerkError::DegenerateGeometry(format!(
                "a sheet quadrilateral needs exactly 4 points, got {}",
                points.len()
            ))
        })?;
        Ok(Self::new(points))
    }

    pub fn points(&self) -> &[Point; 4] {
        &self.points
    }

    pub fn corner(&self, corner: Corner) -> Point {
        self.points[corner.index()]
    }

    pub fn set_corner(&mut self, corner: Corner, point: Point) {
        self.points[corner.index()] = point;
    }

    pub fn top_left(&self) -> Point {
        self.corner(Corner::TopLeft)
    }

    pub fn top_right(&self) -> Point {
        self.corner(Corner::TopRight)
    }

    pub fn bottom_right(&self) -> Point {
        self.corner(Corner::BottomRight)
    }

    pub fn bottom_left(&self) -> Point {
        self.corner(Corner::BottomLeft)
    }
}

// -- View transform -----------------------------------------------------------

/// Pan/zoom mapping between screen space and source-image space.
///
/// A source point `p` is drawn at `(p.x * scale + x, p.y * scale + y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }
}

impl ViewTransform {
    pub fn screen_to_image(&self, screen: Point) -> Point {
        Point::new((screen.x - self.x) / self.scale, (screen.y - self.y) / self.scale)
    }

    pub fn image_to_screen(&self, image: Point) -> Point {
        Point::new(image.x * self.scale + self.x, image.y * self.scale + self.y)
    }
}

// -- Snap feedback ------------------------------------------------------------

/// What the dragged corner snapped to on the last move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapKind {
    #[default]
    None,
    /// A detected corner or the parallelogram prediction.
    Corner,
    /// The gradient centroid of a nearby line.
    Line,
}

/// UI feedback for the active drag. Recomputed on every move, never persisted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SnapState {
    pub kind: SnapKind,
    /// Guide-line angles in degrees, `[0, 180)`.
    pub guide_angles: Vec<f64>,
    /// Parallelogram prediction for the active corner, when snapping is on.
    pub geometric_ghost: Option<Point>,
}

impl SnapState {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

// -- Accepted calibration -----------------------------------------------------

/// The durable outcome of a rectification: accepted corners plus the
/// geometry of the raster that was produced from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetCalibration {
    pub id: SheetId,
    pub points: Quad,
    pub width: u32,
    pub height: u32,
    /// `width / height` of the rectified raster.
    pub aspect_ratio: f64,
    pub rectified_at: DateTime<Utc>,
}

impl SheetCalibration {
    pub fn new(points: Quad, width: u32, height: u32) -> Self {
        Self {
            id: SheetId::new(),
            points,
            width,
            height,
            aspect_ratio: width as f64 / height as f64,
            rectified_at: Utc::now(),
        }
    }
}
