// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Four-point homography solver.
//
// For the commit step the solve runs rect -> quad, so the resulting matrix
// maps an output pixel straight to the source pixel it should sample.

use sheetwerk_core::Point;
use sheetwerk_core::error::{Result, SheetwerkError};
use tracing::{trace, warn};

/// Smallest pivot magnitude accepted during elimination.
const PIVOT_EPSILON: f64 = 1e-10;

/// Twice-triangle-area threshold, relative to the squared point extent,
/// below which three points count as collinear.
const COLLINEAR_EPSILON: f64 = 1e-6;

/// Denominators this close to zero map to infinity.
const PROJECTIVE_EPSILON: f64 = 1e-12;

/// A 3x3 projective transform stored row-major as `h0..h8`, with `h8 == 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Homography {
    coefficients: [f64; 9],
}

impl Homography {
    pub fn identity() -> Self {
        Self {
            coefficients: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        }
    }

    pub fn from_coefficients(coefficients: [f64; 9]) -> Self {
        Self { coefficients }
    }

    pub fn coefficients(&self) -> &[f64; 9] {
        &self.coefficients
    }

    /// Solve for the homography taking each `src[i]` to `dst[i]`.
    ///
    /// Builds the 8x8 system (two rows per correspondence) and solves it by
    /// Gaussian elimination with partial pivoting followed by back-substitution.
    /// Collinear or coincident point sets are rejected instead of producing
    /// `NaN` coefficients.
    pub fn solve(src: &[Point; 4], dst: &[Point; 4]) -> Result<Self> {
        ensure_non_degenerate(src, "source")?;
        ensure_non_degenerate(dst, "destination")?;

        // Augmented matrix: 8 equations, 8 unknowns + right-hand side.
        let mut a = [[0.0f64; 9]; 8];
        for (i, (s, d)) in src.iter().zip(dst.iter()).enumerate() {
            a[2 * i] = [s.x, s.y, 1.0, 0.0, 0.0, 0.0, -s.x * d.x, -s.y * d.x, d.x];
            a[2 * i + 1] = [0.0, 0.0, 0.0, s.x, s.y, 1.0, -s.x * d.y, -s.y * d.y, d.y];
        }

        for col in 0..8 {
            let pivot_row = (col..8)
                .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
                .unwrap_or(col);
            let pivot = a[pivot_row][col];
            if pivot.abs() < PIVOT_EPSILON {
                warn!(col, pivot, "Homography pivot vanished");
                return Err(SheetwerkError::DegenerateGeometry(format!(
                    "homography system is singular at column {col}"
                )));
            }
            a.swap(col, pivot_row);

            let pivot_vals = a[col];
            for row in a.iter_mut().skip(col + 1) {
                let factor = row[col] / pivot;
                if factor == 0.0 {
                    continue;
                }
                for k in col..9 {
                    row[k] -= factor * pivot_vals[k];
                }
            }
        }

        let mut h = [0.0f64; 9];
        for row in (0..8).rev() {
            let mut sum = a[row][8];
            for k in row + 1..8 {
                sum -= a[row][k] * h[k];
            }
            h[row] = sum / a[row][row];
        }
        h[8] = 1.0;

        if h.iter().any(|c| !c.is_finite()) {
            warn!(?h, "Homography solve produced non-finite coefficients");
            return Err(SheetwerkError::DegenerateGeometry(
                "homography coefficients are not finite".into(),
            ));
        }

        trace!(?h, "Homography solved");
        Ok(Self { coefficients: h })
    }

    /// Project `p`. Returns `None` when `p` maps to the line at infinity.
    pub fn map(&self, p: Point) -> Option<Point> {
        let h = &self.coefficients;
        let denom = h[6] * p.x + h[7] * p.y + h[8];
        if !denom.is_finite() || denom.abs() < PROJECTIVE_EPSILON {
            return None;
        }
        let mapped = Point::new(
            (h[0] * p.x + h[1] * p.y + h[2]) / denom,
            (h[3] * p.x + h[4] * p.y + h[5]) / denom,
        );
        mapped.is_finite().then_some(mapped)
    }
}

impl Default for Homography {
    fn default() -> Self {
        Self::identity()
    }
}

/// Reject point sets where any three points are (nearly) collinear or coincide.
fn ensure_non_degenerate(points: &[Point; 4], label: &str) -> Result<()> {
    let mut extent_sq = 0.0f64;
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            let d = *b - *a;
            extent_sq = extent_sq.max(d.x * d.x + d.y * d.y);
        }
    }
    if !extent_sq.is_finite() || extent_sq == 0.0 {
        return Err(SheetwerkError::DegenerateGeometry(format!(
            "{label} points coincide or are not finite"
        )));
    }

    for skip in 0..4 {
        let tri: Vec<Point> = (0..4).filter(|&i| i != skip).map(|i| points[i]).collect();
        let (u, v) = (tri[1] - tri[0], tri[2] - tri[0]);
        let twice_area = (u.x * v.y - u.y * v.x).abs();
        if twice_area <= COLLINEAR_EPSILON * extent_sq {
            return Err(SheetwerkError::DegenerateGeometry(format!(
                "three {label} points are collinear"
            )));
        }
    }
    Ok(())
}
