// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Geometry: homography solving, backward-mapping warp, and parallelogram
// prediction. None of these look at pixels except the warp.

pub mod homography;
pub mod predict;
pub mod warp;

pub use homography::Homography;
pub use predict::parallelogram_point;
pub use warp::warp;
