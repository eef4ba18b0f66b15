// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Sheetwerk.

use thiserror::Error;

/// Top-level error type for all Sheetwerk operations.
///
/// Snapping heuristics never produce one of these: "nothing found" is an
/// empty result, not an error.
#[derive(Debug, Error)]
pub enum SheetwerkError {
    // -- Image errors --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("pixel buffer has {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    // -- Geometry errors --
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("aspect ratio must be finite and positive, got {0}")]
    InvalidAspectRatio(f64),

    #[error("corner index {0} is out of range (expected 0..4)")]
    CornerIndex(usize),

    // -- Configuration errors --
    #[error("zoom range must satisfy 0 < min_zoom <= max_zoom, got {min}..{max}")]
    InvalidZoomRange { min: f64, max: f64 },

    // -- Interaction errors --
    #[error("another gesture is already in progress")]
    GestureInProgress,

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SheetwerkError>;
