// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Decoding photographed sheets into RGBA buffers and encoding rectified
// rasters back out. Thin wrappers over the `image` crate.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbaImage};
use sheetwerk_core::error::SheetwerkError;
use tracing::{debug, info, instrument};

/// Wrap an `image` crate failure with what we were doing at the time.
fn image_error(context: impl std::fmt::Display) -> impl FnOnce(image::ImageError) -> SheetwerkError {
    move |err| SheetwerkError::ImageError(format!("{context}: {err}"))
}

/// Load an image file and convert it to RGBA8.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn open_rgba(path: impl AsRef<Path>) -> Result<RgbaImage, SheetwerkError> {
    let path = path.as_ref();
    let img = image::open(path).map_err(image_error(format!("cannot open {}", path.display())))?;
    info!(width = img.width(), height = img.height(), "Sheet photo loaded");
    Ok(img.into_rgba8())
}

/// Decode an in-memory JPEG, PNG or other supported encoding to RGBA8.
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn decode_rgba(data: &[u8]) -> Result<RgbaImage, SheetwerkError> {
    let img = image::load_from_memory(data).map_err(image_error("cannot decode image bytes"))?;
    debug!(width = img.width(), height = img.height(), "Sheet photo decoded");
    Ok(img.into_rgba8())
}

/// Encode an RGBA raster as PNG bytes. PNG keeps the transparent fringe.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, SheetwerkError> {
    let mut cursor = Cursor::new(Vec::new());
    image
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(image_error("cannot encode PNG"))?;
    Ok(cursor.into_inner())
}

/// Write the raster to a file. The format follows the file extension.
pub fn save(image: &RgbaImage, path: impl AsRef<Path>) -> Result<(), SheetwerkError> {
    let path = path.as_ref();
    image
        .save(path)
        .map_err(image_error(format!("cannot write {}", path.display())))
}
