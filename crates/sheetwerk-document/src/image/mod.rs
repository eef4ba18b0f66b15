// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module: borrowed pixel views plus decode/encode helpers.

pub mod buffer;
pub mod io;

pub use buffer::{Luminance, PixelBuffer, Window};
