// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanning pipeline. The commit-time rectification of an accepted quad.

pub mod rectify;

pub use rectify::{RectifiedSheet, SheetRectifier};
