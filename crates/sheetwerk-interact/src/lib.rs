// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// sheetwerk-interact — Corner editing for the Sheetwerk score-sheet digitizer.
//
// Turns pointer samples into corner positions: velocity-gated magnetic
// snapping, the parallelogram ghost, pinch zoom, the magnifier anchor, and
// scoped pointer-listener lifetimes.

pub mod controller;
pub mod gesture;
pub mod magnifier;
pub mod probe;
pub mod session;
pub mod subscription;
pub mod velocity;

pub use controller::{
    DragScope, InteractionController, MoveFeedback, SETTLED_SPEED, dynamic_radius, geometric_threshold,
};
pub use gesture::PinchGesture;
pub use magnifier::{MagnifierAnchor, anchor_for};
pub use probe::{FeatureProbe, PixelProbe};
pub use subscription::{DetachedHub, ListenerId, PointerEventHub, PointerSubscription};
