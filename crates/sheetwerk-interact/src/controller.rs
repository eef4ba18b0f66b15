// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Corner drag controller.
//
// Owns the working quadrilateral and decides, on every pointer move, where
// the held corner lands. Snap priority per move:
//
//   1. parallelogram ghost, if the pointer is within the geometric threshold
//   2. strongest nearby corner
//   3. line centroid, only once the pointer has slowed below 0.8 px/ms
//   4. the raw pointer
//
// Radii are in image pixels and shrink as the user zooms in so the screen
// footprint of the search stays roughly constant.

use serde::Serialize;
use sheetwerk_core::{AppConfig, Corner, Point, Quad, Result, SheetwerkError, SnapKind, SnapState, ViewTransform};
use sheetwerk_document::parallelogram_point;
use tracing::{debug, trace, warn};

use crate::gesture::{PinchGesture, clamp_zoom};
use crate::magnifier::{MagnifierAnchor, anchor_for};
use crate::probe::FeatureProbe;
use crate::session::DragSession;
use crate::subscription::{PointerEventHub, PointerSubscription};

/// Below this speed (image px/ms) the pointer counts as settled and line
/// snapping is allowed.
pub const SETTLED_SPEED: f64 = 0.8;

const SNAP_RADIUS_BASE: f64 = 25.0;
const SNAP_RADIUS_MIN: f64 = 5.0;
const SNAP_RADIUS_MAX: f64 = 30.0;

const GEO_THRESHOLD_BASE: f64 = 40.0;
const GEO_THRESHOLD_MIN: f64 = 10.0;
const GEO_THRESHOLD_MAX: f64 = 50.0;

/// Search radius for corner and line snapping at a given zoom.
pub fn dynamic_radius(scale: f64) -> f64 {
    (SNAP_RADIUS_BASE / scale).clamp(SNAP_RADIUS_MIN, SNAP_RADIUS_MAX)
}

/// Distance within which the parallelogram ghost captures the corner.
pub fn geometric_threshold(scale: f64) -> f64 {
    (GEO_THRESHOLD_BASE / scale).clamp(GEO_THRESHOLD_MIN, GEO_THRESHOLD_MAX)
}

/// Everything a renderer needs after one pointer move.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveFeedback {
    pub corner: Corner,
    /// Where the corner was committed, in image pixels.
    pub point: Point,
    pub snap: SnapState,
    /// Pointer speed that gated line snapping, in image px/ms.
    pub speed: f64,
    pub magnifier: MagnifierAnchor,
}

#[derive(Debug, Clone, PartialEq)]
enum Mode {
    Idle,
    Dragging(DragSession),
    Pinching(PinchGesture),
}

/// Interactive corner editor for one source image.
#[derive(Debug)]
pub struct InteractionController<P> {
    probe: P,
    quad: Quad,
    view: ViewTransform,
    config: AppConfig,
    mode: Mode,
    snap: SnapState,
    magnifier: Option<MagnifierAnchor>,
}

impl<P: FeatureProbe> InteractionController<P> {
    /// An invalid zoom range in `config` is replaced by the default range.
    pub fn new(probe: P, quad: Quad, mut config: AppConfig) -> Self {
        if let Err(err) = config.validate() {
            warn!(error = %err, "Using the default zoom range");
            let defaults = AppConfig::default();
            config.min_zoom = defaults.min_zoom;
            config.max_zoom = defaults.max_zoom;
        }
        Self {
            probe,
            quad,
            view: ViewTransform::default(),
            config,
            mode: Mode::Idle,
            snap: SnapState::default(),
            magnifier: None,
        }
    }

    /// Start with the corners on the image bounds.
    pub fn with_image_bounds(probe: P, config: AppConfig) -> Self {
        let (w, h) = probe.image_size();
        Self::new(probe, Quad::from_image_bounds(w, h), config)
    }

    pub fn quad(&self) -> &Quad {
        &self.quad
    }

    pub fn snap_state(&self) -> &SnapState {
        &self.snap
    }

    pub fn magnifier(&self) -> Option<MagnifierAnchor> {
        self.magnifier
    }

    pub fn view(&self) -> ViewTransform {
        self.view
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Replace the pan/zoom. The scale is clamped to the configured zoom range.
    pub fn set_view(&mut self, view: ViewTransform) {
        self.view = ViewTransform {
            scale: clamp_zoom(view.scale, self.config.min_zoom, self.config.max_zoom),
            ..view
        };
    }

    pub fn snapping_enabled(&self) -> bool {
        self.config.snapping_enabled
    }

    pub fn set_snapping(&mut self, enabled: bool) {
        self.config.snapping_enabled = enabled;
    }

    /// The corner currently held, if any.
    pub fn active_corner(&self) -> Option<Corner> {
        match &self.mode {
            Mode::Dragging(session) => Some(session.corner()),
            _ => None,
        }
    }

    pub fn is_pinching(&self) -> bool {
        matches!(self.mode, Mode::Pinching(_))
    }

    /// Nearest corner handle within the configured hit radius of a screen point.
    pub fn hit_test(&self, screen: Point) -> Option<Corner> {
        Corner::ALL
            .into_iter()
            .map(|c| (c, self.view.image_to_screen(self.quad.corner(c)).distance_to(screen)))
            .filter(|&(_, d)| d <= self.config.handle_hit_radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(c, _)| c)
    }

    /// Grab `corner` and attach pointer listeners on `hub`.
    ///
    /// The returned scope is the only way to move the corner. Dropping it
    /// (pointer-up, cancel, early return, panic) ends the drag and detaches
    /// the listeners.
    pub fn begin_drag<'s, H: PointerEventHub + ?Sized>(
        &'s mut self,
        hub: &'s H,
        corner: Corner,
        screen: Point,
        time_ms: f64,
    ) -> Result<DragScope<'s, P, H>> {
        if self.is_pinching() {
            return Err(SheetwerkError::GestureInProgress);
        }
        let start = self.to_image(screen);
        self.mode = Mode::Dragging(DragSession::start(corner, start, time_ms));
        self.snap.clear();
        self.magnifier = None;
        debug!(?corner, x = start.x, y = start.y, "Drag started");

        let subscription = PointerSubscription::acquire(hub);
        Ok(DragScope {
            controller: self,
            _subscription: subscription,
        })
    }

    /// Second finger down. Any drag in progress is abandoned.
    pub fn begin_pinch(&mut self, a: Point, b: Point) {
        if let Some(corner) = self.active_corner() {
            debug!(?corner, "Pinch cancels drag");
        }
        self.clear_feedback();
        self.mode = Mode::Pinching(PinchGesture::begin(a, b, self.view));
    }

    /// Apply the current finger positions. `None` when no pinch is live.
    pub fn update_pinch(&mut self, a: Point, b: Point) -> Option<ViewTransform> {
        let Mode::Pinching(pinch) = &self.mode else {
            return None;
        };
        self.view = pinch.update(a, b, self.config.min_zoom, self.config.max_zoom);
        trace!(scale = self.view.scale, "Pinch update");
        Some(self.view)
    }

    pub fn end_pinch(&mut self) {
        if self.is_pinching() {
            self.mode = Mode::Idle;
        }
    }

    fn to_image(&self, screen: Point) -> Point {
        let (w, h) = self.probe.image_size();
        self.view.screen_to_image(screen).clamp_to(w as f64, h as f64)
    }

    fn handle_move(&mut self, screen: Point, time_ms: f64) -> Option<MoveFeedback> {
        let raw = self.to_image(screen);
        let Mode::Dragging(session) = &mut self.mode else {
            return None;
        };
        let corner = session.corner();
        let speed = session.sample(raw, time_ms);

        let (point, kind, ghost) = if self.config.snapping_enabled {
            let radius = dynamic_radius(self.view.scale).round() as u32;
            let ghost = parallelogram_point(&self.quad, corner);
            let (point, kind) = if raw.distance_to(ghost) < geometric_threshold(self.view.scale) {
                (ghost, SnapKind::Corner)
            } else if let Some(hit) = self.probe.strongest_corner(raw, radius) {
                (hit.point, SnapKind::Corner)
            } else if let Some(line) = (speed < SETTLED_SPEED)
                .then(|| self.probe.snap_to_edge(raw, radius))
                .flatten()
            {
                (line, SnapKind::Line)
            } else {
                (raw, SnapKind::None)
            };
            (point, kind, Some(ghost))
        } else {
            (raw, SnapKind::None, None)
        };

        let guide_angles = self.probe.edge_angles(point, self.config.guide_radius);
        self.quad.set_corner(corner, point);
        self.snap = SnapState {
            kind,
            guide_angles,
            geometric_ghost: ghost,
        };
        let magnifier = anchor_for(screen, self.config.magnifier_offset, self.config.magnifier_size);
        self.magnifier = Some(magnifier);

        trace!(?corner, ?kind, x = point.x, y = point.y, speed, "Corner moved");
        Some(MoveFeedback {
            corner,
            point,
            snap: self.snap.clone(),
            speed,
            magnifier,
        })
    }

    fn end_drag(&mut self) {
        if let Mode::Dragging(session) = &self.mode {
            debug!(corner = ?session.corner(), "Drag ended");
            self.mode = Mode::Idle;
        }
        self.clear_feedback();
    }

    fn clear_feedback(&mut self) {
        self.snap.clear();
        self.magnifier = None;
    }
}

/// A live corner drag. Ends when dropped.
#[derive(Debug)]
pub struct DragScope<'s, P: FeatureProbe, H: PointerEventHub + ?Sized> {
    controller: &'s mut InteractionController<P>,
    _subscription: PointerSubscription<'s, H>,
}

impl<P: FeatureProbe, H: PointerEventHub + ?Sized> DragScope<'_, P, H> {
    /// Feed a pointer position (screen px) and timestamp (ms).
    ///
    /// `None` once the drag has been taken over by a pinch.
    pub fn pointer_move(&mut self, screen: Point, time_ms: f64) -> Option<MoveFeedback> {
        self.controller.handle_move(screen, time_ms)
    }

    pub fn controller(&self) -> &InteractionController<P> {
        self.controller
    }

    pub fn set_view(&mut self, view: ViewTransform) {
        self.controller.set_view(view);
    }

    pub fn set_snapping(&mut self, enabled: bool) {
        self.controller.set_snapping(enabled);
    }

    /// Second finger landed mid-drag. The held corner is released where it is.
    pub fn begin_pinch(&mut self, a: Point, b: Point) {
        self.controller.begin_pinch(a, b);
    }

    /// Pointer-up. Returns the quad with the final corner position.
    pub fn finish(self) -> Quad {
        *self.controller.quad()
    }

    /// Pointer-cancel. The corner keeps its last committed position.
    pub fn cancel(self) {}
}

impl<P: FeatureProbe, H: PointerEventHub + ?Sized> Drop for DragScope<'_, P, H> {
    fn drop(&mut self) {
        self.controller.end_drag();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_and_threshold_follow_zoom_within_clamps() {
        assert_eq!(dynamic_radius(1.0), 25.0);
        assert_eq!(dynamic_radius(0.5), 30.0);
        assert_eq!(dynamic_radius(2.0), 12.5);
        assert_eq!(dynamic_radius(10.0), 5.0);

        assert_eq!(geometric_threshold(1.0), 40.0);
        assert_eq!(geometric_threshold(0.25), 50.0);
        assert_eq!(geometric_threshold(2.0), 20.0);
        assert_eq!(geometric_threshold(8.0), 10.0);
    }
}
