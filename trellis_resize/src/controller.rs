// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The resize state machine and clamp pipeline.

use alloc::boxed::Box;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};
use trellis_events::{ask_all, notify_all, Decision, DragListener, Geometry};
use trellis_pointer::{Button, PointerCaptureHandler, PointerInput};
use trellis_space::{ContainBox, ContainSpec, ContainmentInput, CoordinateSpace, ElementMetrics, GridSnap};

use crate::handle::Handle;

/// Pointer event for resizing; carries the aspect modifier key state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeEvent {
    /// Page-space pointer position.
    pub pointer: Point,
    /// Event timestamp in milliseconds.
    pub timestamp: u64,
    /// Pressed button, for press events.
    pub button: Option<Button>,
    /// Whether the aspect modifier key (shift, typically) is held.
    pub aspect_modifier: bool,
}

impl ResizeEvent {
    /// A press of the primary button.
    #[must_use]
    pub fn press(pointer: Point, timestamp: u64) -> Self {
        Self {
            pointer,
            timestamp,
            button: Some(trellis_pointer::PRIMARY_BUTTON),
            aspect_modifier: false,
        }
    }

    /// A motion (or release) sample.
    #[must_use]
    pub fn motion(pointer: Point, timestamp: u64) -> Self {
        Self {
            pointer,
            timestamp,
            button: None,
            aspect_modifier: false,
        }
    }

    /// Mark the aspect modifier key as held.
    #[must_use]
    pub fn with_aspect_modifier(mut self) -> Self {
        self.aspect_modifier = true;
        self
    }
}

impl PointerInput for ResizeEvent {
    fn position(&self) -> Point {
        self.pointer
    }

    fn timestamp(&self) -> u64 {
        self.timestamp
    }

    fn button(&self) -> Option<Button> {
        self.button
    }
}

/// Aspect-ratio behavior.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum AspectRatio {
    /// Dimensions move independently (unless the modifier key is held).
    #[default]
    Free,
    /// Lock to the width/height ratio measured at start.
    Locked,
    /// Lock to an explicit width/height ratio.
    Ratio(f64),
}

/// Configuration resolved once when a resize session starts.
#[derive(Clone, Copy, Debug)]
pub struct ResizeConfig {
    /// Refuse all presses while set.
    pub disabled: bool,
    /// Smallest allowed size.
    pub min_size: Size,
    /// Largest allowed size, unbounded when `None`.
    pub max_size: Option<Size>,
    /// Aspect-ratio behavior.
    pub aspect: AspectRatio,
    /// Optional grid snapping of the pointer delta.
    pub grid: Option<GridSnap>,
    /// Optional area the resized box must stay within.
    pub containment: Option<ContainSpec>,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            disabled: false,
            min_size: Size::new(10.0, 10.0),
            max_size: None,
            aspect: AspectRatio::Free,
            grid: None,
            containment: None,
        }
    }
}

/// Where the controller is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizePhase {
    /// No started session.
    Idle,
    /// Between a successful start and the stop notification.
    Resizing,
}

/// Orchestrates one resize lifecycle for a single element.
///
/// The host hit-tests which grip was pressed and supplies the [`Handle`];
/// the controller turns pointer deltas into clamped box patches and
/// reports through [`DragListener`]s, whose contexts carry both position
/// and size.
pub struct ResizeController<K> {
    element: K,
    handle: Handle,
    config: ResizeConfig,
    metrics: ElementMetrics,
    containment_input: Option<ContainmentInput>,
    listeners: Vec<Box<dyn DragListener<K>>>,

    press_point: Point,
    phase: ResizePhase,
    geometry: Option<Geometry>,
    bounds: Option<Rect>,
    ratio: f64,
}

impl<K: core::fmt::Debug> core::fmt::Debug for ResizeController<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResizeController")
            .field("element", &self.element)
            .field("handle", &self.handle)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

impl<K: Clone> ResizeController<K> {
    /// Create a controller for `element`, resizing via `handle`.
    #[must_use]
    pub fn new(element: K, metrics: ElementMetrics, handle: Handle, config: ResizeConfig) -> Self {
        Self {
            element,
            handle,
            config,
            metrics,
            containment_input: None,
            listeners: Vec::new(),
            press_point: Point::ZERO,
            phase: ResizePhase::Idle,
            geometry: None,
            bounds: None,
            ratio: 1.0,
        }
    }

    /// Supply the measurements containment resolution needs.
    #[must_use]
    pub fn with_containment_input(mut self, input: ContainmentInput) -> Self {
        self.containment_input = Some(input);
        self
    }

    /// Attach a lifecycle listener.
    pub fn add_listener(&mut self, listener: Box<dyn DragListener<K>>) {
        self.listeners.push(listener);
    }

    /// Select the grip for the next session.
    pub fn set_handle(&mut self, handle: Handle) {
        self.handle = handle;
    }

    /// Replace the metrics snapshot before the next session.
    pub fn set_metrics(&mut self, metrics: ElementMetrics) {
        self.metrics = metrics;
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> ResizePhase {
        self.phase
    }

    /// Geometry of the current (or most recent) session.
    #[must_use]
    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    fn aspect_ratio(&self, g: &Geometry) -> f64 {
        let ratio = match self.config.aspect {
            AspectRatio::Ratio(r) => r,
            _ => {
                if g.original_size.height > 0.0 {
                    g.original_size.width / g.original_size.height
                } else {
                    0.0
                }
            }
        };
        // Zero-extent boxes fall back to square so the lock stays finite.
        if ratio > 0.0 { ratio } else { 1.0 }
    }

    fn aspect_active(&self, ev: &ResizeEvent) -> bool {
        !matches!(self.config.aspect, AspectRatio::Free) || ev.aspect_modifier
    }

    // The clamp pipeline. Order matters; see the crate docs.
    fn apply(&self, g: &Geometry, ev: &ResizeEvent) -> (Point, Size) {
        let mut delta = ev.pointer - self.press_point;
        if let Some(grid) = self.config.grid {
            delta = grid.round_delta(delta);
        }
        let patch = self.handle.patch(delta);
        let orig = g.original_position;
        let osize = g.original_size;

        // 1. Size limits.
        let mut w = clamp_dim(osize.width + patch.dw, self.config.min_size.width, self.config.max_size.map(|s| s.width));
        let mut h = clamp_dim(osize.height + patch.dh, self.config.min_size.height, self.config.max_size.map(|s| s.height));
        let mut x = orig.x + patch.dx;
        let mut y = orig.y + patch.dy;

        // 2. Keep the opposite edge anchored for leading-edge handles.
        if self.handle.moves_left_edge() {
            x = orig.x + osize.width - w;
        }
        if self.handle.moves_top_edge() {
            y = orig.y + osize.height - h;
        }

        // 3. Aspect lock: the larger implied box wins, then re-anchor the
        // leading diagonals.
        if self.aspect_active(ev) {
            let ratio = self.ratio;
            let implied_h = w / ratio;
            if implied_h >= h {
                h = implied_h;
            } else {
                w = h * ratio;
            }
            if matches!(self.handle, Handle::Nw | Handle::Sw) {
                x = orig.x + osize.width - w;
            }
            if matches!(self.handle, Handle::Nw | Handle::Ne) {
                y = orig.y + osize.height - h;
            }
        }

        // Degenerate: both size deltas clamped away. Suppress position
        // deltas to avoid a 1px jump from a stale patch.
        if w == osize.width && h == osize.height {
            x = orig.x;
            y = orig.y;
        }

        // Containment area, applied last. The near edges push the box in,
        // shrinking it to keep the far edges put; the far edges cap the
        // size.
        if let Some(area) = self.bounds {
            if x < area.x0 {
                w -= area.x0 - x;
                x = area.x0;
            }
            if y < area.y0 {
                h -= area.y0 - y;
                y = area.y0;
            }
            w = w.min(area.x1 - x).max(0.0);
            h = h.min(area.y1 - y).max(0.0);
        }

        (Point::new(x, y), Size::new(w, h))
    }

    fn notify_move(&mut self) {
        let Some(g) = self.geometry else { return };
        let ctx = g.context(self.element.clone(), None);
        notify_all(&mut self.listeners, |l| l.on_move(&ctx));
    }

    fn finalize(&mut self) {
        if self.phase != ResizePhase::Resizing {
            return;
        }
        self.phase = ResizePhase::Idle;
        if let Some(g) = self.geometry {
            let ctx = g.context(self.element.clone(), None);
            notify_all(&mut self.listeners, |l| l.on_stop(&ctx));
        }
        self.bounds = None;
    }
}

fn clamp_dim(v: f64, min: f64, max: Option<f64>) -> f64 {
    let v = v.max(min);
    match max {
        Some(m) => v.min(m),
        None => v,
    }
}

impl<K: Clone> PointerCaptureHandler<ResizeEvent> for ResizeController<K> {
    fn accept_press(&mut self, ev: &ResizeEvent) -> bool {
        if self.config.disabled || self.phase != ResizePhase::Idle {
            return false;
        }
        self.press_point = ev.pointer;
        true
    }

    fn begin(&mut self, _ev: &ResizeEvent) -> Decision {
        let geometry = Geometry::at_rest(self.metrics.local_position, self.metrics.size);
        let bounds = match (&self.config.containment, &self.containment_input) {
            (Some(spec), Some(input)) => {
                ContainBox::resolve_area(spec, input).map(|area| {
                    // The area is in page space; positions are not.
                    let space = CoordinateSpace::at_press(&self.metrics, self.press_point);
                    let min = space.to_relative(Point::new(area.x0, area.y0));
                    let max = space.to_relative(Point::new(area.x1, area.y1));
                    Rect::new(min.x, min.y, max.x, max.y)
                })
            }
            _ => None,
        };

        let ctx = geometry.context(self.element.clone(), None);
        if ask_all(&mut self.listeners, |l| l.on_start(&ctx)).is_cancel() {
            return Decision::Cancel;
        }

        self.ratio = self.aspect_ratio(&geometry);
        self.geometry = Some(geometry);
        self.bounds = bounds;
        self.phase = ResizePhase::Resizing;
        Decision::Proceed
    }

    fn update(&mut self, ev: &ResizeEvent) {
        if self.phase != ResizePhase::Resizing {
            return;
        }
        let Some(g) = self.geometry else { return };
        let (pos, size) = self.apply(&g, ev);
        if let Some(g) = self.geometry.as_mut() {
            g.position = pos;
            g.size = size;
        }
        self.notify_move();
    }

    fn finish(&mut self, _ev: &ResizeEvent) {
        self.finalize();
    }

    fn abort(&mut self) {
        self.finalize();
    }
}
