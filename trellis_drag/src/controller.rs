// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag state machine.

use alloc::boxed::Box;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use trellis_events::{ask_all, notify_all, Decision, DragListener, Geometry};
use trellis_pointer::{Button, PointerCaptureHandler, PointerInput};
use trellis_space::{ContainBox, ContainmentInput, CoordinateSpace, ElementMetrics, ScrollState};

use crate::config::{Axis, DragConfig, HelperMode};

/// Pointer event enriched with the scroll state a drag may need per move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragEvent {
    /// Page-space pointer position.
    pub pointer: Point,
    /// Event timestamp in milliseconds.
    pub timestamp: u64,
    /// Pressed button, for press events.
    pub button: Option<Button>,
    /// Fresh ancestor scroll offsets, when the host observed them change.
    pub scroll: Option<ScrollState>,
}

impl DragEvent {
    /// A press of the primary button.
    #[must_use]
    pub fn press(pointer: Point, timestamp: u64) -> Self {
        Self {
            pointer,
            timestamp,
            button: Some(trellis_pointer::PRIMARY_BUTTON),
            scroll: None,
        }
    }

    /// A motion (or release) sample.
    #[must_use]
    pub fn motion(pointer: Point, timestamp: u64) -> Self {
        Self {
            pointer,
            timestamp,
            button: None,
            scroll: None,
        }
    }

    /// Attach fresh scroll offsets to a motion sample.
    #[must_use]
    pub fn with_scroll(mut self, scroll: ScrollState) -> Self {
        self.scroll = Some(scroll);
        self
    }
}

impl PointerInput for DragEvent {
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

/// Where the controller is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    /// No session (the dispatcher may hold an armed, not-yet-started
    /// press).
    Idle,
    /// Between a successful start and the stop notification.
    Dragging,
}

/// How a started drag ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragOutcome {
    /// Finalized at the last generated position.
    Committed,
    /// Returned to the original position per the revert policy.
    Reverted,
    /// Canceled externally before release.
    Canceled,
}

/// Orchestrates one drag lifecycle for a single movable element.
///
/// Drive it with a [`trellis_pointer::PointerDispatcher`]; it implements
/// [`PointerCaptureHandler`] for [`DragEvent`]s. Between sessions, call
/// [`DragController::set_metrics`] with a fresh read-phase snapshot.
pub struct DragController<K> {
    element: K,
    config: DragConfig<K>,
    metrics: ElementMetrics,
    containment_input: Option<ContainmentInput>,
    listeners: Vec<Box<dyn DragListener<K>>>,

    press_point: Point,
    phase: DragPhase,
    space: Option<CoordinateSpace>,
    containment: Option<ContainBox>,
    geometry: Option<Geometry>,
    helper: Option<K>,
    drop_accepted: Option<bool>,
    detached: bool,
    outcome: Option<DragOutcome>,
}

impl<K: core::fmt::Debug> core::fmt::Debug for DragController<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DragController")
            .field("element", &self.element)
            .field("phase", &self.phase)
            .field("outcome", &self.outcome)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<K: Clone> DragController<K> {
    /// Create a controller for `element` with a fresh metrics snapshot.
    #[must_use]
    pub fn new(element: K, metrics: ElementMetrics, config: DragConfig<K>) -> Self {
        Self {
            element,
            config,
            metrics,
            containment_input: None,
            listeners: Vec::new(),
            press_point: Point::ZERO,
            phase: DragPhase::Idle,
            space: None,
            containment: None,
            geometry: None,
            helper: None,
            drop_accepted: None,
            detached: false,
            outcome: None,
        }
    }

    /// Supply the measurements containment resolution needs. Required
    /// when the config names a containment.
    #[must_use]
    pub fn with_containment_input(mut self, input: ContainmentInput) -> Self {
        self.containment_input = Some(input);
        self
    }

    /// Attach a lifecycle listener.
    pub fn add_listener(&mut self, listener: Box<dyn DragListener<K>>) {
        self.listeners.push(listener);
    }

    /// Replace the metrics snapshot before the next session.
    pub fn set_metrics(&mut self, metrics: ElementMetrics) {
        self.metrics = metrics;
    }

    /// The element this controller moves.
    #[must_use]
    pub fn element(&self) -> &K {
        &self.element
    }

    /// The generated helper node, while a session with a clone helper is
    /// live.
    #[must_use]
    pub fn helper(&self) -> Option<&K> {
        self.helper.as_ref()
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Geometry of the current (or most recent) session.
    #[must_use]
    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    /// How the most recent session ended.
    #[must_use]
    pub fn outcome(&self) -> Option<DragOutcome> {
        self.outcome
    }

    /// The active coordinate space, for collaborators that need the click
    /// offset or page conversions (e.g. slot matching).
    #[must_use]
    pub fn space(&self) -> Option<&CoordinateSpace> {
        self.space.as_ref()
    }

    /// Page-space rectangle of the moving box, while dragging.
    #[must_use]
    pub fn page_rect(&self) -> Option<Rect> {
        let space = self.space.as_ref()?;
        let g = self.geometry.as_ref()?;
        Some(Rect::from_origin_size(space.to_absolute(g.position), g.size))
    }

    /// Record whether a drop target accepted the item. Consulted by the
    /// `OnInvalidDrop` / `OnValidDrop` revert policies at release.
    pub fn set_drop_accepted(&mut self, accepted: bool) {
        self.drop_accepted = Some(accepted);
    }

    /// The element left the tree mid-drag; finalization will skip
    /// geometry writes but still notify `stop`.
    pub fn mark_detached(&mut self) {
        self.detached = true;
    }

    fn notify_move(&mut self) {
        let Some(g) = self.geometry else { return };
        let ctx = g.context(self.element.clone(), self.helper.clone());
        notify_all(&mut self.listeners, |l| l.on_move(&ctx));
    }

    fn finalize(&mut self, outcome: DragOutcome) {
        if self.phase != DragPhase::Dragging {
            return;
        }
        self.phase = DragPhase::Idle;
        self.outcome = Some(outcome);
        // Helper is still present in the stop context; it is removed (and
        // any start-time style overrides restored) by the host right
        // after.
        if let Some(g) = self.geometry {
            let ctx = g.context(self.element.clone(), self.helper.clone());
            notify_all(&mut self.listeners, |l| l.on_stop(&ctx));
        }
        self.helper = None;
        self.space = None;
        self.containment = None;
        self.drop_accepted = None;
        self.detached = false;
    }

    fn should_revert(&self) -> bool {
        use crate::config::Revert::*;
        match self.config.revert {
            Never => false,
            Always => true,
            OnInvalidDrop => !self.drop_accepted.unwrap_or(false),
            OnValidDrop => self.drop_accepted.unwrap_or(false),
        }
    }
}

impl<K: Clone> PointerCaptureHandler<DragEvent> for DragController<K> {
    fn accept_press(&mut self, ev: &DragEvent) -> bool {
        if self.config.disabled || self.phase != DragPhase::Idle {
            return false;
        }
        self.press_point = ev.pointer;
        true
    }

    fn begin(&mut self, _ev: &DragEvent) -> Decision {
        let space = CoordinateSpace::at_press(&self.metrics, self.press_point);
        let geometry = Geometry::at_rest(self.metrics.local_position, self.metrics.size);
        let containment = match (&self.config.containment, &self.containment_input) {
            (Some(spec), Some(input)) => ContainBox::resolve(spec, input)
                // The resolved box is in page space; positions are not.
                .map(|b| ContainBox::new(space.to_relative(b.min), space.to_relative(b.max))),
            _ => None,
        };
        let helper = match &self.config.helper {
            HelperMode::Original => None,
            HelperMode::Clone(k) => Some(k.clone()),
        };

        let ctx = geometry.context(self.element.clone(), helper.clone());
        if ask_all(&mut self.listeners, |l| l.on_start(&ctx)).is_cancel() {
            return Decision::Cancel;
        }

        self.space = Some(space);
        self.geometry = Some(geometry);
        self.containment = containment;
        self.helper = helper;
        self.outcome = None;
        self.phase = DragPhase::Dragging;
        Decision::Proceed
    }

    fn update(&mut self, ev: &DragEvent) {
        if self.phase != DragPhase::Dragging {
            return;
        }
        if let (Some(scroll), Some(space)) = (ev.scroll, self.space.as_mut()) {
            if space.tracks_scroll() {
                space.refresh_scroll(scroll);
            }
        }
        let (Some(space), Some(g)) = (self.space.as_ref(), self.geometry.as_mut()) else {
            return;
        };
        let mut pos =
            space.generate_position(ev.pointer, self.containment.as_ref(), self.config.grid);
        match self.config.axis {
            Axis::Both => {}
            Axis::X => pos.y = g.original_position.y,
            Axis::Y => pos.x = g.original_position.x,
        }
        g.position = pos;
        self.notify_move();
    }

    fn finish(&mut self, _ev: &DragEvent) {
        if self.phase != DragPhase::Dragging {
            return;
        }
        let revert = self.should_revert();
        if revert && !self.detached {
            if let Some(g) = self.geometry.as_mut() {
                g.position = g.original_position;
            }
        }
        self.finalize(if revert {
            DragOutcome::Reverted
        } else {
            DragOutcome::Committed
        });
    }

    fn abort(&mut self) {
        self.finalize(DragOutcome::Canceled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::{format, vec};
    use core::cell::RefCell;
    use kurbo::{Insets, Rect, Size, Vec2};
    use trellis_events::InteractionContext;
    use trellis_pointer::{PointerDispatcher, SessionConfig, SessionTracker};
    use trellis_space::{ContainSpec, Positioning};

    use crate::config::Revert;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Recording {
        log: Log,
        cancel_start: bool,
    }

    impl DragListener<u32> for Recording {
        fn on_start(&mut self, ctx: &InteractionContext<u32>) -> Decision {
            self.log.borrow_mut().push(format!(
                "start {:?} helper={:?}",
                ctx.position, ctx.helper
            ));
            if self.cancel_start {
                Decision::Cancel
            } else {
                Decision::Proceed
            }
        }

        fn on_move(&mut self, ctx: &InteractionContext<u32>) {
            self.log.borrow_mut().push(format!("move {:?}", ctx.position));
        }

        fn on_stop(&mut self, ctx: &InteractionContext<u32>) {
            self.log.borrow_mut().push(format!("stop {:?}", ctx.position));
        }
    }

    fn metrics() -> ElementMetrics {
        ElementMetrics {
            page_origin: Point::new(100.0, 100.0),
            local_position: Point::new(100.0, 100.0),
            parent_origin: Point::ZERO,
            parent_border: Vec2::ZERO,
            positioning: Positioning::Absolute,
            scroll: ScrollState::root(Vec2::ZERO),
            size: Size::new(20.0, 20.0),
        }
    }

    fn containment_input() -> ContainmentInput {
        ContainmentInput {
            element_size: Size::new(20.0, 20.0),
            element_margin: Insets::ZERO,
            document_size: Size::new(1_000.0, 1_000.0),
            window_rect: Rect::new(0.0, 0.0, 1_000.0, 1_000.0),
            parent: None,
        }
    }

    fn controller(config: DragConfig<u32>) -> (DragController<u32>, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut c = DragController::new(1_u32, metrics(), config)
            .with_containment_input(containment_input());
        c.add_listener(Box::new(Recording {
            log: log.clone(),
            cancel_start: false,
        }));
        (c, log)
    }

    fn rig() -> (SessionTracker, PointerDispatcher) {
        (
            SessionTracker::new(),
            PointerDispatcher::new(SessionConfig::default()),
        )
    }

    fn drag_to(
        tracker: &mut SessionTracker,
        dispatcher: &mut PointerDispatcher,
        c: &mut DragController<u32>,
        waypoints: &[Point],
    ) {
        dispatcher.press(tracker, c, &DragEvent::press(Point::new(105.0, 105.0), 0));
        for (i, p) in waypoints.iter().enumerate() {
            dispatcher.motion(tracker, c, &DragEvent::motion(*p, 1 + i as u64));
        }
        let last = waypoints.last().copied().unwrap_or(Point::new(105.0, 105.0));
        dispatcher.release(tracker, c, &DragEvent::motion(last, 100));
    }

    #[test]
    fn commit_at_generated_position() {
        let (mut c, log) = controller(DragConfig::default());
        let (mut t, mut d) = rig();
        drag_to(&mut t, &mut d, &mut c, &[Point::new(125.0, 135.0)]);
        // 20px right, 30px down from the press.
        assert_eq!(c.outcome(), Some(DragOutcome::Committed));
        assert_eq!(c.geometry().unwrap().position, Point::new(120.0, 130.0));
        assert_eq!(
            log.borrow().as_slice(),
            [
                "start (100.0, 100.0) helper=None",
                "move (120.0, 130.0)",
                "stop (120.0, 130.0)",
            ]
        );
    }

    #[test]
    fn containment_clamps_every_move() {
        // The element may roam a 200x200 page area; with a 20px element
        // the position tops out at (180, 180).
        let (mut c, _log) = controller(
            DragConfig::default()
                .with_containment(ContainSpec::Rect(Rect::new(0.0, 0.0, 200.0, 200.0))),
        );
        let (mut t, mut d) = rig();
        d.press(&mut t, &mut c, &DragEvent::press(Point::new(105.0, 105.0), 0));
        for (i, p) in [
            Point::new(150.0, 150.0),
            Point::new(300.0, 300.0),
            Point::new(505.0, 505.0),
        ]
        .iter()
        .enumerate()
        {
            d.motion(&mut t, &mut c, &DragEvent::motion(*p, 1 + i as u64));
            let pos = c.geometry().unwrap().position;
            assert!(
                pos.x <= 180.0 && pos.y <= 180.0 && pos.x >= 0.0 && pos.y >= 0.0,
                "position {pos:?} escaped containment"
            );
        }
        d.release(&mut t, &mut c, &DragEvent::motion(Point::new(505.0, 505.0), 9));
        assert_eq!(c.geometry().unwrap().position, Point::new(180.0, 180.0));
    }

    #[test]
    fn revert_always_round_trips() {
        let (mut c, log) = controller(DragConfig::default().with_revert(Revert::Always));
        let (mut t, mut d) = rig();
        drag_to(
            &mut t,
            &mut d,
            &mut c,
            &[Point::new(200.0, 50.0), Point::new(400.0, 300.0)],
        );
        assert_eq!(c.outcome(), Some(DragOutcome::Reverted));
        assert_eq!(c.geometry().unwrap().position, Point::new(100.0, 100.0));
        assert!(log.borrow().last().unwrap().starts_with("stop (100.0, 100.0)"));
    }

    #[test]
    fn revert_on_invalid_drop_consults_acceptance() {
        // No target accepted: revert.
        let (mut c, _log) =
            controller(DragConfig::default().with_revert(Revert::OnInvalidDrop));
        let (mut t, mut d) = rig();
        drag_to(&mut t, &mut d, &mut c, &[Point::new(200.0, 200.0)]);
        assert_eq!(c.outcome(), Some(DragOutcome::Reverted));

        // A target accepted: commit.
        let (mut c, _log) =
            controller(DragConfig::default().with_revert(Revert::OnInvalidDrop));
        let (mut t, mut d) = rig();
        d.press(&mut t, &mut c, &DragEvent::press(Point::new(105.0, 105.0), 0));
        d.motion(&mut t, &mut c, &DragEvent::motion(Point::new(200.0, 200.0), 1));
        c.set_drop_accepted(true);
        d.release(&mut t, &mut c, &DragEvent::motion(Point::new(200.0, 200.0), 2));
        assert_eq!(c.outcome(), Some(DragOutcome::Committed));
    }

    #[test]
    fn axis_lock_pins_the_other_coordinate() {
        let (mut c, _log) = controller(DragConfig::default().with_axis(Axis::X));
        let (mut t, mut d) = rig();
        drag_to(&mut t, &mut d, &mut c, &[Point::new(165.0, 205.0)]);
        assert_eq!(c.geometry().unwrap().position, Point::new(160.0, 100.0));
    }

    #[test]
    fn canceled_start_fires_no_stop() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut c = DragController::new(1_u32, metrics(), DragConfig::default());
        c.add_listener(Box::new(Recording {
            log: log.clone(),
            cancel_start: true,
        }));
        let (mut t, mut d) = rig();
        drag_to(&mut t, &mut d, &mut c, &[Point::new(160.0, 160.0)]);
        assert_eq!(c.phase(), DragPhase::Idle);
        assert!(c.outcome().is_none());
        assert_eq!(log.borrow().len(), 1, "only the canceled start is logged");
        assert!(!t.is_active());
    }

    #[test]
    fn cancel_mid_drag_stops_exactly_once() {
        let (mut c, log) = controller(DragConfig::default());
        let (mut t, mut d) = rig();
        d.press(&mut t, &mut c, &DragEvent::press(Point::new(105.0, 105.0), 0));
        d.motion(&mut t, &mut c, &DragEvent::motion(Point::new(160.0, 160.0), 1));
        d.cancel::<DragEvent, _>(&mut t, &mut c);
        d.cancel::<DragEvent, _>(&mut t, &mut c);
        assert_eq!(c.outcome(), Some(DragOutcome::Canceled));
        let stops = log
            .borrow()
            .iter()
            .filter(|l| l.starts_with("stop"))
            .count();
        assert_eq!(stops, 1);
        // A late release after cancellation stays silent.
        d.release(&mut t, &mut c, &DragEvent::motion(Point::new(160.0, 160.0), 2));
        assert_eq!(
            log.borrow()
                .iter()
                .filter(|l| l.starts_with("stop"))
                .count(),
            1
        );
    }

    #[test]
    fn detached_element_still_gets_stop_without_revert_write() {
        let (mut c, log) = controller(DragConfig::default().with_revert(Revert::Always));
        let (mut t, mut d) = rig();
        d.press(&mut t, &mut c, &DragEvent::press(Point::new(105.0, 105.0), 0));
        d.motion(&mut t, &mut c, &DragEvent::motion(Point::new(160.0, 160.0), 1));
        c.mark_detached();
        d.release(&mut t, &mut c, &DragEvent::motion(Point::new(160.0, 160.0), 2));
        // Stop fired, but the revert write was skipped.
        assert_eq!(
            log.borrow()
                .iter()
                .filter(|l| l.starts_with("stop"))
                .count(),
            1
        );
        assert_eq!(c.geometry().unwrap().position, Point::new(155.0, 155.0));
    }

    #[test]
    fn clone_helper_travels_through_contexts() {
        let (mut c, log) = controller(DragConfig::default().with_clone_helper(77));
        let (mut t, mut d) = rig();
        drag_to(&mut t, &mut d, &mut c, &[Point::new(125.0, 125.0)]);
        assert!(log.borrow()[0].ends_with("helper=Some(77)"));
        // The helper reference is dropped once the session finalized.
        assert_eq!(c.helper, None);
    }

    #[test]
    fn disabled_controller_ignores_presses() {
        let (mut c, log) = controller(DragConfig {
            disabled: true,
            ..DragConfig::default()
        });
        let (mut t, mut d) = rig();
        drag_to(&mut t, &mut d, &mut c, &[Point::new(160.0, 160.0)]);
        assert!(log.borrow().is_empty());
        assert!(!t.is_active());
    }

    #[test]
    fn grid_and_containment_compose() {
        let (mut c, _log) = controller(
            DragConfig::default()
                .with_grid(Vec2::new(50.0, 50.0))
                .with_containment(ContainSpec::Rect(Rect::new(0.0, 0.0, 240.0, 240.0))),
        );
        let (mut t, mut d) = rig();
        // Raw travel (130, 130) first clamps to the box edge (220, 220);
        // the clamped travel of 120 then snaps down to 100 per axis.
        drag_to(&mut t, &mut d, &mut c, &[Point::new(235.0, 235.0)]);
        assert_eq!(c.geometry().unwrap().position, Point::new(200.0, 200.0));
    }

    #[test]
    fn scroll_refresh_applies_to_tracking_schemes_only() {
        let mut m = metrics();
        m.positioning = Positioning::Relative;
        m.local_position = Point::new(0.0, 0.0);
        m.scroll = ScrollState::ancestor(Vec2::ZERO);
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut c = DragController::new(1_u32, m, DragConfig::default());
        c.add_listener(Box::new(Recording {
            log,
            cancel_start: false,
        }));
        let (mut t, mut d) = rig();
        d.press(&mut t, &mut c, &DragEvent::press(Point::new(105.0, 105.0), 0));
        d.motion(&mut t, &mut c, &DragEvent::motion(Point::new(105.0, 115.0), 1));
        let before = c.geometry().unwrap().position;
        // The ancestor scrolls 40px; the same pointer spot now maps 40px
        // further down the content.
        d.motion(
            &mut t,
            &mut c,
            &DragEvent::motion(Point::new(105.0, 115.0), 2)
                .with_scroll(ScrollState::ancestor(Vec2::new(0.0, 40.0))),
        );
        let after = c.geometry().unwrap().position;
        assert_eq!(after - before, Vec2::new(0.0, 40.0));
        d.release(&mut t, &mut c, &DragEvent::motion(Point::new(105.0, 115.0), 3));
    }

    #[test]
    fn page_rect_tracks_the_helper_box() {
        let (mut c, _log) = controller(DragConfig::default());
        let (mut t, mut d) = rig();
        d.press(&mut t, &mut c, &DragEvent::press(Point::new(105.0, 105.0), 0));
        d.motion(&mut t, &mut c, &DragEvent::motion(Point::new(125.0, 105.0), 1));
        assert_eq!(
            c.page_rect(),
            Some(Rect::new(120.0, 100.0, 140.0, 120.0))
        );
        d.release(&mut t, &mut c, &DragEvent::motion(Point::new(125.0, 105.0), 2));
        assert!(c.page_rect().is_none());
    }

    #[test]
    fn controller_is_reusable_across_sessions() {
        let (mut c, log) = controller(DragConfig::default());
        let (mut t, mut d) = rig();
        drag_to(&mut t, &mut d, &mut c, &[Point::new(125.0, 105.0)]);
        // Second session starts from a fresh snapshot.
        let mut m = metrics();
        m.page_origin = Point::new(120.0, 100.0);
        m.local_position = Point::new(120.0, 100.0);
        c.set_metrics(m);
        d.press(&mut t, &mut c, &DragEvent::press(Point::new(125.0, 105.0), 50));
        d.motion(&mut t, &mut c, &DragEvent::motion(Point::new(145.0, 105.0), 51));
        d.release(&mut t, &mut c, &DragEvent::motion(Point::new(145.0, 105.0), 52));
        assert_eq!(c.geometry().unwrap().position, Point::new(140.0, 100.0));
        let starts = log
            .borrow()
            .iter()
            .filter(|l| l.starts_with("start"))
            .count();
        assert_eq!(starts, 2);
    }
}
