// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Top-level pointer event dispatcher.
//!
//! The dispatcher owns the [`PointerSession`] for one controller and walks
//! it through the capture → start → drag → stop lifecycle. Controllers
//! plug in via [`PointerCaptureHandler`] — a capability interface rather
//! than a base class, so drag, resize, and sort controllers share the
//! session machinery by composition.
//!
//! ## Lifecycle rules
//!
//! - `press` first synthesizes a release for any stale session (a missed
//!   release outside the window), then runs the handler's capture check.
//!   A refused capture changes nothing.
//! - `motion` before the start gate opens is inert. On the arming edge the
//!   handler's cancelable [`begin`](PointerCaptureHandler::begin) hook
//!   runs; [`Decision::Cancel`] unwinds to idle and the rest of the
//!   gesture — including its release — is ignored.
//! - `release` fires [`finish`](PointerCaptureHandler::finish) exactly
//!   once per started session, then frees the active-session slot.
//! - `cancel` is idempotent: it synchronously clears the session, fires
//!   [`abort`](PointerCaptureHandler::abort) once for a started session,
//!   and never double-fires.

use kurbo::Point;
use trellis_events::Decision;

use crate::session::{Button, PointerSession, SessionConfig, SessionId, SessionTracker};

/// Minimal view of a raw pointer event.
///
/// Controllers define richer event types (carrying scroll state, modifier
/// keys, …) and implement this trait so the dispatcher can read the
/// fields it needs.
pub trait PointerInput {
    /// Page-space pointer position.
    fn position(&self) -> Point;
    /// Event timestamp in milliseconds.
    fn timestamp(&self) -> u64;
    /// Pressed button, for press events. Motion/release events report
    /// `None`.
    fn button(&self) -> Option<Button> {
        None
    }
}

/// A plain pointer event, sufficient for hosts without richer needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Page-space pointer position.
    pub position: Point,
    /// Event timestamp in milliseconds.
    pub timestamp: u64,
    /// Pressed button, for press events.
    pub button: Option<Button>,
}

impl PointerEvent {
    /// A press of the primary button at `position`.
    #[must_use]
    pub fn press(position: Point, timestamp: u64) -> Self {
        Self {
            position,
            timestamp,
            button: Some(crate::session::PRIMARY_BUTTON),
        }
    }

    /// A motion (or release) sample at `position`.
    #[must_use]
    pub fn motion(position: Point, timestamp: u64) -> Self {
        Self {
            position,
            timestamp,
            button: None,
        }
    }
}

impl PointerInput for PointerEvent {
    fn position(&self) -> Point {
        self.position
    }

    fn timestamp(&self) -> u64 {
        self.timestamp
    }

    fn button(&self) -> Option<Button> {
        self.button
    }
}

/// Capability interface implemented by interaction controllers.
///
/// The dispatcher calls these hooks in a fixed order per session:
/// `accept_press` (capture check), `begin` (cancelable, once), `update`
/// (every accepted move, including the arming move), and exactly one of
/// `finish` (release) or `abort` (external cancellation).
pub trait PointerCaptureHandler<E: PointerInput> {
    /// Capture check: should this press be handled? A refusal leaves the
    /// dispatcher idle with no state change.
    fn accept_press(&mut self, ev: &E) -> bool {
        let _ = ev;
        true
    }

    /// The start gate opened. Cancelable; [`Decision::Cancel`] unwinds to
    /// idle and ignores the rest of the gesture.
    fn begin(&mut self, ev: &E) -> Decision;

    /// A move while started.
    fn update(&mut self, ev: &E);

    /// The session released normally. Fires exactly once.
    fn finish(&mut self, ev: &E);

    /// The session was canceled externally; clean up synchronously.
    fn abort(&mut self);
}

/// Outcome of a press offered to the dispatcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressOutcome {
    /// Wrong button, or the handler refused capture. No state change.
    Ignored,
    /// Another controller holds the active-session slot.
    Rejected,
    /// The press was captured; the session is armed.
    Armed,
}

/// Drives one controller's sessions from raw pointer events.
#[derive(Debug)]
pub struct PointerDispatcher {
    config: SessionConfig,
    session: Option<PointerSession>,
    id: Option<SessionId>,
}

impl PointerDispatcher {
    /// Create a dispatcher with the given per-session configuration.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            session: None,
            id: None,
        }
    }

    /// The live session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&PointerSession> {
        self.session.as_ref()
    }

    /// Whether a session is live and past its start gate.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.session.is_some_and(|s| s.started())
    }

    /// Offer a press.
    ///
    /// If an unreleased prior session exists, a release is synthesized for
    /// it first, so the stale interaction closes cleanly before the new
    /// one is considered.
    pub fn press<E, H>(&mut self, tracker: &mut SessionTracker, handler: &mut H, ev: &E) -> PressOutcome
    where
        E: PointerInput,
        H: PointerCaptureHandler<E>,
    {
        if self.session.is_some() {
            self.release(tracker, handler, ev);
        }
        if ev.button() != Some(self.config.button) {
            return PressOutcome::Ignored;
        }
        if !handler.accept_press(ev) {
            return PressOutcome::Ignored;
        }
        let Some(id) = tracker.try_acquire() else {
            return PressOutcome::Rejected;
        };
        self.session = Some(PointerSession::new(self.config, ev.position(), ev.timestamp()));
        self.id = Some(id);
        PressOutcome::Armed
    }

    /// Offer a motion sample. Returns `true` when the handler's `update`
    /// hook ran for it.
    pub fn motion<E, H>(&mut self, tracker: &mut SessionTracker, handler: &mut H, ev: &E) -> bool
    where
        E: PointerInput,
        H: PointerCaptureHandler<E>,
    {
        enum Step {
            Inert,
            Moving,
            Arming,
        }
        let step = match &mut self.session {
            None => return false,
            Some(s) if s.started() => {
                s.track(ev.position());
                Step::Moving
            }
            Some(s) => {
                if s.evaluate_start(ev.position(), ev.timestamp()) {
                    Step::Arming
                } else {
                    Step::Inert
                }
            }
        };
        match step {
            Step::Inert => false,
            Step::Moving => {
                handler.update(ev);
                true
            }
            Step::Arming => {
                if handler.begin(ev).is_cancel() {
                    // Unwind; the eventual pointer-up for this gesture is
                    // ignored because no session remains.
                    self.teardown(tracker);
                    return false;
                }
                handler.update(ev);
                true
            }
        }
    }

    /// Offer a release. Returns `true` when a started session finished.
    pub fn release<E, H>(&mut self, tracker: &mut SessionTracker, handler: &mut H, ev: &E) -> bool
    where
        E: PointerInput,
        H: PointerCaptureHandler<E>,
    {
        let Some(session) = self.session.take() else {
            return false;
        };
        if let Some(id) = self.id.take() {
            tracker.release(id);
        }
        if session.started() {
            handler.finish(ev);
            true
        } else {
            false
        }
    }

    /// Cancel the live session, if any. Idempotent; a started session gets
    /// exactly one `abort`.
    pub fn cancel<E, H>(&mut self, tracker: &mut SessionTracker, handler: &mut H)
    where
        E: PointerInput,
        H: PointerCaptureHandler<E>,
    {
        let Some(session) = self.session.take() else {
            return;
        };
        if let Some(id) = self.id.take() {
            tracker.release(id);
        }
        if session.started() {
            handler.abort();
        }
    }

    fn teardown(&mut self, tracker: &mut SessionTracker) {
        self.session = None;
        if let Some(id) = self.id.take() {
            tracker.release(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use alloc::{format, string::String};

    #[derive(Default)]
    struct Probe {
        log: Vec<String>,
        refuse_press: bool,
        cancel_start: bool,
    }

    impl PointerCaptureHandler<PointerEvent> for Probe {
        fn accept_press(&mut self, _ev: &PointerEvent) -> bool {
            !self.refuse_press
        }

        fn begin(&mut self, ev: &PointerEvent) -> Decision {
            self.log.push(format!("start@{}", ev.timestamp));
            if self.cancel_start {
                Decision::Cancel
            } else {
                Decision::Proceed
            }
        }

        fn update(&mut self, ev: &PointerEvent) {
            self.log.push(format!("drag@{}", ev.timestamp));
        }

        fn finish(&mut self, ev: &PointerEvent) {
            self.log.push(format!("stop@{}", ev.timestamp));
        }

        fn abort(&mut self) {
            self.log.push(String::from("abort"));
        }
    }

    fn rig() -> (SessionTracker, PointerDispatcher, Probe) {
        (
            SessionTracker::new(),
            PointerDispatcher::new(SessionConfig::default()),
            Probe::default(),
        )
    }

    #[test]
    fn full_lifecycle_in_order() {
        let (mut t, mut d, mut h) = rig();
        assert_eq!(
            d.press(&mut t, &mut h, &PointerEvent::press(Point::ZERO, 0)),
            PressOutcome::Armed
        );
        assert!(d.motion(&mut t, &mut h, &PointerEvent::motion(Point::new(3.0, 0.0), 1)));
        assert!(d.motion(&mut t, &mut h, &PointerEvent::motion(Point::new(6.0, 0.0), 2)));
        assert!(d.release(&mut t, &mut h, &PointerEvent::motion(Point::new(6.0, 0.0), 3)));
        assert_eq!(h.log, ["start@1", "drag@1", "drag@2", "stop@3"]);
        assert!(!t.is_active());
    }

    #[test]
    fn below_threshold_release_fires_nothing() {
        // Scenario: 3px of travel against a 5px threshold, zero delay.
        let mut t = SessionTracker::new();
        let mut d = PointerDispatcher::new(SessionConfig {
            move_threshold: 5.0,
            ..SessionConfig::default()
        });
        let mut h = Probe::default();
        d.press(&mut t, &mut h, &PointerEvent::press(Point::ZERO, 0));
        assert!(!d.motion(&mut t, &mut h, &PointerEvent::motion(Point::new(3.0, 0.0), 1)));
        assert!(!d.release(&mut t, &mut h, &PointerEvent::motion(Point::new(3.0, 0.0), 2)));
        assert!(h.log.is_empty());
        assert!(!t.is_active());
    }

    #[test]
    fn wrong_button_is_silently_ignored() {
        let (mut t, mut d, mut h) = rig();
        let ev = PointerEvent {
            position: Point::ZERO,
            timestamp: 0,
            button: Some(2),
        };
        assert_eq!(d.press(&mut t, &mut h, &ev), PressOutcome::Ignored);
        assert!(!t.is_active());
    }

    #[test]
    fn refused_capture_changes_nothing() {
        let (mut t, mut d, mut h) = rig();
        h.refuse_press = true;
        assert_eq!(
            d.press(&mut t, &mut h, &PointerEvent::press(Point::ZERO, 0)),
            PressOutcome::Ignored
        );
        assert!(d.session().is_none());
        assert!(!t.is_active());
    }

    #[test]
    fn overlapping_press_across_controllers_is_rejected() {
        let mut t = SessionTracker::new();
        let mut d1 = PointerDispatcher::new(SessionConfig::default());
        let mut d2 = PointerDispatcher::new(SessionConfig::default());
        let mut h1 = Probe::default();
        let mut h2 = Probe::default();

        assert_eq!(
            d1.press(&mut t, &mut h1, &PointerEvent::press(Point::ZERO, 0)),
            PressOutcome::Armed
        );
        assert_eq!(
            d2.press(&mut t, &mut h2, &PointerEvent::press(Point::ZERO, 1)),
            PressOutcome::Rejected
        );
        assert!(h2.log.is_empty());
    }

    #[test]
    fn new_press_synthesizes_release_for_stale_session() {
        let (mut t, mut d, mut h) = rig();
        d.press(&mut t, &mut h, &PointerEvent::press(Point::ZERO, 0));
        d.motion(&mut t, &mut h, &PointerEvent::motion(Point::new(5.0, 0.0), 1));
        // The release was missed; the next press closes the old session
        // before arming a new one.
        assert_eq!(
            d.press(&mut t, &mut h, &PointerEvent::press(Point::new(50.0, 0.0), 100)),
            PressOutcome::Armed
        );
        assert_eq!(h.log, ["start@1", "drag@1", "stop@100"]);
        assert!(t.is_active());
    }

    #[test]
    fn canceled_begin_ignores_rest_of_gesture() {
        let (mut t, mut d, mut h) = rig();
        h.cancel_start = true;
        d.press(&mut t, &mut h, &PointerEvent::press(Point::ZERO, 0));
        assert!(!d.motion(&mut t, &mut h, &PointerEvent::motion(Point::new(5.0, 0.0), 1)));
        // Slot is free again, further motion and the release are inert.
        assert!(!t.is_active());
        assert!(!d.motion(&mut t, &mut h, &PointerEvent::motion(Point::new(9.0, 0.0), 2)));
        assert!(!d.release(&mut t, &mut h, &PointerEvent::motion(Point::new(9.0, 0.0), 3)));
        assert_eq!(h.log, ["start@1"]);
    }

    #[test]
    fn cancel_is_idempotent() {
        let (mut t, mut d, mut h) = rig();
        d.press(&mut t, &mut h, &PointerEvent::press(Point::ZERO, 0));
        d.motion(&mut t, &mut h, &PointerEvent::motion(Point::new(5.0, 0.0), 1));
        d.cancel::<PointerEvent, _>(&mut t, &mut h);
        d.cancel::<PointerEvent, _>(&mut t, &mut h);
        assert_eq!(h.log, ["start@1", "drag@1", "abort"]);
        assert!(!t.is_active());
        // A release after cancellation is inert too.
        assert!(!d.release(&mut t, &mut h, &PointerEvent::motion(Point::ZERO, 2)));
    }

    #[test]
    fn cancel_before_start_fires_no_abort() {
        let (mut t, mut d, mut h) = rig();
        d.press(&mut t, &mut h, &PointerEvent::press(Point::ZERO, 0));
        d.cancel::<PointerEvent, _>(&mut t, &mut h);
        assert!(h.log.is_empty());
        assert!(!t.is_active());
    }

    #[test]
    fn delay_gates_start_until_timestamp() {
        let mut t = SessionTracker::new();
        let mut d = PointerDispatcher::new(SessionConfig {
            start_delay_ms: 100,
            ..SessionConfig::default()
        });
        let mut h = Probe::default();
        d.press(&mut t, &mut h, &PointerEvent::press(Point::ZERO, 1_000));
        assert!(!d.motion(&mut t, &mut h, &PointerEvent::motion(Point::new(10.0, 0.0), 1_050)));
        assert!(d.motion(&mut t, &mut h, &PointerEvent::motion(Point::new(11.0, 0.0), 1_100)));
        assert_eq!(h.log, ["start@1100", "drag@1100"]);
    }
}
