// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Session state: anchor tracking, start thresholds, and the shared
//! active-session slot.

use kurbo::{Point, Vec2};

/// Mouse button identifier.
pub type Button = u8;

/// The primary (usually left) button.
pub const PRIMARY_BUTTON: Button = 1;

/// Immutable per-session configuration, resolved when the press is
/// captured.
///
/// Runtime option churn mid-interaction is deliberately unsupported: a
/// session reads its thresholds from the config it was created with and
/// from nothing else.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionConfig {
    /// Minimum pointer travel, in pixels, before the interaction starts.
    pub move_threshold: f64,
    /// Minimum hold time, in milliseconds, before the interaction starts.
    pub start_delay_ms: u64,
    /// Button that must be pressed for the session to be captured.
    pub button: Button,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            move_threshold: 1.0,
            start_delay_ms: 0,
            button: PRIMARY_BUTTON,
        }
    }
}

/// Identifier of a live session, handed out by [`SessionTracker`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

/// The single active-session slot.
///
/// At most one pointer interaction is live at a time, even with
/// overlapping interactive elements. Controllers acquire the slot when a
/// press is captured and must release it on every exit path; the tracker
/// rejects acquisition while another session holds it.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionTracker {
    active: Option<SessionId>,
    next: u64,
}

impl SessionTracker {
    /// Create a tracker with no active session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to acquire the active slot. Returns `None` while another
    /// session holds it.
    pub fn try_acquire(&mut self) -> Option<SessionId> {
        if self.active.is_some() {
            return None;
        }
        let id = SessionId(self.next);
        self.next += 1;
        self.active = Some(id);
        Some(id)
    }

    /// Release the slot if `id` holds it. Releasing an already-released
    /// id is a no-op, which keeps cancellation idempotent.
    pub fn release(&mut self, id: SessionId) -> bool {
        if self.active == Some(id) {
            self.active = None;
            true
        } else {
            false
        }
    }

    /// Returns `true` while any session holds the slot.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}

/// One press-to-release pointer interaction.
///
/// Created when a press is captured, destroyed on release. The session
/// owns the anchor point and the start gate: [`PointerSession::evaluate_start`]
/// reports `true` once **both** the distance threshold and the start delay
/// have elapsed, and stays `true` from then on.
#[derive(Clone, Copy, Debug)]
pub struct PointerSession {
    config: SessionConfig,
    anchor: Point,
    current: Point,
    press_time: u64,
    started: bool,
    distance_met: bool,
    delay_elapsed: bool,
}

impl PointerSession {
    /// Begin tracking a captured press at `anchor`.
    #[must_use]
    pub fn new(config: SessionConfig, anchor: Point, press_time: u64) -> Self {
        Self {
            config,
            anchor,
            current: anchor,
            press_time,
            started: false,
            // A zero threshold or delay is met at the press itself.
            distance_met: config.move_threshold <= 0.0,
            delay_elapsed: config.start_delay_ms == 0,
        }
    }

    /// The page position recorded at press time.
    #[must_use]
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// The most recent pointer position fed to the session.
    #[must_use]
    pub fn current(&self) -> Point {
        self.current
    }

    /// Net pointer travel since the press.
    #[must_use]
    pub fn travel(&self) -> Vec2 {
        self.current - self.anchor
    }

    /// Whether the start gate has opened.
    #[must_use]
    pub fn started(&self) -> bool {
        self.started
    }

    /// Whether the distance threshold has been met so far.
    #[must_use]
    pub fn distance_met(&self) -> bool {
        self.distance_met
    }

    /// Whether the start delay has elapsed so far.
    #[must_use]
    pub fn delay_elapsed(&self) -> bool {
        self.delay_elapsed
    }

    /// Record a move and evaluate the start gate.
    ///
    /// Returns `true` exactly once, on the move where both the distance
    /// threshold and the delay are first simultaneously satisfied; the
    /// session is considered started from that point. Later calls keep
    /// updating the current position but return `false`.
    pub fn evaluate_start(&mut self, pos: Point, timestamp: u64) -> bool {
        self.current = pos;
        if self.started {
            return false;
        }
        if self.anchor.distance(pos) >= self.config.move_threshold {
            self.distance_met = true;
        }
        if timestamp.saturating_sub(self.press_time) >= self.config.start_delay_ms {
            self.delay_elapsed = true;
        }
        if self.distance_met && self.delay_elapsed {
            self.started = true;
            true
        } else {
            false
        }
    }

    /// Record a move after the session has started.
    pub fn track(&mut self, pos: Point) {
        self.current = pos;
    }
}
