// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Pointer: press-move-release session tracking.
//!
//! ## Overview
//!
//! A [`PointerSession`] models one complete pointer interaction: the press
//! records an anchor point, subsequent moves are measured against a
//! distance threshold and an optional start delay, and the interaction
//! only *starts* once both have elapsed. Until then the press is inert,
//! which is what lets hosts disambiguate clicks from drags.
//!
//! The [`PointerDispatcher`] is the explicit top-level entry point: hosts
//! forward raw press/motion/release events to it, and it drives whichever
//! controller implements [`PointerCaptureHandler`]. There is no ambient
//! "currently dragging" global — the only shared state is a
//! [`SessionTracker`], a single active-session slot used to reject
//! overlapping presses across controllers.
//!
//! ## Timestamps, not timers
//!
//! The crate never reads a clock. All temporal logic operates on
//! caller-supplied millisecond timestamps, so the start delay is evaluated
//! against the timestamps of the events the host forwards.
//!
//! ## Missed releases
//!
//! Hosts are expected to forward motion and release events observed at the
//! document/window level, so a release outside the pressed element still
//! reaches the dispatcher. If a release is missed entirely (pointer left
//! the window), the next press synthesizes a release for the stale session
//! before arming a new one.
//!
//! ## Example
//!
//! ```
//! use kurbo::Point;
//! use trellis_events::Decision;
//! use trellis_pointer::{
//!     PointerCaptureHandler, PointerDispatcher, PointerEvent, SessionConfig, SessionTracker,
//! };
//!
//! #[derive(Default)]
//! struct Log(Vec<&'static str>);
//!
//! impl PointerCaptureHandler<PointerEvent> for Log {
//!     fn begin(&mut self, _ev: &PointerEvent) -> Decision {
//!         self.0.push("start");
//!         Decision::Proceed
//!     }
//!     fn update(&mut self, _ev: &PointerEvent) {
//!         self.0.push("drag");
//!     }
//!     fn finish(&mut self, _ev: &PointerEvent) {
//!         self.0.push("stop");
//!     }
//!     fn abort(&mut self) {
//!         self.0.push("abort");
//!     }
//! }
//!
//! let mut tracker = SessionTracker::new();
//! let mut dispatcher = PointerDispatcher::new(SessionConfig::default());
//! let mut log = Log::default();
//!
//! dispatcher.press(&mut tracker, &mut log, &PointerEvent::press(Point::ZERO, 0));
//! dispatcher.motion(&mut tracker, &mut log, &PointerEvent::motion(Point::new(5.0, 0.0), 16));
//! dispatcher.release(&mut tracker, &mut log, &PointerEvent::motion(Point::new(5.0, 0.0), 32));
//!
//! assert_eq!(log.0, ["start", "drag", "stop"]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod dispatcher;
mod session;

pub use dispatcher::{PointerCaptureHandler, PointerDispatcher, PointerEvent, PointerInput, PressOutcome};
pub use session::{Button, PointerSession, PRIMARY_BUTTON, SessionConfig, SessionId, SessionTracker};
