// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Drag: the drag lifecycle controller.
//!
//! ## Overview
//!
//! A [`DragController`] orchestrates one drag for a single movable
//! element: capture check, cancelable start, continuous moves with
//! coordinate transform / axis mask / grid snap / containment clamp, and
//! a stop that commits or reverts. It implements
//! [`trellis_pointer::PointerCaptureHandler`], so a
//! [`trellis_pointer::PointerDispatcher`] drives it from raw pointer
//! events; the session thresholds (move distance, start delay) live in
//! the dispatcher's [`trellis_pointer::SessionConfig`].
//!
//! The controller owns the element's [`Geometry`] for the duration of the
//! session and reports progress through [`DragListener`]s. Only the
//! `start` notification is cancelable; `drag` fires on every accepted
//! move and `stop` exactly once per started drag, on every exit path.
//!
//! ## State machine
//!
//! Idle → Armed (pressed, below threshold) → Dragging → Committing or
//! Reverting → Idle. Arming happens in the dispatcher; the controller
//! sees `begin` on the Armed → Dragging edge, `update` per move, and
//! `finish`/`abort` on the way out. A canceled `begin` resets to Idle and
//! the rest of the gesture is ignored.
//!
//! ## Reverting
//!
//! The [`Revert`] policy decides at release time whether the element
//! returns to its original position. `OnInvalidDrop` and `OnValidDrop`
//! consult [`DragController::set_drop_accepted`], which a drop target (or
//! the sortable bridge) records during the drag. Reverting resolves the
//! final geometry to the original position synchronously — animating the
//! way back is the host's concern.
//!
//! ## Detachment
//!
//! If the element is removed from the tree mid-drag, the host calls
//! [`DragController::mark_detached`]. Finalization then skips geometry
//! writes but still fires `stop`, so collaborators can clean up.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod controller;

pub use config::{Axis, DragConfig, HelperMode, Revert};
pub use controller::{DragController, DragEvent, DragOutcome, DragPhase};

pub use trellis_events::{Decision, DragListener, Geometry, InteractionContext};
