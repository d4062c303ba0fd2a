// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Resize: the resize lifecycle controller.
//!
//! ## Overview
//!
//! A [`ResizeController`] is the sibling of the drag controller: it runs
//! on the same pointer session machinery
//! ([`trellis_pointer::PointerDispatcher`] +
//! [`trellis_pointer::PointerCaptureHandler`]) and reports through the
//! same [`trellis_events::DragListener`] lifecycle, but each move patches
//! the element's *box* — position and size — instead of translating it.
//!
//! Eight directional [`Handle`]s map the raw pointer delta to a partial
//! box patch; diagonal handles compose the two adjacent edges. The clamp
//! order is significant and fixed:
//!
//! 1. min/max size limits,
//! 2. leading-edge handles (`N`/`W`/`NW`/`SW`/`NE`) re-derive the
//!    complementary position coordinate so the *opposite* edge stays
//!    anchored,
//! 3. an aspect-ratio lock recomputes one dimension from the original
//!    ratio (the larger implied box wins), re-deriving position again for
//!    the leading diagonals.
//!
//! Combining an aspect lock with grid values is not an error; the aspect
//! recomputation simply runs last. When both size deltas clamp back to
//! zero, position deltas are suppressed — this guards against a 1px jump
//! when a leading-edge handle is pushed past its size limit.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod controller;
mod handle;

pub use controller::{AspectRatio, ResizeConfig, ResizeController, ResizeEvent, ResizePhase};
pub use handle::{BoxPatch, Handle};

pub use trellis_events::{Decision, DragListener, Geometry, InteractionContext};
