// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Sort: slot tracking and placeholder reordering.
//!
//! ## Overview
//!
//! A [`SortEngine`] maintains the ordered sequence of [`Slot`]s — candidate
//! drop positions — for one or more containers, computes which slot a
//! dragged item currently occupies via intersection tests, and models the
//! placeholder that marks the in-progress drop position. Hosts own the
//! actual item tree: they implement [`SlotLayout`] to answer measurement
//! queries, mirror the [`Reorder`] operations the engine emits, and run
//! the debounced refresh when the engine schedules one.
//!
//! ## Matching
//!
//! [`SortEngine::update`] matches the dragged item against every enabled
//! container's slots (the placeholder's own slot is excluded). Two
//! [`Intersect`] modes exist: `Pointer` tests the pointer location
//! itself; `Overlap` (the default) tests the helper's midpoint per axis,
//! falling back to the pointer on an axis where the helper is larger than
//! the slot — large helpers would otherwise match thin strips they merely
//! graze. Pointer travel direction breaks ties and decides whether the
//! placeholder lands before or after the matched slot.
//!
//! ## Debounced refresh
//!
//! Every accepted reorder schedules a refresh of the affected containers,
//! keyed by a monotonically increasing generation counter. Hosts defer the
//! flush to the next turn of their event loop; stale generations are
//! ignored, so a burst of reorders costs one re-measure:
//!
//! ```
//! use kurbo::{Rect, Size};
//! use trellis_sort::{RowLayout, SortEngine};
//!
//! let mut layout: RowLayout<&str, u32> = RowLayout::new();
//! layout.set_container("list", Rect::new(0.0, 0.0, 100.0, 90.0));
//! layout.push("list", 1, Size::new(100.0, 30.0));
//! layout.push("list", 2, Size::new(100.0, 30.0));
//!
//! let mut engine: SortEngine<&str, u32> = SortEngine::new();
//! engine.register("list", &mut layout);
//!
//! let g1 = engine.schedule_refresh(["list"]);
//! let g2 = engine.schedule_refresh(["list"]);
//! assert!(!engine.flush_refresh(g1, &mut layout)); // superseded
//! assert!(engine.flush_refresh(g2, &mut layout)); // latest wins
//! ```
//!
//! ## Cross-container drops
//!
//! Reordering follows matches across containers: the placeholder is
//! re-homed (old container notified with `remove`, new with `over`)
//! before insertion. The `drag_adapter` feature adds the bridge that lets
//! a free-floating drag controller's item enter and leave sortable
//! containers mid-drag.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
mod engine;
mod intersect;
mod layout;

pub use engine::{
    CancelReport, ContainerFlags, DropReport, Orientation, Reorder, Slot, SortEngine,
};
pub use intersect::{AxisDir, InsertSide, Intersect, Probe, SlotMatch, Travel};
pub use layout::{RowLayout, SlotLayout};

pub use trellis_events::{InteractionContext, SortListener};
