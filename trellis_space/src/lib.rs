// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Space: coordinate transforms, containment, and grid snapping.
//!
//! ## Overview
//!
//! Moving an element with the pointer means translating between three
//! coordinate systems on every move:
//!
//! - **Page space**: document coordinates, scroll included. Pointer events
//!   arrive here.
//! - **Element space**: positions measured from the element's border box.
//!   The click offset — where inside the element the press landed — lives
//!   here.
//! - **Position space**: the values written back to the element's
//!   `top`/`left`, whose meaning depends on the positioning scheme and the
//!   offset parent.
//!
//! A [`CoordinateSpace`] is built once at press time from an
//! [`ElementMetrics`] snapshot (the read phase: all geometry reads happen
//! when the snapshot is taken, never interleaved with writes) and then
//! answers [`to_relative`](CoordinateSpace::to_relative) /
//! [`to_absolute`](CoordinateSpace::to_absolute) queries for the rest of
//! the interaction. The scroll term is the only part that may change
//! mid-session; [`CoordinateSpace::refresh_scroll`] folds in a fresh
//! [`ScrollState`] when [`CoordinateSpace::tracks_scroll`] says the scheme
//! requires it.
//!
//! A classic pitfall is encoded here once so callers cannot reintroduce
//! it: when the nearest scrollable ancestor *is* the document root, the
//! pointer's page coordinates already include its scroll offsets, so the
//! transform must not subtract them a second time. [`ScrollState::root`]
//! carries that distinction.
//!
//! ## Containment and snapping
//!
//! [`ContainBox`] is the axis-aligned box a moving element's position is
//! clamped to, resolved from a [`ContainSpec`] (a container's metrics, the
//! document, the window, or an explicit rectangle). Clamping is applied on
//! every move, not only at start, because the box can shrink mid-drag.
//!
//! [`GridSnap`] rounds the travel *delta* — not the absolute position — to
//! step multiples. [`CoordinateSpace::generate_position`] composes the
//! three concerns in the fixed order clamp → snap → clamp, so a snapped
//! position can never escape the containment box.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Size, Vec2};
//! use trellis_space::{
//!     CoordinateSpace, ElementMetrics, Positioning, ScrollState,
//! };
//!
//! // An absolutely positioned element at page (100, 100), pressed 4px in
//! // from its corner.
//! let metrics = ElementMetrics {
//!     page_origin: Point::new(100.0, 100.0),
//!     local_position: Point::new(100.0, 100.0),
//!     parent_origin: Point::ZERO,
//!     parent_border: Vec2::ZERO,
//!     positioning: Positioning::Absolute,
//!     scroll: ScrollState::root(Vec2::ZERO),
//!     size: Size::new(40.0, 40.0),
//! };
//! let space = CoordinateSpace::at_press(&metrics, Point::new(104.0, 104.0));
//!
//! // Moving the pointer 10px right yields a position 10px right.
//! let pos = space.generate_position(Point::new(114.0, 104.0), None, None);
//! assert_eq!(pos, Point::new(110.0, 100.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod containment;
mod coords;
mod metrics;
mod snap;

pub use containment::{ContainBox, ContainSpec, ContainmentInput, ContainerMetrics};
pub use coords::{CoordinateSpace, Offsets};
pub use metrics::{ElementMetrics, Positioning, ScrollState};
pub use snap::GridSnap;
