// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Events: the typed notification contract between interaction
//! controllers and their collaborators.
//!
//! ## Overview
//!
//! Trellis controllers (drag, resize, sort) report lifecycle progress to
//! host code through listener traits defined here. Two rules shape the
//! contract:
//!
//! - Cancelable notifications return a typed [`Decision`] rather than an
//!   overloaded boolean: [`Decision::Cancel`] is authoritative and unwinds
//!   the controller, [`Decision::Proceed`] lets it continue. Notifications
//!   that are not cancelable return nothing.
//! - No error is ever propagated across the notification boundary.
//!   Listeners veto by returning [`Decision::Cancel`]; they never panic or
//!   surface errors into the engine.
//!
//! Every notification carries an [`InteractionContext`] describing the
//! current and original geometry of the interacting element, so consumers
//! (a grid, a menu, a panel host) can read positions and sizes without
//! reaching into controller internals. Contexts are snapshots: mutating a
//! context has no effect on the engine.
//!
//! ## Folding decisions
//!
//! When several listeners observe the same cancelable notification, all of
//! them see it and the folded verdict wins — a single `Cancel` cancels:
//!
//! ```
//! use trellis_events::Decision;
//!
//! let verdict = [Decision::Proceed, Decision::Cancel, Decision::Proceed]
//!     .into_iter()
//!     .fold(Decision::Proceed, Decision::and);
//! assert_eq!(verdict, Decision::Cancel);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use kurbo::{Point, Size};

/// Verdict returned from a cancelable notification.
///
/// Replaces the legacy convention where a listener returning `false` meant
/// "cancel" and anything else meant "continue". The engine treats
/// [`Decision::Cancel`] as authoritative: the operation that triggered the
/// notification is unwound and no later lifecycle stage runs for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Continue with the operation.
    Proceed,
    /// Abort the operation; the controller unwinds to its idle state.
    Cancel,
}

impl Decision {
    /// Fold two decisions; any `Cancel` wins.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::Proceed, Self::Proceed) => Self::Proceed,
            _ => Self::Cancel,
        }
    }

    /// Returns `true` for [`Decision::Cancel`].
    #[must_use]
    pub fn is_cancel(self) -> bool {
        matches!(self, Self::Cancel)
    }
}

/// Current and original box of the interacting element.
///
/// Owned exclusively by the active controller; collaborators read it
/// through the [`InteractionContext`] snapshots built from it and never
/// mutate it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    /// Current position (top/left).
    pub position: Point,
    /// Current size.
    pub size: Size,
    /// Position captured at interaction start.
    pub original_position: Point,
    /// Size captured at interaction start.
    pub original_size: Size,
}

impl Geometry {
    /// Geometry for an interaction that has not moved yet.
    #[must_use]
    pub fn at_rest(position: Point, size: Size) -> Self {
        Self {
            position,
            size,
            original_position: position,
            original_size: size,
        }
    }

    /// Build the notification context for this geometry.
    pub fn context<K>(&self, element: K, helper: Option<K>) -> InteractionContext<K> {
        InteractionContext {
            position: self.position,
            size: self.size,
            original_position: self.original_position,
            original_size: self.original_size,
            helper,
            element,
        }
    }
}

/// Snapshot of an interacting element's geometry, delivered with every
/// lifecycle notification.
///
/// `position`/`size` are the element's current values in its position
/// coordinate space; the `original_*` fields are the values captured when
/// the interaction started. `helper` names the generated stand-in node
/// (clone/ghost) when one exists, `element` the real node.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionContext<K> {
    /// Current position (top/left) of the moving box.
    pub position: Point,
    /// Current size of the moving box.
    pub size: Size,
    /// Position captured at interaction start.
    pub original_position: Point,
    /// Size captured at interaction start.
    pub original_size: Size,
    /// The generated helper node, when the interaction uses one.
    pub helper: Option<K>,
    /// The real interacting node.
    pub element: K,
}

impl<K: Clone> InteractionContext<K> {
    /// Build a context for an interaction that has not moved yet.
    pub fn at_rest(element: K, position: Point, size: Size) -> Self {
        Self {
            position,
            size,
            original_position: position,
            original_size: size,
            helper: None,
            element,
        }
    }

    /// Net travel since the interaction started.
    #[must_use]
    pub fn travel(&self) -> kurbo::Vec2 {
        self.position - self.original_position
    }
}

/// Observer of a drag (or resize) lifecycle.
///
/// `on_start` is the only cancelable stage; returning
/// [`Decision::Cancel`] resets the controller to idle and the rest of the
/// gesture is ignored. `on_move` fires for every accepted move, `on_stop`
/// exactly once per started interaction, on every exit path (commit,
/// revert, cancel).
pub trait DragListener<K> {
    /// The interaction is about to start. Cancelable.
    fn on_start(&mut self, _ctx: &InteractionContext<K>) -> Decision {
        Decision::Proceed
    }

    /// The element moved (or resized). Not cancelable.
    fn on_move(&mut self, _ctx: &InteractionContext<K>) {}

    /// The interaction finished. Fires exactly once.
    fn on_stop(&mut self, _ctx: &InteractionContext<K>) {}
}

/// Observer of sort-container events during a sorted or bridged drag.
///
/// Each notification names the emitting container; the context describes
/// the dragged item. None of these are cancelable.
pub trait SortListener<C, K> {
    /// A bridged drag started and this container is accepting drops.
    fn activate(&mut self, _container: &C, _ctx: &InteractionContext<K>) {}

    /// The bridged drag ended; pairs with `activate`.
    fn deactivate(&mut self, _container: &C, _ctx: &InteractionContext<K>) {}

    /// The dragged item entered this container's bounds.
    fn over(&mut self, _container: &C, _ctx: &InteractionContext<K>) {}

    /// The dragged item left this container's bounds before dropping.
    fn out(&mut self, _container: &C, _ctx: &InteractionContext<K>) {}

    /// The placeholder moved to a new slot within this container.
    fn change(&mut self, _container: &C, _ctx: &InteractionContext<K>) {}

    /// A drop committed in this container.
    fn update(&mut self, _container: &C, _ctx: &InteractionContext<K>) {}

    /// This container received an item that originated elsewhere.
    fn receive(&mut self, _container: &C, _ctx: &InteractionContext<K>) {}

    /// An item that originated in this container was dropped elsewhere.
    fn remove(&mut self, _container: &C, _ctx: &InteractionContext<K>) {}
}

/// Walk every listener with a cancelable notification and fold the verdict.
///
/// All listeners observe the notification even after one cancels; only the
/// folded result is authoritative. An empty listener set proceeds.
pub fn ask_all<L, F>(listeners: &mut [L], mut notify: F) -> Decision
where
    F: FnMut(&mut L) -> Decision,
{
    listeners
        .iter_mut()
        .map(|l| notify(l))
        .fold(Decision::Proceed, Decision::and)
}

/// Walk every listener with a non-cancelable notification.
pub fn notify_all<L, F>(listeners: &mut [L], mut notify: F)
where
    F: FnMut(&mut L),
{
    for l in listeners.iter_mut() {
        notify(l);
    }
}
