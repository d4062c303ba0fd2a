// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cross-container bridge between a drag controller and the sort engine.
//!
//! ## Feature
//!
//! Enable with `drag_adapter`.
//!
//! ## Protocol
//!
//! A [`BridgedDrag`] wraps a [`DragController`] and a [`SortEngine`] into
//! one [`PointerCaptureHandler`], so a free-floating draggable item can be
//! absorbed by sortable containers mid-drag:
//!
//! - On start, `activate` fires once on every enabled accepting
//!   container.
//! - On every move, the helper's page box is tested against each
//!   container's *cached* bounding box — a cheap container-level overlap,
//!   never per-slot. At most one container is active at a time; when
//!   several overlap, the innermost (smallest-area) wins. Switching fires
//!   `out` on the previous container and `over` on the new one.
//! - First activation of a container synthesizes a fake sort session
//!   seeded with the dragging helper, so the engine's normal slot
//!   matching applies uniformly whether the item originated inside the
//!   container or was dragged in externally.
//! - Leaving before the drop tears the fake session down, restoring the
//!   container's slot list to its pre-entry state.
//! - A release inside the active container commits through the engine and
//!   records drop acceptance on the drag controller, so its revert policy
//!   sees the outcome; `deactivate` then pairs with every `activate`.
//!
//! The bridge accumulates the [`Reorder`] operations the engine emits;
//! hosts drain them with [`BridgedDrag::take_reorders`] after each event
//! and mirror them in their item tree.

use alloc::vec::Vec;

use kurbo::Rect;
use trellis_drag::{DragController, DragEvent};
use trellis_events::{Decision, InteractionContext, SortListener};
use trellis_pointer::{PointerCaptureHandler, PointerInput};

use crate::engine::{DropReport, Reorder, SortEngine};
use crate::intersect::{Intersect, Probe};

/// A drag controller bridged into a sort engine for the duration of its
/// sessions.
pub struct BridgedDrag<'a, C, K> {
    drag: &'a mut DragController<K>,
    engine: &'a mut SortEngine<C, K>,
    listener: &'a mut dyn SortListener<C, K>,
    placeholder: K,
    mode: Intersect,
    active: Option<C>,
    activated: bool,
    reorders: Vec<Reorder<C, K>>,
    last_drop: Option<DropReport<C>>,
}

impl<C: core::fmt::Debug, K: core::fmt::Debug> core::fmt::Debug for BridgedDrag<'_, C, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BridgedDrag")
            .field("active", &self.active)
            .field("activated", &self.activated)
            .field("reorders", &self.reorders.len())
            .finish_non_exhaustive()
    }
}

impl<'a, C, K> BridgedDrag<'a, C, K>
where
    C: core::hash::Hash + Eq + Clone,
    K: PartialEq + Clone,
{
    /// Bridge `drag` into `engine`, using `placeholder` as the key for
    /// synthesized sessions.
    pub fn new(
        drag: &'a mut DragController<K>,
        engine: &'a mut SortEngine<C, K>,
        listener: &'a mut dyn SortListener<C, K>,
        placeholder: K,
    ) -> Self {
        Self {
            drag,
            engine,
            listener,
            placeholder,
            mode: Intersect::default(),
            active: None,
            activated: false,
            reorders: Vec::new(),
            last_drop: None,
        }
    }

    /// Use a specific intersection mode for slot matching.
    #[must_use]
    pub fn with_mode(mut self, mode: Intersect) -> Self {
        self.mode = mode;
        self
    }

    /// The currently active container, if the item is over one.
    #[must_use]
    pub fn active(&self) -> Option<&C> {
        self.active.as_ref()
    }

    /// Drain the reorder operations accumulated since the last call.
    pub fn take_reorders(&mut self) -> Vec<Reorder<C, K>> {
        core::mem::take(&mut self.reorders)
    }

    /// The drop report of the most recent committed release.
    pub fn take_drop(&mut self) -> Option<DropReport<C>> {
        self.last_drop.take()
    }

    fn drag_context(&self) -> Option<InteractionContext<K>> {
        let g = self.drag.geometry()?;
        Some(g.context(self.drag.element().clone(), self.drag.helper().cloned()))
    }

    // Cheap container-level activation test against cached rects. The
    // innermost overlapping container wins.
    fn target_container(&self, helper: Rect) -> Option<C> {
        let mut best: Option<(C, f64)> = None;
        for (c, rect) in self.engine.accepting_containers() {
            let overlap = rect.intersect(helper);
            if overlap.width() <= 0.0 || overlap.height() <= 0.0 {
                continue;
            }
            let area = rect.width() * rect.height();
            if best.as_ref().is_none_or(|(_, a)| area < *a) {
                best = Some((c.clone(), area));
            }
        }
        best.map(|(c, _)| c)
    }

    fn switch_active(&mut self, target: Option<C>, helper: Rect) {
        if self.active == target {
            return;
        }
        let Some(ctx) = self.drag_context() else {
            return;
        };
        if let Some(old) = self.active.take() {
            self.engine.teardown_external();
            self.listener.out(&old, &ctx);
        }
        if let Some(new) = target {
            self.engine.begin_external(
                &new,
                self.drag.element().clone(),
                self.placeholder.clone(),
                helper,
            );
            self.listener.over(&new, &ctx);
            self.active = Some(new);
        }
    }

    fn deactivate_all(&mut self) {
        if !self.activated {
            return;
        }
        self.activated = false;
        let Some(ctx) = self.drag_context() else {
            return;
        };
        let containers: Vec<C> = self
            .engine
            .accepting_containers()
            .map(|(c, _)| c.clone())
            .collect();
        for c in containers {
            self.listener.deactivate(&c, &ctx);
        }
    }
}

impl<C, K> PointerCaptureHandler<DragEvent> for BridgedDrag<'_, C, K>
where
    C: core::hash::Hash + Eq + Clone,
    K: PartialEq + Clone,
{
    fn accept_press(&mut self, ev: &DragEvent) -> bool {
        self.drag.accept_press(ev)
    }

    fn begin(&mut self, ev: &DragEvent) -> Decision {
        let decision = self.drag.begin(ev);
        if decision.is_cancel() {
            return decision;
        }
        self.last_drop = None;
        self.activated = true;
        if let Some(ctx) = self.drag_context() {
            let containers: Vec<C> = self
                .engine
                .accepting_containers()
                .map(|(c, _)| c.clone())
                .collect();
            for c in containers {
                self.listener.activate(&c, &ctx);
            }
        }
        Decision::Proceed
    }

    fn update(&mut self, ev: &DragEvent) {
        self.drag.update(ev);
        let Some(helper) = self.drag.page_rect() else {
            return;
        };
        let target = self.target_container(helper);
        self.switch_active(target, helper);
        if self.active.is_some() {
            let probe = Probe {
                pointer: ev.position(),
                helper_rect: helper,
                mode: self.mode,
            };
            if let Some(op) = self.engine.update(&probe, self.listener) {
                self.reorders.push(op);
            }
        }
    }

    fn finish(&mut self, ev: &DragEvent) {
        if self.active.take().is_some() {
            let report = self.engine.commit(self.listener);
            self.drag.set_drop_accepted(report.is_some());
            self.last_drop = report;
        } else {
            self.drag.set_drop_accepted(false);
        }
        self.deactivate_all();
        self.drag.finish(ev);
    }

    fn abort(&mut self) {
        if self.active.take().is_some() {
            self.engine.cancel();
        }
        self.deactivate_all();
        self.drag.abort();
    }
}
