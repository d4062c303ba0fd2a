// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The sort engine: containers, slot sequences, and the placeholder.

use hashbrown::HashMap;
use kurbo::{Point, Rect};
use smallvec::SmallVec;
use trellis_events::{InteractionContext, SortListener};

use crate::intersect::{
    center_distance_sq, insert_side, slot_hit, InsertSide, Probe, SlotMatch, Travel,
};
use crate::layout::SlotLayout;

bitflags::bitflags! {
    /// Per-container state flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ContainerFlags: u8 {
        /// Participates in bridged drags from outside.
        const ACCEPTING = 0b0000_0001;
        /// Excluded from all matching.
        const DISABLED  = 0b0000_0010;
        /// The dragged item is currently over this container. At most one
        /// container carries this flag at a time.
        const OVER      = 0b0000_0100;
    }
}

impl Default for ContainerFlags {
    fn default() -> Self {
        Self::ACCEPTING
    }
}

/// Stacking direction of a container's items; selects the primary axis
/// for before/after decisions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    /// Items stack top to bottom.
    #[default]
    Vertical,
    /// Items flow left to right.
    Horizontal,
}

/// One candidate drop position: an item and its cached bounding box.
#[derive(Clone, Debug, PartialEq)]
pub struct Slot<K> {
    /// The item occupying this slot (the placeholder, for exactly one
    /// slot during an active session).
    pub item: K,
    /// Cached page-space bounding box.
    pub rect: Rect,
}

#[derive(Clone, Debug)]
struct ContainerState<K> {
    rect: Rect,
    orientation: Orientation,
    flags: ContainerFlags,
    slots: SmallVec<[Slot<K>; 8]>,
}

#[derive(Clone, Debug)]
struct Session<C, K> {
    item: K,
    placeholder: K,
    container: C,
    origin: Option<(C, usize)>,
    original_rect: Rect,
    last_rect: Rect,
    last_pointer: Option<Point>,
    travel: Travel,
}

#[derive(Clone, Debug)]
struct Pending<C> {
    containers: SmallVec<[C; 2]>,
    generation: u64,
}

/// An accepted placeholder move, for the host to mirror in its tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Reorder<C, K> {
    /// Container and index the placeholder left.
    pub from: (C, usize),
    /// Container and index the placeholder now occupies.
    pub to: (C, usize),
    /// The slot item the match resolved to.
    pub target: K,
    /// Which side of the target the placeholder took.
    pub side: InsertSide,
}

/// Result of committing a drop.
#[derive(Clone, Debug, PartialEq)]
pub struct DropReport<C> {
    /// Container the item landed in.
    pub container: C,
    /// Final index of the item within that container.
    pub index: usize,
    /// Where the item came from; `None` for externally bridged items.
    pub origin: Option<(C, usize)>,
    /// Whether the item landed somewhere other than where it started.
    pub received: bool,
}

/// Result of canceling a session.
#[derive(Clone, Debug, PartialEq)]
pub struct CancelReport<C> {
    /// The container and index the item was restored to, when the
    /// session had an origin.
    pub origin: Option<(C, usize)>,
}

/// Maintains ordered slot sequences across containers and the single
/// placeholder of the active session.
///
/// The engine mirrors — never owns — the host's item tree: hosts apply
/// the [`Reorder`] operations it emits, keep their layout source current,
/// and flush the debounced refreshes it schedules.
pub struct SortEngine<C, K> {
    containers: HashMap<C, ContainerState<K>>,
    session: Option<Session<C, K>>,
    generation: u64,
    pending: Option<Pending<C>>,
}

impl<C: core::fmt::Debug, K> core::fmt::Debug for SortEngine<C, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SortEngine")
            .field("containers", &self.containers.len())
            .field("active", &self.session.is_some())
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl<C, K> Default for SortEngine<C, K>
where
    C: core::hash::Hash + Eq + Clone,
    K: PartialEq + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C, K> SortEngine<C, K>
where
    C: core::hash::Hash + Eq + Clone,
    K: PartialEq + Clone,
{
    /// Create an engine with no containers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            containers: HashMap::new(),
            session: None,
            generation: 0,
            pending: None,
        }
    }

    /// Register a container and build its initial slot sequence.
    pub fn register(&mut self, container: C, layout: &mut dyn SlotLayout<C, K>) {
        let state = ContainerState {
            rect: layout.container_rect(&container),
            orientation: Orientation::default(),
            flags: ContainerFlags::default(),
            slots: read_slots(&container, layout),
        };
        self.containers.insert(container, state);
    }

    /// Set a container's stacking direction.
    pub fn set_orientation(&mut self, container: &C, orientation: Orientation) {
        if let Some(state) = self.containers.get_mut(container) {
            state.orientation = orientation;
        }
    }

    /// Replace a container's flags (the `OVER` bit is engine-managed and
    /// ignored here).
    pub fn set_flags(&mut self, container: &C, flags: ContainerFlags) {
        if let Some(state) = self.containers.get_mut(container) {
            let over = state.flags & ContainerFlags::OVER;
            state.flags = (flags - ContainerFlags::OVER) | over;
        }
    }

    /// A container's flags.
    #[must_use]
    pub fn flags(&self, container: &C) -> Option<ContainerFlags> {
        self.containers.get(container).map(|s| s.flags)
    }

    /// Whether the dragged item is currently over this container.
    #[must_use]
    pub fn is_over(&self, container: &C) -> bool {
        self.flags(container)
            .is_some_and(|f| f.contains(ContainerFlags::OVER))
    }

    /// Cached page-space rectangle of a container.
    #[must_use]
    pub fn container_rect(&self, container: &C) -> Option<Rect> {
        self.containers.get(container).map(|s| s.rect)
    }

    /// Registered containers that accept bridged drags.
    pub fn accepting_containers(&self) -> impl Iterator<Item = (&C, Rect)> {
        self.containers.iter().filter_map(|(c, s)| {
            (s.flags.contains(ContainerFlags::ACCEPTING)
                && !s.flags.contains(ContainerFlags::DISABLED))
            .then_some((c, s.rect))
        })
    }

    /// Current slot sequence of a container.
    #[must_use]
    pub fn slots(&self, container: &C) -> Option<&[Slot<K>]> {
        self.containers.get(container).map(|s| s.slots.as_slice())
    }

    /// Whether a session is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// The placeholder's container and slot index, while active.
    #[must_use]
    pub fn placeholder_position(&self) -> Option<(C, usize)> {
        let session = self.session.as_ref()?;
        let idx = self.find_placeholder(&session.container)?;
        Some((session.container.clone(), idx))
    }

    /// Rebuild one container's rect and slot sequence from the layout
    /// source. Ground truth is the host's current item order, which
    /// includes the placeholder during an active session.
    pub fn refresh(&mut self, container: &C, layout: &mut dyn SlotLayout<C, K>) {
        if let Some(state) = self.containers.get_mut(container) {
            state.rect = layout.container_rect(container);
            state.slots = read_slots(container, layout);
        }
    }

    /// Schedule a debounced refresh of `containers`, superseding any
    /// previously scheduled one. Returns the generation to pass to
    /// [`SortEngine::flush_refresh`].
    pub fn schedule_refresh(&mut self, containers: impl IntoIterator<Item = C>) -> u64 {
        self.generation += 1;
        self.pending = Some(Pending {
            containers: containers.into_iter().collect(),
            generation: self.generation,
        });
        self.generation
    }

    /// The generation of the currently scheduled refresh, if any.
    #[must_use]
    pub fn pending_generation(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.generation)
    }

    /// Execute a scheduled refresh if — and only if — `generation` is
    /// still the latest. Stale flushes are no-ops, which is what bounds
    /// layout reads during fast drags.
    pub fn flush_refresh(&mut self, generation: u64, layout: &mut dyn SlotLayout<C, K>) -> bool {
        let current = self
            .pending
            .as_ref()
            .is_some_and(|p| p.generation == generation);
        if !current {
            return false;
        }
        let Some(pending) = self.pending.take() else {
            return false;
        };
        for c in pending.containers {
            self.refresh(&c, layout);
        }
        true
    }

    /// Start a sort session for an item already inside `container`.
    ///
    /// The engine re-reads the container (a session must start from
    /// ground truth), lifts the item out of its slot, and puts the
    /// placeholder in its place. The host mirrors this by hiding the item
    /// node and inserting the placeholder node at the same index.
    ///
    /// Returns the item's origin index, or `None` if the item is not in
    /// the container.
    pub fn begin(
        &mut self,
        container: &C,
        item: &K,
        placeholder: K,
        layout: &mut dyn SlotLayout<C, K>,
    ) -> Option<usize> {
        if self.session.is_some() {
            return None;
        }
        self.refresh(container, layout);
        let state = self.containers.get_mut(container)?;
        let index = state.slots.iter().position(|s| s.item == *item)?;
        let rect = state.slots[index].rect;
        state.slots[index].item = placeholder.clone();
        state.flags |= ContainerFlags::OVER;
        self.session = Some(Session {
            item: item.clone(),
            placeholder,
            container: container.clone(),
            origin: Some((container.clone(), index)),
            original_rect: rect,
            last_rect: rect,
            last_pointer: None,
            travel: Travel::default(),
        });
        Some(index)
    }

    /// Start a synthesized session for an item that entered from outside
    /// (a bridged drag). The placeholder is appended; the next
    /// [`SortEngine::update`] positions it properly.
    ///
    /// Returns the placeholder's initial index.
    pub fn begin_external(
        &mut self,
        container: &C,
        item: K,
        placeholder: K,
        helper_rect: Rect,
    ) -> Option<usize> {
        if self.session.is_some() {
            return None;
        }
        let state = self.containers.get_mut(container)?;
        let index = state.slots.len();
        state.slots.push(Slot {
            item: placeholder.clone(),
            rect: helper_rect,
        });
        state.flags |= ContainerFlags::OVER;
        self.session = Some(Session {
            item,
            placeholder,
            container: container.clone(),
            origin: None,
            original_rect: helper_rect,
            last_rect: helper_rect,
            last_pointer: None,
            travel: Travel::default(),
        });
        Some(index)
    }

    /// Tear down an externally synthesized session before a drop: the
    /// placeholder is removed, which restores the entered container's
    /// slot list to its pre-entry state. Returns the container it was
    /// removed from.
    pub fn teardown_external(&mut self) -> Option<C> {
        let session = self.session.take()?;
        let container = session.container;
        if let Some(state) = self.containers.get_mut(&container) {
            state.slots.retain(|s| s.item != session.placeholder);
            state.flags -= ContainerFlags::OVER;
        }
        Some(container)
    }

    /// Match the dragged item against every enabled container's slots.
    ///
    /// Candidates exclude the placeholder's own slot; among multiple
    /// matches the slot whose center is nearest the pointer wins, and the
    /// travel direction decides the insertion side.
    #[must_use]
    pub fn match_slot(&self, probe: &Probe) -> Option<(C, SlotMatch<K>)> {
        let session = self.session.as_ref()?;
        let mut best: Option<(C, usize, Rect, f64)> = None;
        for (c, state) in &self.containers {
            if state.flags.contains(ContainerFlags::DISABLED) {
                continue;
            }
            for (i, slot) in state.slots.iter().enumerate() {
                if slot.item == session.placeholder {
                    continue;
                }
                if !slot_hit(probe, slot.rect) {
                    continue;
                }
                let dist = center_distance_sq(probe, slot.rect);
                if best.as_ref().is_none_or(|(_, _, _, d)| dist < *d) {
                    best = Some((c.clone(), i, slot.rect, dist));
                }
            }
        }
        let (container, index, rect, _) = best?;
        let orientation = self.containers[&container].orientation;
        let side = insert_side(probe, rect, orientation, session.travel);
        let item = self.containers[&container].slots[index].item.clone();
        Some((container, SlotMatch { item, index, side }))
    }

    /// Process one move of the dragged item.
    ///
    /// Updates travel tracking, matches a slot, and — when the match
    /// calls for it — moves the placeholder, notifying listeners
    /// (`remove`/`over` across containers, `change` on every accepted
    /// reorder) and scheduling the debounced refresh. Returns the
    /// [`Reorder`] for the host to mirror, or `None` when nothing moved.
    pub fn update(
        &mut self,
        probe: &Probe,
        listener: &mut dyn SortListener<C, K>,
    ) -> Option<Reorder<C, K>> {
        {
            let session = self.session.as_mut()?;
            let from = session.last_pointer.unwrap_or(probe.pointer);
            session.travel.advance(from, probe.pointer);
            session.last_pointer = Some(probe.pointer);
            session.last_rect = probe.helper_rect;
        }

        let (target_container, matched) = self.match_slot(probe)?;
        let session = self.session.as_ref()?;
        let old_container = session.container.clone();
        let old_index = self.find_placeholder(&old_container)?;

        // Work out the post-removal insertion index and drop no-ops.
        let same = target_container == old_container;
        let mut to_index = matched.index;
        if same && old_index < matched.index {
            to_index -= 1;
        }
        if matched.side == InsertSide::After {
            to_index += 1;
        }
        if same && to_index == old_index {
            return None;
        }

        let ctx = self.session_context()?;
        let placeholder = self.session.as_ref()?.placeholder.clone();

        // Detach from the old container first; a cross-container move
        // re-homes the placeholder before insertion.
        if let Some(state) = self.containers.get_mut(&old_container) {
            state.slots.remove(old_index);
            if !same {
                state.flags -= ContainerFlags::OVER;
            }
        }
        if !same {
            listener.remove(&old_container, &ctx);
        }
        {
            let state = self.containers.get_mut(&target_container)?;
            let at = to_index.min(state.slots.len());
            state.slots.insert(
                at,
                Slot {
                    item: placeholder,
                    rect: self.session.as_ref()?.last_rect,
                },
            );
            state.flags |= ContainerFlags::OVER;
        }
        if !same {
            listener.over(&target_container, &ctx);
        }
        if let Some(session) = self.session.as_mut() {
            session.container = target_container.clone();
        }
        listener.change(&target_container, &ctx);

        let mut touched: SmallVec<[C; 2]> = SmallVec::new();
        touched.push(target_container.clone());
        if !same {
            touched.push(old_container.clone());
        }
        self.schedule_refresh(touched);

        Some(Reorder {
            from: (old_container, old_index),
            to: (target_container, to_index),
            target: matched.item,
            side: matched.side,
        })
    }

    /// Finalize the drop: the placeholder's slot becomes the real item's
    /// slot, `update` (and `receive`, when the item came from elsewhere)
    /// fire, and the final index is reported. The host moves the real
    /// node into the placeholder's former position.
    pub fn commit(&mut self, listener: &mut dyn SortListener<C, K>) -> Option<DropReport<C>> {
        let ctx = self.session_context()?;
        let session = self.session.take()?;
        let container = session.container.clone();
        let index = self
            .containers
            .get(&container)?
            .slots
            .iter()
            .position(|s| s.item == session.placeholder)?;
        if let Some(state) = self.containers.get_mut(&container) {
            state.slots[index].item = session.item.clone();
            state.flags -= ContainerFlags::OVER;
        }

        let received = session
            .origin
            .as_ref()
            .is_none_or(|(origin, _)| *origin != container);
        listener.update(&container, &ctx);
        if received {
            listener.receive(&container, &ctx);
        }

        let mut touched: SmallVec<[C; 2]> = SmallVec::new();
        touched.push(container.clone());
        if let Some((origin, _)) = session.origin.as_ref() {
            if *origin != container {
                touched.push(origin.clone());
            }
        }
        self.schedule_refresh(touched);

        Some(DropReport {
            container,
            index,
            origin: session.origin,
            received,
        })
    }

    /// Abandon the session: the placeholder is removed and the item
    /// returns to its origin, ignoring any intermediate reorders.
    /// Idempotent — a second cancel returns `None`.
    pub fn cancel(&mut self) -> Option<CancelReport<C>> {
        let session = self.session.take()?;
        if let Some(state) = self.containers.get_mut(&session.container) {
            state.slots.retain(|s| s.item != session.placeholder);
            state.flags -= ContainerFlags::OVER;
        }
        if let Some((origin, index)) = session.origin.as_ref() {
            if let Some(state) = self.containers.get_mut(origin) {
                let at = (*index).min(state.slots.len());
                state.slots.insert(
                    at,
                    Slot {
                        item: session.item.clone(),
                        rect: session.original_rect,
                    },
                );
            }
        }
        if let Some((origin, _)) = session.origin.as_ref() {
            let mut touched: SmallVec<[C; 2]> = SmallVec::new();
            touched.push(origin.clone());
            if *origin != session.container {
                touched.push(session.container.clone());
            }
            self.schedule_refresh(touched);
        }
        Some(CancelReport {
            origin: session.origin,
        })
    }

    /// Notification context for the active session's dragged item.
    #[must_use]
    pub fn session_context(&self) -> Option<InteractionContext<K>> {
        let session = self.session.as_ref()?;
        Some(InteractionContext {
            position: Point::new(session.last_rect.x0, session.last_rect.y0),
            size: session.last_rect.size(),
            original_position: Point::new(session.original_rect.x0, session.original_rect.y0),
            original_size: session.original_rect.size(),
            helper: Some(session.placeholder.clone()),
            element: session.item.clone(),
        })
    }

    fn find_placeholder(&self, container: &C) -> Option<usize> {
        let session = self.session.as_ref()?;
        self.containers
            .get(container)?
            .slots
            .iter()
            .position(|s| s.item == session.placeholder)
    }
}

fn read_slots<C, K>(container: &C, layout: &mut dyn SlotLayout<C, K>) -> SmallVec<[Slot<K>; 8]> {
    let mut slots = SmallVec::new();
    for i in 0..layout.item_count(container) {
        let item = layout.item_at(container, i);
        let rect = layout.item_rect(container, &item);
        slots.push(Slot { item, rect });
    }
    slots
}
