// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The measurement boundary between the engine and its host.

use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Point, Rect, Size};

/// Host-implemented measurement source for sortable containers.
///
/// All layout reads flow through this trait, so the engine can batch and
/// debounce them. Methods take `&mut self` so implementations are free to
/// maintain caches without interior mutability at the call site.
///
/// Item order reported here is the ground truth the engine's slot
/// sequences are rebuilt from; during an active sort session it includes
/// the placeholder node wherever the host has currently inserted it.
pub trait SlotLayout<C, K> {
    /// Page-space rectangle of a container.
    fn container_rect(&mut self, container: &C) -> Rect;

    /// Number of items currently in a container.
    fn item_count(&mut self, container: &C) -> usize;

    /// The item at `index` in the container's current order.
    fn item_at(&mut self, container: &C, index: usize) -> K;

    /// Page-space rectangle of one item.
    fn item_rect(&mut self, container: &C, item: &K) -> Rect;
}

/// A simple stacked-row layout, usable as a host-side model for vertical
/// or horizontal lists (and as the measurement source in tests and
/// examples).
///
/// Items keep their measured sizes; [`RowLayout::restack`] recomputes
/// their rectangles from the current order, the way document flow would
/// after a placeholder moves.
#[derive(Clone, Debug, Default)]
pub struct RowLayout<C, K> {
    containers: HashMap<C, Strip<K>>,
}

#[derive(Clone, Debug)]
struct Strip<K> {
    rect: Rect,
    horizontal: bool,
    items: Vec<(K, Rect)>,
}

impl<C, K> RowLayout<C, K>
where
    C: core::hash::Hash + Eq + Clone,
    K: PartialEq + Clone,
{
    /// Create an empty layout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            containers: HashMap::new(),
        }
    }

    /// Add or replace a vertical container covering `rect`.
    pub fn set_container(&mut self, container: C, rect: Rect) {
        self.containers.insert(
            container,
            Strip {
                rect,
                horizontal: false,
                items: Vec::new(),
            },
        );
    }

    /// Add or replace a horizontal container covering `rect`.
    pub fn set_container_horizontal(&mut self, container: C, rect: Rect) {
        self.containers.insert(
            container,
            Strip {
                rect,
                horizontal: true,
                items: Vec::new(),
            },
        );
    }

    /// Append an item with the given size and restack.
    pub fn push(&mut self, container: C, item: K, size: Size) {
        if let Some(strip) = self.containers.get_mut(&container) {
            strip.items.push((item, Rect::from_origin_size(Point::ZERO, size)));
        }
        self.restack(&container);
    }

    /// Insert an item at `index` with the given size and restack.
    pub fn insert(&mut self, container: &C, index: usize, item: K, size: Size) {
        if let Some(strip) = self.containers.get_mut(container) {
            let index = index.min(strip.items.len());
            strip
                .items
                .insert(index, (item, Rect::from_origin_size(Point::ZERO, size)));
        }
        self.restack(container);
    }

    /// Remove an item wherever it is, returning its size. Restacks the
    /// container it was removed from.
    pub fn remove(&mut self, item: &K) -> Option<Size> {
        let mut found: Option<(C, Size)> = None;
        for (c, strip) in &mut self.containers {
            if let Some(pos) = strip.items.iter().position(|(k, _)| k == item) {
                let (_, rect) = strip.items.remove(pos);
                found = Some((c.clone(), rect.size()));
                break;
            }
        }
        let (c, size) = found?;
        self.restack(&c);
        Some(size)
    }

    /// Current item order of a container.
    #[must_use]
    pub fn order(&self, container: &C) -> Vec<K> {
        self.containers
            .get(container)
            .map(|s| s.items.iter().map(|(k, _)| k.clone()).collect())
            .unwrap_or_default()
    }

    /// Index of an item within its container, if present.
    #[must_use]
    pub fn index_of(&self, container: &C, item: &K) -> Option<usize> {
        self.containers
            .get(container)?
            .items
            .iter()
            .position(|(k, _)| k == item)
    }

    /// Recompute item rectangles from the current order, stacking from
    /// the container's origin.
    pub fn restack(&mut self, container: &C) {
        let Some(strip) = self.containers.get_mut(container) else {
            return;
        };
        let mut cursor = Point::new(strip.rect.x0, strip.rect.y0);
        for (_, rect) in &mut strip.items {
            let size = rect.size();
            *rect = Rect::from_origin_size(cursor, size);
            if strip.horizontal {
                cursor.x += size.width;
            } else {
                cursor.y += size.height;
            }
        }
    }
}

impl<C, K> SlotLayout<C, K> for RowLayout<C, K>
where
    C: core::hash::Hash + Eq + Clone,
    K: PartialEq + Clone,
{
    fn container_rect(&mut self, container: &C) -> Rect {
        self.containers
            .get(container)
            .map(|s| s.rect)
            .unwrap_or(Rect::ZERO)
    }

    fn item_count(&mut self, container: &C) -> usize {
        self.containers.get(container).map_or(0, |s| s.items.len())
    }

    fn item_at(&mut self, container: &C, index: usize) -> K {
        self.containers[container].items[index].0.clone()
    }

    fn item_rect(&mut self, container: &C, item: &K) -> Rect {
        self.containers
            .get(container)
            .and_then(|s| s.items.iter().find(|(k, _)| k == item))
            .map(|(_, r)| *r)
            .unwrap_or(Rect::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_stacks_vertically() {
        let mut l: RowLayout<&str, u32> = RowLayout::new();
        l.set_container("a", Rect::new(10.0, 20.0, 110.0, 200.0));
        l.push("a", 1, Size::new(100.0, 30.0));
        l.push("a", 2, Size::new(100.0, 20.0));
        assert_eq!(l.item_rect(&"a", &1), Rect::new(10.0, 20.0, 110.0, 50.0));
        assert_eq!(l.item_rect(&"a", &2), Rect::new(10.0, 50.0, 110.0, 70.0));
    }

    #[test]
    fn horizontal_strips_stack_sideways() {
        let mut l: RowLayout<&str, u32> = RowLayout::new();
        l.set_container_horizontal("h", Rect::new(0.0, 0.0, 300.0, 40.0));
        l.push("h", 1, Size::new(50.0, 40.0));
        l.push("h", 2, Size::new(60.0, 40.0));
        assert_eq!(l.item_rect(&"h", &2), Rect::new(50.0, 0.0, 110.0, 40.0));
    }

    #[test]
    fn insert_and_remove_restack() {
        let mut l: RowLayout<&str, u32> = RowLayout::new();
        l.set_container("a", Rect::new(0.0, 0.0, 100.0, 300.0));
        l.push("a", 1, Size::new(100.0, 30.0));
        l.push("a", 3, Size::new(100.0, 30.0));
        l.insert(&"a", 1, 2, Size::new(100.0, 30.0));
        assert_eq!(l.order(&"a"), [1, 2, 3]);
        assert_eq!(l.item_rect(&"a", &3).y0, 60.0);

        let removed = l.remove(&2);
        assert_eq!(removed, Some(Size::new(100.0, 30.0)));
        assert_eq!(l.order(&"a"), [1, 3]);
        assert_eq!(l.item_rect(&"a", &3).y0, 30.0);
    }

    #[test]
    fn missing_containers_answer_empty() {
        let mut l: RowLayout<&str, u32> = RowLayout::new();
        assert_eq!(l.item_count(&"nope"), 0);
        assert_eq!(l.container_rect(&"nope"), Rect::ZERO);
        assert!(l.order(&"nope").is_empty());
    }
}
