// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Intersection modes, travel direction, and side selection.

use kurbo::{Point, Rect};

use crate::engine::Orientation;

/// How a dragged item is matched against candidate slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Intersect {
    /// The pointer location itself must fall within the slot. Precise,
    /// and independent of the helper's extent.
    Pointer,
    /// The helper's midpoint must fall within the slot, per axis. On an
    /// axis where the helper is larger than the slot, the pointer is used
    /// instead — a large helper would otherwise match thin strips it
    /// merely grazes.
    #[default]
    Overlap,
}

/// Sign of pointer travel along one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisDir {
    /// Toward smaller coordinates (up / left).
    Negative,
    /// Toward larger coordinates (down / right).
    Positive,
}

/// Pointer travel direction, tracked per axis since the previous move.
///
/// A zero delta keeps the previous direction, so brief pauses do not
/// erase intent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Travel {
    /// Horizontal direction, if any travel has happened.
    pub x: Option<AxisDir>,
    /// Vertical direction, if any travel has happened.
    pub y: Option<AxisDir>,
}

impl Travel {
    /// Fold one move's delta into the tracked direction.
    pub fn advance(&mut self, from: Point, to: Point) {
        if to.x > from.x {
            self.x = Some(AxisDir::Positive);
        } else if to.x < from.x {
            self.x = Some(AxisDir::Negative);
        }
        if to.y > from.y {
            self.y = Some(AxisDir::Positive);
        } else if to.y < from.y {
            self.y = Some(AxisDir::Negative);
        }
    }

    /// The direction along a container's primary axis.
    #[must_use]
    pub fn along(&self, orientation: Orientation) -> Option<AxisDir> {
        match orientation {
            Orientation::Vertical => self.y,
            Orientation::Horizontal => self.x,
        }
    }
}

/// Where the placeholder lands relative to a matched slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsertSide {
    /// Immediately before the matched slot.
    Before,
    /// Immediately after the matched slot.
    After,
}

/// Per-move matching input: the pointer, the helper's page-space box, and
/// the intersection mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Probe {
    /// Page-space pointer position (the click-offset point).
    pub pointer: Point,
    /// Page-space rectangle of the moving helper.
    pub helper_rect: Rect,
    /// Intersection mode to match with.
    pub mode: Intersect,
}

/// A matched slot plus the side the placeholder should take.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotMatch<K> {
    /// The matched slot's item.
    pub item: K,
    /// Index of the matched slot within its container's sequence.
    pub index: usize,
    /// Which side of the matched slot to insert on.
    pub side: InsertSide,
}

/// Whether the probe matches a slot rectangle under the given mode.
pub(crate) fn slot_hit(probe: &Probe, slot: Rect) -> bool {
    match probe.mode {
        Intersect::Pointer => contains(slot, probe.pointer),
        Intersect::Overlap => {
            let center = probe.helper_rect.center();
            let x = if probe.helper_rect.width() > slot.width() {
                probe.pointer.x
            } else {
                center.x
            };
            let y = if probe.helper_rect.height() > slot.height() {
                probe.pointer.y
            } else {
                center.y
            };
            contains(slot, Point::new(x, y))
        }
    }
}

// Rect::contains is exclusive of the max edges; slot matching wants the
// shared boundary between adjacent slots to belong to both.
fn contains(r: Rect, p: Point) -> bool {
    p.x >= r.x0 && p.x <= r.x1 && p.y >= r.y0 && p.y <= r.y1
}

/// Which side of a matched slot the placeholder should take.
///
/// Past the slot's midpoint along the primary axis means `After`; short
/// of it means `Before`; dead on the midpoint defers to the travel
/// direction.
pub(crate) fn insert_side(
    probe: &Probe,
    slot: Rect,
    orientation: Orientation,
    travel: Travel,
) -> InsertSide {
    let (p, mid) = match orientation {
        Orientation::Vertical => (probe.pointer.y, slot.center().y),
        Orientation::Horizontal => (probe.pointer.x, slot.center().x),
    };
    if p > mid {
        InsertSide::After
    } else if p < mid {
        InsertSide::Before
    } else {
        match travel.along(orientation) {
            Some(AxisDir::Positive) => InsertSide::After,
            _ => InsertSide::Before,
        }
    }
}

// Squared distance from the pointer to a slot center, for tie-breaking
// between multiple matching slots.
pub(crate) fn center_distance_sq(probe: &Probe, slot: Rect) -> f64 {
    let c = slot.center();
    let dx = probe.pointer.x - c.x;
    let dy = probe.pointer.y - c.y;
    dx * dx + dy * dy
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe(pointer: Point, helper: Rect) -> Probe {
        Probe {
            pointer,
            helper_rect: helper,
            mode: Intersect::Overlap,
        }
    }

    #[test]
    fn pointer_mode_uses_the_pointer_only() {
        let slot = Rect::new(0.0, 0.0, 100.0, 30.0);
        // Helper far away, pointer inside.
        let p = Probe {
            pointer: Point::new(50.0, 10.0),
            helper_rect: Rect::new(500.0, 500.0, 600.0, 530.0),
            mode: Intersect::Pointer,
        };
        assert!(slot_hit(&p, slot));
        // Pointer outside, helper overlapping.
        let p = Probe {
            pointer: Point::new(200.0, 10.0),
            helper_rect: Rect::new(10.0, 5.0, 90.0, 25.0),
            mode: Intersect::Pointer,
        };
        assert!(!slot_hit(&p, slot));
    }

    #[test]
    fn overlap_mode_tests_helper_midpoint() {
        let slot = Rect::new(0.0, 30.0, 100.0, 60.0);
        // Helper center at y = 50: inside.
        let p = probe(Point::new(50.0, 40.0), Rect::new(0.0, 35.0, 100.0, 65.0));
        assert!(slot_hit(&p, slot));
        // Helper center at y = 75: outside even though edges overlap.
        let p = probe(Point::new(50.0, 70.0), Rect::new(0.0, 60.0, 100.0, 90.0));
        assert!(!slot_hit(&p, slot));
    }

    #[test]
    fn oversized_helper_falls_back_to_pointer_per_axis() {
        // The slot is a thin strip; the helper is three times its height,
        // so its center sits outside while it covers the strip entirely.
        let slot = Rect::new(0.0, 30.0, 100.0, 40.0);
        let helper = Rect::new(0.0, 0.0, 100.0, 90.0);
        // Pointer inside the strip: match.
        assert!(slot_hit(&probe(Point::new(50.0, 35.0), helper), slot));
        // Pointer outside the strip: no match, despite full coverage.
        assert!(!slot_hit(&probe(Point::new(50.0, 80.0), helper), slot));
    }

    #[test]
    fn travel_tracks_sign_and_is_sticky() {
        let mut t = Travel::default();
        t.advance(Point::new(0.0, 0.0), Point::new(5.0, 10.0));
        assert_eq!(t.x, Some(AxisDir::Positive));
        assert_eq!(t.y, Some(AxisDir::Positive));
        // No vertical change: the vertical direction persists.
        t.advance(Point::new(5.0, 10.0), Point::new(3.0, 10.0));
        assert_eq!(t.x, Some(AxisDir::Negative));
        assert_eq!(t.y, Some(AxisDir::Positive));
    }

    #[test]
    fn side_follows_the_midpoint() {
        let slot = Rect::new(0.0, 30.0, 100.0, 60.0);
        let helper = Rect::new(0.0, 0.0, 10.0, 10.0);
        let below = probe(Point::new(50.0, 50.0), helper);
        let above = probe(Point::new(50.0, 40.0), helper);
        assert_eq!(
            insert_side(&below, slot, Orientation::Vertical, Travel::default()),
            InsertSide::After
        );
        assert_eq!(
            insert_side(&above, slot, Orientation::Vertical, Travel::default()),
            InsertSide::Before
        );
    }

    #[test]
    fn midpoint_tie_defers_to_travel() {
        let slot = Rect::new(0.0, 30.0, 100.0, 60.0);
        let helper = Rect::new(0.0, 0.0, 10.0, 10.0);
        let dead_on = probe(Point::new(50.0, 45.0), helper);
        let mut down = Travel::default();
        down.advance(Point::new(0.0, 0.0), Point::new(0.0, 1.0));
        let mut up = Travel::default();
        up.advance(Point::new(0.0, 1.0), Point::new(0.0, 0.0));
        assert_eq!(
            insert_side(&dead_on, slot, Orientation::Vertical, down),
            InsertSide::After
        );
        assert_eq!(
            insert_side(&dead_on, slot, Orientation::Vertical, up),
            InsertSide::Before
        );
    }

    #[test]
    fn horizontal_orientation_uses_x() {
        let slot = Rect::new(30.0, 0.0, 60.0, 100.0);
        let helper = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = probe(Point::new(50.0, 10.0), helper);
        assert_eq!(
            insert_side(&right, slot, Orientation::Horizontal, Travel::default()),
            InsertSide::After
        );
    }
}
