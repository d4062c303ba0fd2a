// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-phase geometry snapshots supplied by the host.

use kurbo::{Point, Size, Vec2};

/// Positioning scheme of the moving element.
///
/// Determines how page coordinates map to the values written to the
/// element's `top`/`left`, and whether ancestor scrolling participates in
/// the transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Positioning {
    /// Normal flow; positions are offsets from the flow location.
    Static,
    /// Offset from the element's own flow location.
    Relative,
    /// Positioned against the offset parent's padding box.
    Absolute,
    /// Positioned against the viewport; page scroll does not apply.
    Fixed,
}

/// Scroll offsets of the nearest scrollable ancestor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollState {
    /// Current scroll offsets of that ancestor.
    pub offset: Vec2,
    /// Whether the ancestor is the document root. Root scroll is already
    /// part of page coordinates and must not be folded in a second time.
    pub root: bool,
}

impl ScrollState {
    /// Scroll state for an element whose scrollable ancestor is the
    /// document root.
    #[must_use]
    pub fn root(offset: Vec2) -> Self {
        Self { offset, root: true }
    }

    /// Scroll state for a non-root scrollable ancestor.
    #[must_use]
    pub fn ancestor(offset: Vec2) -> Self {
        Self {
            offset,
            root: false,
        }
    }
}

/// Geometry snapshot of the element about to move, read by the host in
/// one pass at press time.
///
/// Trellis never touches a layout tree: hosts measure, Trellis computes.
/// Every field is in page space except `local_position`, which holds the
/// element's current `top`/`left` values in its positioning scheme
/// (`(0, 0)` for static/auto elements).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementMetrics {
    /// Page-space position of the element's border box.
    pub page_origin: Point,
    /// Current `top`/`left` values in position space.
    pub local_position: Point,
    /// Page-space position of the offset parent's border box.
    pub parent_origin: Point,
    /// Offset parent border widths (left, top) — the origin of absolute
    /// positioning sits inside the border.
    pub parent_border: Vec2,
    /// Positioning scheme of the element.
    pub positioning: Positioning,
    /// Nearest scrollable ancestor's scroll state.
    pub scroll: ScrollState,
    /// Border-box size of the element.
    pub size: Size,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_and_ancestor_constructors() {
        let r = ScrollState::root(Vec2::new(0.0, 120.0));
        assert!(r.root);
        let a = ScrollState::ancestor(Vec2::new(0.0, 120.0));
        assert!(!a.root);
        assert_eq!(r.offset, a.offset);
    }
}
