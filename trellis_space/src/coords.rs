// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The page ↔ position-space transform for one interaction.

use kurbo::{Point, Vec2};

use crate::containment::ContainBox;
use crate::metrics::{ElementMetrics, Positioning, ScrollState};
use crate::snap::GridSnap;

/// The offsets computed at press time, exposed for collaborators that
/// need to reason about the transform (for example, pointer-mode slot
/// matching uses the click offset).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Offsets {
    /// Element page origin at press.
    pub element: Point,
    /// Offset-parent position, border-adjusted, in page space.
    pub parent: Point,
    /// Correction term for relatively positioned elements.
    pub relative: Vec2,
    /// Pointer position relative to the element's top-left at press.
    pub click: Vec2,
}

/// Invertible transform between page coordinates and the coordinate
/// system the element's positioning scheme requires.
///
/// Built once at press from an [`ElementMetrics`] snapshot. The relative
/// correction term is derived so that the element's own page origin maps
/// exactly onto its current `top`/`left` values — whatever margins or
/// static offsets contribute to the difference are folded in once and
/// reused for the whole session.
#[derive(Clone, Copy, Debug)]
pub struct CoordinateSpace {
    positioning: Positioning,
    parent_offset: Point,
    relative: Vec2,
    scroll: ScrollState,
    click: Vec2,
    origin_local: Point,
    origin_page: Point,
}

impl CoordinateSpace {
    /// Build the transform for a press at `pointer`.
    #[must_use]
    pub fn at_press(metrics: &ElementMetrics, pointer: Point) -> Self {
        let parent_offset = metrics.parent_origin + metrics.parent_border;
        let mut space = Self {
            positioning: metrics.positioning,
            parent_offset,
            relative: Vec2::ZERO,
            scroll: metrics.scroll,
            click: pointer - metrics.page_origin,
            origin_local: metrics.local_position,
            origin_page: metrics.page_origin,
        };
        // Solve the transform for the one pair we know: the element's page
        // origin must map to its current local position.
        let uncorrected = space.to_relative(metrics.page_origin);
        space.relative = uncorrected - metrics.local_position;
        space
    }

    /// The offsets captured at press.
    #[must_use]
    pub fn offsets(&self) -> Offsets {
        Offsets {
            element: self.origin_page,
            parent: self.parent_offset,
            relative: self.relative,
            click: self.click,
        }
    }

    /// Pointer position relative to the element's top-left at press.
    #[must_use]
    pub fn click_offset(&self) -> Vec2 {
        self.click
    }

    /// The element's position-space location at press.
    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin_local
    }

    /// Whether the transform reads ancestor scroll on every move.
    ///
    /// True for relatively positioned elements inside a non-root
    /// scrollable ancestor; everything else is stable for the session.
    #[must_use]
    pub fn tracks_scroll(&self) -> bool {
        matches!(
            self.positioning,
            Positioning::Relative | Positioning::Static
        ) && !self.scroll.root
    }

    /// Fold in fresh ancestor scroll offsets mid-session.
    pub fn refresh_scroll(&mut self, scroll: ScrollState) {
        self.scroll = scroll;
    }

    // The scroll contribution to page → position space.
    //
    // Root scroll is already part of page coordinates (no second
    // subtraction); fixed elements sit in viewport coordinates, so page
    // scroll is removed outright.
    fn scroll_term(&self) -> Vec2 {
        match self.positioning {
            Positioning::Fixed => -self.scroll.offset,
            _ => {
                if self.scroll.root {
                    Vec2::ZERO
                } else {
                    self.scroll.offset
                }
            }
        }
    }

    /// Convert a position-space value to page coordinates.
    #[must_use]
    pub fn to_absolute(&self, pos: Point) -> Point {
        pos + (self.parent_offset.to_vec2() + self.relative - self.scroll_term())
    }

    /// Convert page coordinates to position space. Inverse of
    /// [`CoordinateSpace::to_absolute`].
    #[must_use]
    pub fn to_relative(&self, page: Point) -> Point {
        page - (self.parent_offset.to_vec2() + self.relative - self.scroll_term())
    }

    /// Compute the element's candidate position for a pointer location.
    ///
    /// Applies, in order: the click-offset transform, containment
    /// clamping, grid snapping of the delta from the press origin, and a
    /// final re-clamp so snapping never escapes the containment box.
    #[must_use]
    pub fn generate_position(
        &self,
        pointer: Point,
        containment: Option<&ContainBox>,
        snap: Option<GridSnap>,
    ) -> Point {
        let page = pointer - self.click;
        let mut pos = self.to_relative(page);
        if let Some(c) = containment {
            pos = c.clamp(pos);
        }
        if let Some(g) = snap {
            pos = self.origin_local + g.round_delta(pos - self.origin_local);
            if let Some(c) = containment {
                pos = c.clamp(pos);
            }
        }
        pos
    }
}
