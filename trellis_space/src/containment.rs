// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Containment boxes: the rectangle a moving element is clamped to.

use kurbo::{Insets, Point, Rect, Size, Vec2};

/// Box metrics of a containing element, read by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerMetrics {
    /// Page-space position of the container's border box.
    pub page_origin: Point,
    /// Border widths.
    pub border: Insets,
    /// Padding widths.
    pub padding: Insets,
    /// Border-box size.
    pub offset_size: Size,
    /// Scrollable content size.
    pub scroll_size: Size,
    /// Whether overflowing content is visible (not clipped/scrolled).
    pub overflow_visible: bool,
}

impl ContainerMetrics {
    // Usable interior in page space: inside border and padding, extended
    // to the scroll extent when overflow is visible.
    fn interior(&self) -> Rect {
        let extent = if self.overflow_visible {
            Size::new(
                self.scroll_size.width.max(self.offset_size.width),
                self.scroll_size.height.max(self.offset_size.height),
            )
        } else {
            self.offset_size
        };
        Rect::new(
            self.page_origin.x + self.border.x0 + self.padding.x0,
            self.page_origin.y + self.border.y0 + self.padding.y0,
            self.page_origin.x + extent.width - self.border.x1 - self.padding.x1,
            self.page_origin.y + extent.height - self.border.y1 - self.padding.y1,
        )
    }
}

/// What to contain a moving element within.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContainSpec {
    /// The element's offset parent, described by
    /// [`ContainmentInput::parent`].
    Parent,
    /// The whole document.
    Document,
    /// The visible viewport.
    Window,
    /// An arbitrary container element.
    Element(ContainerMetrics),
    /// An explicit page-space rectangle.
    Rect(Rect),
}

/// Everything needed to resolve a [`ContainSpec`] into a [`ContainBox`],
/// read by the host in the same pass as the element metrics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainmentInput {
    /// Border-box size of the moving element.
    pub element_size: Size,
    /// Margins of the moving element; they consume containment room.
    pub element_margin: Insets,
    /// Total document size.
    pub document_size: Size,
    /// Visible viewport in page coordinates.
    pub window_rect: Rect,
    /// The offset parent's metrics, required for [`ContainSpec::Parent`].
    pub parent: Option<ContainerMetrics>,
}

/// The axis-aligned range the element's *position* may take.
///
/// Min and max describe allowed values for the element's top-left corner,
/// in the same coordinate space the positions are generated in. The box is
/// computed at start and re-applied on every move; callers re-resolve it
/// when the container itself scrolls or resizes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainBox {
    /// Smallest allowed position.
    pub min: Point,
    /// Largest allowed position.
    pub max: Point,
}

impl ContainBox {
    /// Build a box from its corners.
    #[must_use]
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Resolve a containment spec against measured geometry.
    ///
    /// Returns `None` when the spec needs a parent and none was supplied.
    /// The resulting box is in page space; convert it with
    /// [`ContainBox::offset`] if positions are generated in another
    /// (translated) space.
    #[must_use]
    pub fn resolve(spec: &ContainSpec, input: &ContainmentInput) -> Option<Self> {
        let area = Self::resolve_area(spec, input)?;
        Some(Self::fit(area, input.element_size, input.element_margin))
    }

    /// Resolve a containment spec to the raw page-space area, without
    /// fitting an element into it. Resizing clamps a growing box against
    /// this area directly.
    #[must_use]
    pub fn resolve_area(spec: &ContainSpec, input: &ContainmentInput) -> Option<Rect> {
        Some(match spec {
            ContainSpec::Parent => input.parent?.interior(),
            ContainSpec::Element(m) => m.interior(),
            ContainSpec::Document => Rect::from_origin_size(Point::ZERO, input.document_size),
            ContainSpec::Window => input.window_rect,
            ContainSpec::Rect(r) => *r,
        })
    }

    // Shrink an area to the positions the element's top-left may take:
    // margins inset the area, and the far corner retreats by the element
    // size so the whole box stays inside.
    fn fit(area: Rect, element: Size, margin: Insets) -> Self {
        Self {
            min: Point::new(area.x0 + margin.x0, area.y0 + margin.y0),
            max: Point::new(
                area.x1 - element.width - margin.x1,
                area.y1 - element.height - margin.y1,
            ),
        }
    }

    /// Translate the box into another coordinate space.
    #[must_use]
    pub fn offset(&self, by: Vec2) -> Self {
        Self {
            min: self.min + by,
            max: self.max + by,
        }
    }

    /// Componentwise clamp of a candidate position.
    ///
    /// When the container is smaller than the element the range is empty;
    /// the min bound wins, pinning the element to the near edge.
    #[must_use]
    pub fn clamp(&self, pos: Point) -> Point {
        Point::new(
            pos.x.min(self.max.x).max(self.min.x),
            pos.y.min(self.max.y).max(self.min.y),
        )
    }

    /// Whether a position lies within the box.
    #[must_use]
    pub fn contains(&self, pos: Point) -> bool {
        pos.x >= self.min.x && pos.x <= self.max.x && pos.y >= self.min.y && pos.y <= self.max.y
    }
}
