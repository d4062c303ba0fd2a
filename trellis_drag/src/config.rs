// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable per-session drag configuration.

use kurbo::Vec2;
use trellis_space::{ContainSpec, GridSnap};

/// Which axes the element may move along.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Axis {
    /// Free movement.
    #[default]
    Both,
    /// Horizontal only; the vertical position stays at its original value.
    X,
    /// Vertical only; the horizontal position stays at its original value.
    Y,
}

/// When the element returns to its original position at release.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Revert {
    /// Commit wherever the drag ends.
    #[default]
    Never,
    /// Always return to the original position.
    Always,
    /// Return when no drop target accepted the item.
    OnInvalidDrop,
    /// Return when a drop target did accept the item.
    OnValidDrop,
}

/// What node moves on screen during the drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HelperMode<K> {
    /// The element itself moves.
    Original,
    /// A host-created stand-in moves; the key names the clone/ghost node.
    /// It is removed at finalization.
    Clone(K),
}

/// Configuration resolved once when a drag session starts.
///
/// There is no way to mutate a running session's options; runtime
/// overrides are explicit parameters to the operations that accept them.
#[derive(Clone, Copy, Debug)]
pub struct DragConfig<K> {
    /// Refuse all presses while set.
    pub disabled: bool,
    /// Axis constraint applied after the coordinate transform.
    pub axis: Axis,
    /// Optional containment for generated positions.
    pub containment: Option<ContainSpec>,
    /// Optional grid snapping of the travel delta.
    pub grid: Option<GridSnap>,
    /// Revert policy consumed at release.
    pub revert: Revert,
    /// What moves on screen.
    pub helper: HelperMode<K>,
}

impl<K> Default for DragConfig<K> {
    fn default() -> Self {
        Self {
            disabled: false,
            axis: Axis::Both,
            containment: None,
            grid: None,
            revert: Revert::Never,
            helper: HelperMode::Original,
        }
    }
}

impl<K> DragConfig<K> {
    /// Constrain movement to one axis.
    #[must_use]
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Contain generated positions.
    #[must_use]
    pub fn with_containment(mut self, spec: ContainSpec) -> Self {
        self.containment = Some(spec);
        self
    }

    /// Snap the travel delta to a grid.
    #[must_use]
    pub fn with_grid(mut self, step: Vec2) -> Self {
        self.grid = Some(GridSnap::new(step));
        self
    }

    /// Set the revert policy.
    #[must_use]
    pub fn with_revert(mut self, revert: Revert) -> Self {
        self.revert = revert;
        self
    }

    /// Drag a host-created helper instead of the element itself.
    #[must_use]
    pub fn with_clone_helper(mut self, helper: K) -> Self {
        self.helper = HelperMode::Clone(helper);
        self
    }
}
