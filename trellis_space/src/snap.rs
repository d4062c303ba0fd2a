// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid snapping of travel deltas.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Vec2;

/// Per-axis grid step for snapped movement.
///
/// Snapping operates on the *delta from the press origin*, not on the
/// absolute position, so an element that starts off-grid stays aligned to
/// its own start point. A non-positive step disables snapping on that
/// axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSnap {
    /// Step sizes for the x and y axes.
    pub step: Vec2,
}

impl GridSnap {
    /// Create a snap with the given per-axis steps.
    #[must_use]
    pub fn new(step: Vec2) -> Self {
        Self { step }
    }

    /// Round a travel delta to the nearest step multiples.
    #[must_use]
    pub fn round_delta(&self, delta: Vec2) -> Vec2 {
        Vec2::new(
            round_axis(delta.x, self.step.x),
            round_axis(delta.y, self.step.y),
        )
    }
}

fn round_axis(delta: f64, step: f64) -> f64 {
    if step > 0.0 {
        (delta / step).round() * step
    } else {
        delta
    }
}
