// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Directional resize handles and their box patches.

use kurbo::Vec2;

/// A partial box mutation derived from a pointer delta.
///
/// Only the components a handle touches are nonzero; the rest of the box
/// stays put until the clamp pipeline runs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoxPatch {
    /// Left-edge delta.
    pub dx: f64,
    /// Top-edge delta.
    pub dy: f64,
    /// Width delta.
    pub dw: f64,
    /// Height delta.
    pub dh: f64,
}

impl BoxPatch {
    fn merge(self, other: Self) -> Self {
        Self {
            dx: self.dx + other.dx,
            dy: self.dy + other.dy,
            dw: self.dw + other.dw,
            dh: self.dh + other.dh,
        }
    }
}

/// The eight resize directions.
///
/// Cardinal handles move one edge; diagonal handles compose the two
/// adjacent cardinals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handle {
    /// Top edge.
    N,
    /// Bottom edge.
    S,
    /// Right edge.
    E,
    /// Left edge.
    W,
    /// Top-right corner.
    Ne,
    /// Top-left corner.
    Nw,
    /// Bottom-right corner.
    Se,
    /// Bottom-left corner.
    Sw,
}

impl Handle {
    /// All eight handles, for hosts enumerating grips.
    pub const ALL: [Self; 8] = [
        Self::N,
        Self::S,
        Self::E,
        Self::W,
        Self::Ne,
        Self::Nw,
        Self::Se,
        Self::Sw,
    ];

    /// Map a raw pointer delta to this handle's box patch.
    #[must_use]
    pub fn patch(self, delta: Vec2) -> BoxPatch {
        match self {
            Self::E => BoxPatch {
                dw: delta.x,
                ..BoxPatch::default()
            },
            Self::W => BoxPatch {
                dx: delta.x,
                dw: -delta.x,
                ..BoxPatch::default()
            },
            Self::S => BoxPatch {
                dh: delta.y,
                ..BoxPatch::default()
            },
            Self::N => BoxPatch {
                dy: delta.y,
                dh: -delta.y,
                ..BoxPatch::default()
            },
            Self::Se => Self::S.patch(delta).merge(Self::E.patch(delta)),
            Self::Sw => Self::S.patch(delta).merge(Self::W.patch(delta)),
            Self::Ne => Self::N.patch(delta).merge(Self::E.patch(delta)),
            Self::Nw => Self::N.patch(delta).merge(Self::W.patch(delta)),
        }
    }

    /// Whether this handle moves the left edge, so the right edge must be
    /// re-anchored after size clamping.
    #[must_use]
    pub fn moves_left_edge(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    /// Whether this handle moves the top edge, so the bottom edge must be
    /// re-anchored after size clamping.
    #[must_use]
    pub fn moves_top_edge(self) -> bool {
        matches!(self, Self::N | Self::Nw | Self::Ne)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn east_grows_width_only() {
        let p = Handle::E.patch(Vec2::new(12.0, 99.0));
        assert_eq!(
            p,
            BoxPatch {
                dw: 12.0,
                ..BoxPatch::default()
            }
        );
    }

    #[test]
    fn west_moves_left_and_shrinks() {
        let p = Handle::W.patch(Vec2::new(10.0, 0.0));
        assert_eq!(p.dx, 10.0);
        assert_eq!(p.dw, -10.0);
        assert_eq!(p.dy, 0.0);
        assert_eq!(p.dh, 0.0);
    }

    #[test]
    fn north_moves_top_and_shrinks() {
        let p = Handle::N.patch(Vec2::new(0.0, -8.0));
        assert_eq!(p.dy, -8.0);
        assert_eq!(p.dh, 8.0);
    }

    #[test]
    fn diagonals_compose_adjacent_edges() {
        let d = Vec2::new(4.0, 6.0);
        assert_eq!(
            Handle::Nw.patch(d),
            Handle::N.patch(d).merge(Handle::W.patch(d))
        );
        assert_eq!(
            Handle::Se.patch(d),
            BoxPatch {
                dw: 4.0,
                dh: 6.0,
                ..BoxPatch::default()
            }
        );
    }

    #[test]
    fn leading_edge_classification() {
        assert!(Handle::W.moves_left_edge());
        assert!(Handle::Nw.moves_left_edge());
        assert!(Handle::Sw.moves_left_edge());
        assert!(!Handle::E.moves_left_edge());
        assert!(Handle::N.moves_top_edge());
        assert!(Handle::Ne.moves_top_edge());
        assert!(!Handle::S.moves_top_edge());
        assert!(!Handle::Se.moves_top_edge());
    }

    #[test]
    fn every_handle_touches_something() {
        let d = Vec2::new(3.0, 5.0);
        for h in Handle::ALL {
            assert_ne!(h.patch(d), BoxPatch::default(), "{h:?} produced no patch");
        }
    }
}
