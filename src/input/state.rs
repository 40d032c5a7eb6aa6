// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Input modes for editing annotations on the time axis.
//!
//! ## Transitions
//!
//! ```text
//! Viewing -> Selecting   (primary down on empty time)
//! Viewing -> Resizing    (primary down within the border offset of an edge)
//! Viewing -> Dragging    (primary down strictly inside an annotation)
//!
//! Selecting/Dragging/Resizing -> Viewing   (primary up)
//! ```
//!
//! Every non-viewing mode carries [`Limits`] so the pointer coordinate is
//! clamped before it is turned into new bounds. Limits are stored already
//! shifted by the grab offset, so the clamped value is the pointer position
//! and not the edge position.

use crate::models::annotation::AnnotationId;

/// Which edge of an annotation is being resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
}

/// Optional left and right clamp values. `None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Limits {
    pub left: Option<f64>,
    pub right: Option<f64>,
}

impl Limits {
    pub fn new(left: Option<f64>, right: Option<f64>) -> Self {
        Self { left, right }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Clamp `x` into the limits. The left limit is checked first.
    pub fn clamp(&self, x: f64) -> f64 {
        match (self.left, self.right) {
            (Some(l), _) if x < l => l,
            (_, Some(r)) if x > r => r,
            _ => x,
        }
    }
}

/// The active input mode.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputMode {
    /// Waiting for the user to start a gesture
    #[default]
    Viewing,

    /// Selecting a new time range
    Selecting {
        /// Time where the selection started
        anchor: f64,
        limits: Limits,
    },

    /// Moving an annotation without changing its width
    Dragging {
        id: AnnotationId,
        width: f64,
        /// Pointer position minus the original left edge
        offset: f64,
        limits: Limits,
    },

    /// Moving one edge of an annotation
    Resizing {
        id: AnnotationId,
        edge: Edge,
        /// Pointer position minus the original position of the moving edge
        offset: f64,
        /// Position of the edge that stays put
        other: f64,
        limits: Limits,
    },
}

impl InputMode {
    pub fn selecting(anchor: f64, left: Option<f64>, right: Option<f64>) -> Self {
        InputMode::Selecting {
            anchor,
            limits: Limits::new(left, right),
        }
    }

    /// Drag mode for an annotation grabbed `offset` right of its left edge.
    ///
    /// `left` is the end of the left neighbor, `right` the start of the right
    /// neighbor. They are shifted so the annotation's edges stop at them.
    pub fn dragging(
        id: AnnotationId,
        width: f64,
        offset: f64,
        left: Option<f64>,
        right: Option<f64>,
    ) -> Self {
        InputMode::Dragging {
            id,
            width,
            offset,
            limits: Limits::new(
                left.map(|l| l + offset),
                right.map(|r| r - width + offset),
            ),
        }
    }

    /// Resize mode for one edge. `limit` is the neighbor bound on the moving
    /// side; the fixed edge `other` bounds the other side so the annotation
    /// cannot invert.
    pub fn resizing(
        id: AnnotationId,
        edge: Edge,
        offset: f64,
        other: f64,
        limit: Option<f64>,
    ) -> Self {
        let limits = match edge {
            Edge::Right => Limits::new(Some(other + offset), limit.map(|l| l + offset)),
            Edge::Left => Limits::new(limit.map(|l| l + offset), Some(other + offset)),
        };
        InputMode::Resizing {
            id,
            edge,
            offset,
            other,
            limits,
        }
    }

    pub fn is_viewing(&self) -> bool {
        matches!(self, InputMode::Viewing)
    }

    pub fn name(&self) -> &'static str {
        match self {
            InputMode::Viewing => "viewing",
            InputMode::Selecting { .. } => "selecting",
            InputMode::Dragging { .. } => "dragging",
            InputMode::Resizing { .. } => "resizing",
        }
    }

    /// The annotation being edited, if any.
    pub fn target(&self) -> Option<AnnotationId> {
        match self {
            InputMode::Dragging { id, .. } | InputMode::Resizing { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// Ordered `(start, end)` implied by a pointer at `x`, after clamping.
    ///
    /// `None` while viewing.
    pub fn bounds_at(&self, x: f64) -> Option<(f64, f64)> {
        match *self {
            InputMode::Viewing => None,
            InputMode::Selecting { anchor, limits } => {
                let x = limits.clamp(x);
                Some(if x < anchor { (x, anchor) } else { (anchor, x) })
            }
            InputMode::Dragging {
                width,
                offset,
                limits,
                ..
            } => {
                let left = limits.clamp(x) - offset;
                Some((left, left + width))
            }
            InputMode::Resizing {
                edge,
                offset,
                other,
                limits,
                ..
            } => {
                let moved = limits.clamp(x) - offset;
                Some(match edge {
                    Edge::Right => (other, moved),
                    Edge::Left => (moved, other),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        let limits = Limits::new(Some(0.0), Some(10.0));
        assert_eq!(limits.clamp(-5.0), 0.0);
        assert_eq!(limits.clamp(5.0), 5.0);
        assert_eq!(limits.clamp(15.0), 10.0);

        assert_eq!(Limits::unbounded().clamp(-1e9), -1e9);
        assert_eq!(Limits::new(None, Some(3.0)).clamp(-100.0), -100.0);
        assert_eq!(Limits::new(Some(3.0), None).clamp(100.0), 100.0);
    }

    #[test]
    fn test_selecting_orders_bounds() {
        let mode = InputMode::selecting(50.0, Some(10.0), Some(90.0));
        assert_eq!(mode.bounds_at(70.0), Some((50.0, 70.0)));
        assert_eq!(mode.bounds_at(30.0), Some((30.0, 50.0)));
        assert_eq!(mode.bounds_at(200.0), Some((50.0, 90.0)));
        assert_eq!(mode.bounds_at(-200.0), Some((10.0, 50.0)));
    }

    #[test]
    fn test_dragging_stops_edges_at_neighbors() {
        // A = [0, 10] grabbed at 5, neighbors end at -20 and start at 20.
        let mode = InputMode::dragging(AnnotationId(0), 10.0, 5.0, Some(-20.0), Some(20.0));
        assert_eq!(mode.bounds_at(8.0), Some((3.0, 13.0)));
        assert_eq!(mode.bounds_at(100.0), Some((10.0, 20.0)));
        assert_eq!(mode.bounds_at(-100.0), Some((-20.0, -10.0)));
    }

    #[test]
    fn test_resizing_right_edge_unbounded() {
        // A = [0, 10] grabbed at 9.5 on its right edge.
        let mode = InputMode::resizing(AnnotationId(0), Edge::Right, -0.5, 0.0, None);
        assert_eq!(mode.bounds_at(1000.0), Some((0.0, 1000.5)));
        // Cannot pass the fixed left edge.
        assert_eq!(mode.bounds_at(-50.0), Some((0.0, 0.0)));
    }

    #[test]
    fn test_resizing_left_edge_limited() {
        // A = [100, 200] grabbed at 102, left neighbor ends at 80.
        let mode = InputMode::resizing(AnnotationId(1), Edge::Left, 2.0, 200.0, Some(80.0));
        assert_eq!(mode.bounds_at(50.0), Some((80.0, 200.0)));
        assert_eq!(mode.bounds_at(152.0), Some((150.0, 200.0)));
        assert_eq!(mode.bounds_at(500.0), Some((200.0, 200.0)));
    }

    #[test]
    fn test_viewing_has_no_bounds() {
        assert_eq!(InputMode::Viewing.bounds_at(1.0), None);
        assert!(InputMode::default().is_viewing());
        assert_eq!(InputMode::Viewing.target(), None);
    }
}
