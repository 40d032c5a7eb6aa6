// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Zoom levels and the scrollable time span shared by all displays.

/// One zoom level: a label and the visible window in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub label: &'static str,
    pub window: f64,
}

/// Zoom levels from widest to narrowest.
pub const SCALES: [Scale; 4] = [
    Scale {
        label: "Hour",
        window: 3600.0,
    },
    Scale {
        label: "Half-hour",
        window: 1800.0,
    },
    Scale {
        label: "10-Minute",
        window: 600.0,
    },
    Scale {
        label: "Minute",
        window: 60.0,
    },
];

/// Current zoom level and the left edge of the visible window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScalePolicy {
    current: usize,
    position: Option<f64>,
}

impl ScalePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scale(&self) -> Scale {
        SCALES[self.current]
    }

    pub fn window(&self) -> f64 {
        self.scale().window
    }

    /// Scroll step, a hundredth of the window.
    pub fn step(&self) -> f64 {
        self.window() / 100.0
    }

    /// Visible `(start, end)`, unknown until a position has been set.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.position.map(|pos| (pos, pos + self.window()))
    }

    pub fn set_position(&mut self, position: f64) {
        self.position = Some(position);
    }

    /// Set the position to `min` only if none has been set yet.
    pub fn anchor_min(&mut self, min: f64) {
        if self.position.is_none() {
            self.position = Some(min);
        }
    }

    /// Narrow the window. Returns false at the narrowest level.
    pub fn zoom_in(&mut self) -> bool {
        if self.current + 1 < SCALES.len() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Widen the window. Returns false at the widest level.
    pub fn zoom_out(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }
}

/// Overall time span covered by the sources and annotations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub min: f64,
    pub max: f64,
}

impl Viewport {
    /// Union of all source time bounds and the annotation bounds.
    pub fn recalculate(
        source_bounds: impl IntoIterator<Item = (f64, f64)>,
        annotation_bounds: Option<(f64, f64)>,
    ) -> Option<Self> {
        source_bounds
            .into_iter()
            .chain(annotation_bounds)
            .fold(None, |acc: Option<Self>, (lo, hi)| {
                Some(match acc {
                    None => Self { min: lo, max: hi },
                    Some(v) => Self {
                        min: v.min.min(lo),
                        max: v.max.max(hi),
                    },
                })
            })
    }

    /// Range of window start positions, `None` if the window shows everything.
    pub fn scroll_range(&self, window: f64) -> Option<(f64, f64)> {
        let last = self.max - window;
        (self.min < last).then_some((self.min, last))
    }
}
