// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Time-axis utility functions.
//!
//! This module provides conversions between pixel positions on a plotted
//! source and time-axis values, and derives the time tolerance used to
//! decide whether a click grabs an annotation edge.

/// The visible time span of a display and its width in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAxis {
    pub start: f64,
    pub end: f64,
    pub width_px: f64,
}

impl TimeAxis {
    pub fn new(start: f64, end: f64, width_px: f64) -> Self {
        Self {
            start,
            end,
            width_px,
        }
    }

    /// Seconds covered by one pixel. Zero for a collapsed axis.
    pub fn seconds_per_pixel(&self) -> f64 {
        if self.width_px <= 0.0 {
            0.0
        } else {
            (self.end - self.start) / self.width_px
        }
    }

    /// Convert a pixel offset from the left of the plot to a time value.
    pub fn pixel_to_time(&self, pixel_x: f64) -> f64 {
        self.start + pixel_x * self.seconds_per_pixel()
    }

    /// Convert a time value to a pixel offset from the left of the plot.
    pub fn time_to_pixel(&self, t: f64) -> f64 {
        let span = self.end - self.start;
        if span == 0.0 {
            0.0
        } else {
            (t - self.start) / span * self.width_px
        }
    }

    /// Time tolerance equivalent to `pixels` on this axis.
    pub fn border_offset(&self, pixels: f64) -> f64 {
        pixels * self.seconds_per_pixel()
    }
}
