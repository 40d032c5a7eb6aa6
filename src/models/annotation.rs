// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation data structures.
//!
//! This module defines the core data structures for representing
//! contexts, their colors, and the time intervals tagged with them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an annotation, unique for the lifetime of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationId(pub u64);

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A context color, kept as the palette name (e.g. `"red"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub String);

impl Color {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The palette used when no other is configured.
pub const DEFAULT_PALETTE: [&str; 4] = ["red", "green", "yellow", "orange"];

/// Build the default palette.
pub fn default_palette() -> Vec<Color> {
    DEFAULT_PALETTE.iter().map(|name| Color::new(*name)).collect()
}

/// A time interval tagged with a context.
///
/// `start <= end` is expected but not checked here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub context: String,
    pub start: f64,
    pub end: f64,
}

impl Annotation {
    /// Create a new annotation for the given context and bounds.
    pub fn new(context: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            context: context.into(),
            start,
            end,
        }
    }

    /// Closed-interval membership: `start <= t <= end`.
    pub fn contains(&self, t: f64) -> bool {
        self.start <= t && t <= self.end
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Full view of a stored annotation as returned by lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationInfo {
    pub context: String,
    pub color: Color,
    pub start: f64,
    pub end: f64,
}

/// A named, colored category owning a set of annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    pub name: String,
    pub color: Color,
}

/// The nearest annotation on one side of a point, and the bound facing that point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounding {
    pub id: AnnotationId,
    pub bound: f64,
}
