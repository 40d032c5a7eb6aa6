// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for the annotation store and its line-based file format.

use crate::models::annotation::AnnotationId;
use thiserror::Error;

/// Errors raised by store lookups, context allocation and annotation files.
#[derive(Error, Debug)]
pub enum AnnotationError {
    /// No annotation with this id is live in the store
    #[error("annotation {0} not found")]
    AnnotationNotFound(AnnotationId),

    /// Every palette color is held by a live context
    #[error("no free context color left (palette has {palette_size} colors)")]
    PaletteExhausted { palette_size: usize },

    /// A line of an annotation file could not be parsed
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// Context name cannot be represented in the whitespace-separated file format
    #[error("context name {0:?} cannot be written (empty or contains whitespace)")]
    InvalidContextName(String),

    /// Annotation bound that has no whole-second representation
    #[error("bound {value} of a {context:?} annotation cannot be written as whole seconds")]
    UnwritableBound { context: String, value: f64 },

    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for annotation operations
pub type Result<T> = std::result::Result<T, AnnotationError>;
