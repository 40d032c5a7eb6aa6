// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Placeholder for project entries of an unrecognised kind.
//!
//! Keeps the entry intact so saving the project does not drop it.

use super::{Source, SourceKind};
use crate::models::project::SourceRef;

#[derive(Debug, Clone, PartialEq)]
pub struct UnknownSource {
    entry: SourceRef,
}

impl UnknownSource {
    pub fn new(entry: SourceRef) -> Self {
        Self { entry }
    }
}

impl Source for UnknownSource {
    fn name(&self) -> &str {
        &self.entry.name
    }

    fn kind(&self) -> SourceKind {
        SourceKind::from_name(&self.entry.kind)
    }

    fn time_bounds(&self) -> (f64, f64) {
        (0.0, 0.0)
    }

    fn data_bounds(&self) -> (f64, f64) {
        (0.0, 0.0)
    }

    fn to_ref(&self) -> SourceRef {
        self.entry.clone()
    }
}
