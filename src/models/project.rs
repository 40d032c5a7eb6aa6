// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project state management.
//!
//! A project is the index of an annotation package: the recordings it
//! refers to and the annotations made on them.

use super::annotation::Annotation;
use super::store::AnnotationStore;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reference to a recording stored next to the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
    /// Source kind name, e.g. `audio` or `movement`
    pub kind: String,
    pub name: String,
    pub file: String,
    /// UTC start of the recording in axis seconds, for sources without timestamps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub channels: Vec<u32>,
    /// Attributes of kinds this crate does not know, kept verbatim
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl SourceRef {
    pub fn new(kind: impl Into<String>, name: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            file: file.into(),
            offset: None,
            channels: Vec::new(),
            attributes: BTreeMap::new(),
        }
    }
}

/// Complete project data for serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectData {
    #[serde(default)]
    pub sources: Vec<SourceRef>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl ProjectData {
    /// Create a new project with the given sources and no annotations.
    pub fn new(sources: Vec<SourceRef>) -> Self {
        Self {
            sources,
            annotations: Vec::new(),
        }
    }

    /// Snapshot the annotations of `store`, sorted by start time.
    pub fn from_store(store: &AnnotationStore, sources: Vec<SourceRef>) -> Self {
        Self {
            sources,
            annotations: store.records(),
        }
    }

    /// Replace the contents of `store` with this project's annotations.
    ///
    /// Ids are reassigned. On error the store is left empty.
    pub fn load_into(&self, store: &mut AnnotationStore) -> Result<usize> {
        store.clear();
        for ann in &self.annotations {
            if let Err(e) = store.add_annotation(&ann.context, ann.start, ann.end) {
                store.clear();
                return Err(e);
            }
        }
        Ok(self.annotations.len())
    }
}
