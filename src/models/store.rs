// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! The annotation store.
//!
//! Single owner of all contexts and annotations. Every mutation is
//! announced to the subscribed listeners before the call returns.

use super::annotation::{
    default_palette, Annotation, AnnotationId, AnnotationInfo, Bounding, Color, Context,
};
use super::events::{ListenerId, Listeners, StoreEvent};
use crate::error::{AnnotationError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

#[derive(Debug)]
struct ContextEntry {
    color: Color,
    members: BTreeSet<AnnotationId>,
}

/// Authoritative collection of contexts and annotations.
#[derive(Debug)]
pub struct AnnotationStore {
    palette: Vec<Color>,
    contexts: BTreeMap<String, ContextEntry>,
    annotations: BTreeMap<AnnotationId, Annotation>,
    /// Next id to hand out; only ever increases until `clear`
    counter: u64,
    listeners: Listeners<StoreEvent>,
}

impl Default for AnnotationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationStore {
    /// Create an empty store using the default four-color palette.
    pub fn new() -> Self {
        Self::with_palette(default_palette())
    }

    /// Create an empty store drawing context colors from `palette`.
    pub fn with_palette(palette: Vec<Color>) -> Self {
        Self {
            palette,
            contexts: BTreeMap::new(),
            annotations: BTreeMap::new(),
            counter: 0,
            listeners: Listeners::new(),
        }
    }

    /// Register a listener for store mutations.
    pub fn subscribe<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(&StoreEvent) + 'static,
    {
        self.listeners.subscribe(callback)
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Colors handed out to contexts, in order.
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Add a context, or look up the color of an existing one.
    ///
    /// Existing contexts are returned unchanged without notification.
    pub fn add_context(&mut self, name: &str) -> Result<Color> {
        if let Some(entry) = self.contexts.get(name) {
            return Ok(entry.color.clone());
        }

        let color = self.free_color().ok_or(AnnotationError::PaletteExhausted {
            palette_size: self.palette.len(),
        })?;

        self.contexts.insert(
            name.to_string(),
            ContextEntry {
                color: color.clone(),
                members: BTreeSet::new(),
            },
        );
        log::debug!("Added context {name:?} with color {color}");
        self.listeners.emit(&StoreEvent::ContextAdded {
            name: name.to_string(),
            color: color.clone(),
        });
        Ok(color)
    }

    /// First palette color not held by a live context.
    fn free_color(&self) -> Option<Color> {
        self.palette
            .iter()
            .find(|color| !self.contexts.values().any(|entry| &entry.color == *color))
            .cloned()
    }

    /// Remove a context and all of its annotations.
    ///
    /// Returns false (and does nothing) if the context does not exist.
    pub fn remove_context(&mut self, name: &str) -> bool {
        let Some(entry) = self.contexts.remove(name) else {
            return false;
        };

        for id in &entry.members {
            self.annotations.remove(id);
            self.listeners.emit(&StoreEvent::AnnotationRemoved { id: *id });
        }
        log::debug!(
            "Removed context {name:?} and {} annotations",
            entry.members.len()
        );
        self.listeners.emit(&StoreEvent::ContextRemoved {
            name: name.to_string(),
        });
        true
    }

    /// Color of a live context.
    pub fn context_color(&self, name: &str) -> Option<Color> {
        self.contexts.get(name).map(|entry| entry.color.clone())
    }

    /// Add an annotation, creating its context on first use.
    pub fn add_annotation(&mut self, context: &str, start: f64, end: f64) -> Result<AnnotationId> {
        let color = self.add_context(context)?;

        let id = AnnotationId(self.counter);
        self.counter += 1;

        self.annotations
            .insert(id, Annotation::new(context, start, end));
        if let Some(entry) = self.contexts.get_mut(context) {
            entry.members.insert(id);
        }

        log::debug!("Added annotation {id} to {context:?}: {start} .. {end}");
        self.listeners.emit(&StoreEvent::AnnotationAdded {
            id,
            color,
            start,
            end,
        });
        Ok(id)
    }

    /// Remove one annotation, leaving its context in place.
    pub fn remove_annotation(&mut self, id: AnnotationId) -> Result<()> {
        let annotation = self
            .annotations
            .remove(&id)
            .ok_or(AnnotationError::AnnotationNotFound(id))?;
        if let Some(entry) = self.contexts.get_mut(&annotation.context) {
            entry.members.remove(&id);
        }

        log::debug!("Removed annotation {id}, total: {}", self.annotations.len());
        self.listeners.emit(&StoreEvent::AnnotationRemoved { id });
        Ok(())
    }

    /// Replace both bounds of an annotation at once.
    pub fn update_annotation(&mut self, id: AnnotationId, start: f64, end: f64) -> Result<()> {
        let annotation = self
            .annotations
            .get_mut(&id)
            .ok_or(AnnotationError::AnnotationNotFound(id))?;
        annotation.start = start;
        annotation.end = end;

        let context = annotation.context.clone();
        let color = self.color_of(&context);
        self.listeners.emit(&StoreEvent::AnnotationChanged {
            id,
            context,
            color,
            start,
            end,
        });
        Ok(())
    }

    /// Context, color and bounds of an annotation.
    pub fn get_annotation(&self, id: AnnotationId) -> Result<AnnotationInfo> {
        let annotation = self
            .annotations
            .get(&id)
            .ok_or(AnnotationError::AnnotationNotFound(id))?;
        Ok(AnnotationInfo {
            context: annotation.context.clone(),
            color: self.color_of(&annotation.context),
            start: annotation.start,
            end: annotation.end,
        })
    }

    /// Ids of all annotations with `start <= t <= end`, in ascending id order.
    pub fn find_annotation(&self, t: f64) -> Vec<AnnotationId> {
        self.annotations
            .iter()
            .filter(|(_, ann)| ann.contains(t))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Nearest annotations to the left and right of `t`, ignoring `exclude`.
    ///
    /// The left one has the largest `end < t`, the right one the smallest
    /// `start > t`. Ties go to the lower id.
    pub fn find_boundings(
        &self,
        t: f64,
        exclude: Option<AnnotationId>,
    ) -> (Option<Bounding>, Option<Bounding>) {
        let mut left: Option<Bounding> = None;
        let mut right: Option<Bounding> = None;

        for (id, ann) in &self.annotations {
            if Some(*id) == exclude {
                continue;
            }
            if ann.start > t && right.map_or(true, |r| r.bound > ann.start) {
                right = Some(Bounding {
                    id: *id,
                    bound: ann.start,
                });
            }
            if ann.end < t && left.map_or(true, |l| l.bound < ann.end) {
                left = Some(Bounding {
                    id: *id,
                    bound: ann.end,
                });
            }
        }
        (left, right)
    }

    /// All live contexts, ordered by name.
    pub fn contexts(&self) -> Vec<Context> {
        self.contexts
            .iter()
            .map(|(name, entry)| Context {
                name: name.clone(),
                color: entry.color.clone(),
            })
            .collect()
    }

    /// All annotations as `(id, color, start, end)`, in ascending id order.
    pub fn annotations(&self) -> impl Iterator<Item = (AnnotationId, Color, f64, f64)> + '_ {
        self.annotations
            .iter()
            .map(|(id, ann)| (*id, self.color_of(&ann.context), ann.start, ann.end))
    }

    /// Ids owned by a context, empty if it does not exist.
    pub fn annotations_of(&self, context: &str) -> Vec<AnnotationId> {
        self.contexts
            .get(context)
            .map(|entry| entry.members.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Every annotation as a plain record, sorted by start time then id.
    pub fn records(&self) -> Vec<Annotation> {
        let mut entries: Vec<(&AnnotationId, &Annotation)> = self.annotations.iter().collect();
        entries.sort_by(|(ia, a), (ib, b)| a.start.total_cmp(&b.start).then(ia.cmp(ib)));
        entries.into_iter().map(|(_, ann)| ann.clone()).collect()
    }

    /// Minimal start and maximal end over all annotations.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.annotations.values().fold(None, |acc, ann| match acc {
            None => Some((ann.start, ann.end)),
            Some((l, r)) => Some((l.min(ann.start), r.max(ann.end))),
        })
    }

    /// Number of annotations.
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// True if there are no annotations.
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Remove everything and reset the id counter.
    pub fn clear(&mut self) {
        let annotations = std::mem::take(&mut self.annotations);
        let contexts = std::mem::take(&mut self.contexts);
        self.counter = 0;

        for id in annotations.keys() {
            self.listeners.emit(&StoreEvent::AnnotationRemoved { id: *id });
        }
        for name in contexts.into_keys() {
            self.listeners.emit(&StoreEvent::ContextRemoved { name });
        }
        log::debug!("Cleared store");
    }

    /// Write all annotations to `path` in the line format.
    pub fn write(&self, path: &Path) -> Result<()> {
        crate::io::annotations_file::write_annotations(self, path)
    }

    /// Replace the store contents with the annotations in `path`.
    ///
    /// On error the store is left empty.
    pub fn read(&mut self, path: &Path) -> Result<usize> {
        crate::io::annotations_file::read_annotations(self, path)
    }

    fn color_of(&self, context: &str) -> Color {
        // Every annotation's context is live while the annotation is.
        self.contexts
            .get(context)
            .map(|entry| entry.color.clone())
            .unwrap_or_else(|| Color::new(""))
    }
}
