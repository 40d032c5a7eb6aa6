// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation session state.
//!
//! This module ties the annotation store, the input state machine and the
//! attached sources together. A host application owns one session per open
//! package, forwards pointer events from its displays, and reacts to the
//! store and input notifications.

use crate::config::AnnotatorConfig;
use crate::error::Result;
use crate::input::machine::{
    DisplayId, InputStateMachine, PointerButton, PointerMotion, PointerPress,
};
use crate::io::serialization;
use crate::models::annotation::AnnotationId;
use crate::models::project::ProjectData;
use crate::models::store::AnnotationStore;
use crate::sources::{PlayData, Source};
use crate::util::axis::TimeAxis;
use crate::view::scale::{ScalePolicy, Viewport};
use std::path::Path;

/// A source shown on one display.
pub struct AttachedSource {
    pub id: DisplayId,
    pub source: Box<dyn Source>,
}

/// Everything one open annotation package needs.
pub struct AnnotationSession {
    config: AnnotatorConfig,
    store: AnnotationStore,
    input: InputStateMachine,
    scale: ScalePolicy,
    displays: Vec<AttachedSource>,
    next_display: usize,
}

impl Default for AnnotationSession {
    fn default() -> Self {
        Self::new(AnnotatorConfig::default())
    }
}

impl AnnotationSession {
    /// Create an empty session with the given settings.
    pub fn new(config: AnnotatorConfig) -> Self {
        let store = AnnotationStore::with_palette(config.palette_colors());
        let input = InputStateMachine::with_time_format(config.time_format.clone());
        Self {
            config,
            store,
            input,
            scale: ScalePolicy::new(),
            displays: Vec::new(),
            next_display: 0,
        }
    }

    pub fn config(&self) -> &AnnotatorConfig {
        &self.config
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    /// Mutable store access, e.g. to subscribe listeners.
    pub fn store_mut(&mut self) -> &mut AnnotationStore {
        &mut self.store
    }

    pub fn input(&self) -> &InputStateMachine {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputStateMachine {
        &mut self.input
    }

    pub fn scale(&self) -> &ScalePolicy {
        &self.scale
    }

    pub fn scale_mut(&mut self) -> &mut ScalePolicy {
        &mut self.scale
    }

    /// Attach a source to a new display.
    pub fn add_source(&mut self, source: Box<dyn Source>) -> DisplayId {
        let id = DisplayId(self.next_display);
        self.next_display += 1;
        log::info!(
            "Added {} source {:?} as display {}",
            source.kind().as_str(),
            source.name(),
            id.0
        );
        self.displays.push(AttachedSource { id, source });
        self.recalculate();
        id
    }

    pub fn remove_source(&mut self, id: DisplayId) -> Option<Box<dyn Source>> {
        let index = self.displays.iter().position(|d| d.id == id)?;
        let display = self.displays.remove(index);
        log::info!("Removed display {}, total: {}", id.0, self.displays.len());
        Some(display.source)
    }

    pub fn source(&self, id: DisplayId) -> Option<&dyn Source> {
        self.displays
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.source.as_ref())
    }

    pub fn displays(&self) -> &[AttachedSource] {
        &self.displays
    }

    /// Overall time span of sources and annotations. Anchors the zoom
    /// window at its start the first time a span is known.
    pub fn recalculate(&mut self) -> Option<Viewport> {
        let view = self.span()?;
        self.scale.anchor_min(view.min);
        Some(view)
    }

    pub fn span(&self) -> Option<Viewport> {
        Viewport::recalculate(
            self.displays.iter().map(|d| d.source.time_bounds()),
            self.store.bounds(),
        )
    }

    fn press(
        &self,
        display: DisplayId,
        button: PointerButton,
        x: f64,
        axis: &TimeAxis,
        time: u32,
    ) -> PointerPress {
        PointerPress {
            display,
            button,
            x,
            border_offset: axis.border_offset(self.config.border_pixels),
            time,
        }
    }

    /// Forward a button press from a display showing `axis`.
    pub fn button_down(
        &mut self,
        display: DisplayId,
        button: PointerButton,
        x: f64,
        axis: &TimeAxis,
        time: u32,
    ) -> Result<()> {
        let press = self.press(display, button, x, axis, time);
        self.input.button_down(&mut self.store, press)
    }

    /// Forward a button release from a display showing `axis`.
    pub fn button_up(
        &mut self,
        display: DisplayId,
        button: PointerButton,
        x: f64,
        axis: &TimeAxis,
        time: u32,
    ) -> Result<()> {
        let press = self.press(display, button, x, axis, time);
        self.input.button_up(&mut self.store, press)
    }

    pub fn pointer_move(&mut self, display: DisplayId, x: f64, time: u32) -> Result<()> {
        self.input
            .pointer_move(&mut self.store, PointerMotion { display, x, time })
    }

    /// Turn the current selection into an annotation of `context`.
    ///
    /// Returns `None` when nothing is selected.
    pub fn create_annotation_from_selection(
        &mut self,
        context: &str,
    ) -> Result<Option<AnnotationId>> {
        let Some((start, end)) = self.input.selection() else {
            return Ok(None);
        };
        let id = self.store.add_annotation(context, start, end)?;
        log::info!(
            "Annotated selection as {context:?}, total: {}",
            self.store.len()
        );
        Ok(Some(id))
    }

    pub fn remove_annotation(&mut self, id: AnnotationId) -> Result<()> {
        if self.input.mode().target() == Some(id) {
            self.input.reset();
        }
        self.store.remove_annotation(id)
    }

    pub fn remove_context(&mut self, name: &str) -> bool {
        if let Some(target) = self.input.mode().target() {
            if self.store.annotations_of(name).contains(&target) {
                self.input.reset();
            }
        }
        self.store.remove_context(name)
    }

    /// Samples of the current selection from a playable display.
    pub fn play_selection(&self, display: DisplayId) -> Option<PlayData> {
        let (start, end) = self.input.selection()?;
        self.source(display)?.play_data(start, end)
    }

    /// Samples covered by an annotation from a playable display.
    pub fn play_annotation(
        &self,
        display: DisplayId,
        id: AnnotationId,
    ) -> Result<Option<PlayData>> {
        let info = self.store.get_annotation(id)?;
        Ok(self
            .source(display)
            .and_then(|source| source.play_data(info.start, info.end)))
    }

    /// Write annotations in the line format.
    pub fn save_annotations(&self, path: &Path) -> Result<()> {
        self.store.write(path)
    }

    /// Replace annotations with the contents of a line-format file.
    ///
    /// Any gesture and the selection are dropped first.
    pub fn load_annotations(&mut self, path: &Path) -> Result<usize> {
        self.discard_input();
        let count = self.store.read(path)?;
        self.recalculate();
        Ok(count)
    }

    fn discard_input(&mut self) {
        self.input.reset();
        if self.input.selection().is_some() {
            self.input.set_selection(None);
        }
    }

    /// Package index for the attached sources and current annotations.
    pub fn to_project(&self) -> ProjectData {
        let sources = self.displays.iter().map(|d| d.source.to_ref()).collect();
        ProjectData::from_store(&self.store, sources)
    }

    pub fn export_project(&self, path: &Path) -> anyhow::Result<()> {
        serialization::export(&self.to_project(), path)?;
        log::info!("Exported project to {}", path.display());
        Ok(())
    }

    /// Load the annotations of a project file and return the index so the
    /// host can resolve its sources.
    pub fn import_project(&mut self, path: &Path) -> anyhow::Result<ProjectData> {
        let project: ProjectData = serialization::import(path)?;
        self.discard_input();
        if let Err(e) = project.load_into(&mut self.store) {
            log::warn!("Failed to load annotations from {}: {}", path.display(), e);
            return Err(e.into());
        }
        log::info!(
            "Imported {} annotations and {} sources from {}",
            project.annotations.len(),
            project.sources.len(),
            path.display()
        );
        self.recalculate();
        Ok(project)
    }
}
