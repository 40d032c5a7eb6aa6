// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Context Annotator
//!
//! Core of a tool for labeling time intervals ("contexts") on audio and
//! movement recordings. The crate holds the annotation store, the pointer
//! input state machine that creates, moves and resizes annotations, and the
//! file formats for annotations and project packages. Drawing and decoding
//! are left to the host application.

pub mod config;
pub mod error;
pub mod input;
pub mod io;
pub mod logging;
pub mod models;
pub mod session;
pub mod sources;
pub mod util;
pub mod view;

pub use config::AnnotatorConfig;
pub use error::{AnnotationError, Result};
pub use input::machine::{DisplayId, InputEvent, InputStateMachine, PointerButton};
pub use input::state::InputMode;
pub use models::annotation::{Annotation, AnnotationId, AnnotationInfo, Color};
pub use models::events::StoreEvent;
pub use models::store::AnnotationStore;
pub use session::AnnotationSession;
