// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: annotations, contexts, the store and project files.

pub mod annotation;
pub mod events;
pub mod project;
pub mod store;
