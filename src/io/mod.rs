// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for annotation and project files.

pub mod annotations_file;
pub mod serialization;
