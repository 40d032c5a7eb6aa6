// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Mouse-driven editing of annotations on the time axis.

pub mod machine;
pub mod state;
