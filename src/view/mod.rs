// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! What part of the time axis the displays show.

pub mod scale;
