// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! User settings.
//!
//! Settings live in a YAML or JSON file. Every field has a default, so a
//! partial file (or none at all) is fine.

use crate::io::serialization;
use crate::models::annotation::{Color, DEFAULT_PALETTE};
use crate::util::time::{is_valid_format, DEFAULT_TIME_FORMAT};
use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotatorConfig {
    /// Context colors, handed out in order
    pub palette: Vec<String>,
    /// How close (in pixels) a click must be to an edge to resize instead of drag
    pub border_pixels: f64,
    /// `chrono` format for timestamps in status messages
    pub time_format: String,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            border_pixels: 5.0,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

impl AnnotatorConfig {
    /// Load from a `.yaml`, `.yml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self> {
        let config: Self = serialization::import(path)?;
        config.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        serialization::export(self, path)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(!self.palette.is_empty(), "palette must not be empty");
        for (i, color) in self.palette.iter().enumerate() {
            ensure!(
                !self.palette[..i].contains(color),
                "palette color {color:?} is listed twice"
            );
        }
        ensure!(
            self.border_pixels.is_finite() && self.border_pixels >= 0.0,
            "border_pixels must be a non-negative number"
        );
        ensure!(
            is_valid_format(&self.time_format),
            "invalid time format {:?}",
            self.time_format
        );
        Ok(())
    }

    pub fn palette_colors(&self) -> Vec<Color> {
        self.palette.iter().map(Color::new).collect()
    }
}
