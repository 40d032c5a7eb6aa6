// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Decoded mono audio.

use super::{value_range, PlayData, Source, SourceKind};
use crate::models::project::SourceRef;
use anyhow::{ensure, Result};

/// PCM samples starting at a fixed UTC offset.
#[derive(Debug, Clone)]
pub struct WaveformSource {
    name: String,
    file: String,
    /// Axis time of the first sample
    offset: f64,
    rate: u32,
    channel: u32,
    samples: Vec<f32>,
}

impl WaveformSource {
    pub fn new(
        name: impl Into<String>,
        file: impl Into<String>,
        offset: f64,
        rate: u32,
        channel: u32,
        samples: Vec<f32>,
    ) -> Result<Self> {
        ensure!(rate > 0, "sample rate must be positive");
        ensure!(offset.is_finite(), "offset must be finite");
        Ok(Self {
            name: name.into(),
            file: file.into(),
            offset,
            rate,
            channel,
            samples,
        })
    }

    pub fn rate(&self) -> u32 {
        self.rate
    }

    pub fn frames(&self) -> usize {
        self.samples.len()
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Frame index for an axis time, clamped to the recording.
    fn frame_at(&self, t: f64) -> usize {
        let frame = ((t - self.offset) * f64::from(self.rate)).floor();
        if frame <= 0.0 {
            0
        } else {
            (frame as usize).min(self.samples.len())
        }
    }
}

impl Source for WaveformSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Audio
    }

    fn time_bounds(&self) -> (f64, f64) {
        let duration = self.samples.len() as f64 / f64::from(self.rate);
        (self.offset, self.offset + duration)
    }

    fn data_bounds(&self) -> (f64, f64) {
        value_range(self.samples.iter().map(|s| f64::from(*s)))
    }

    fn play_data(&self, start: f64, end: f64) -> Option<PlayData> {
        let first = self.frame_at(start);
        let last = self.frame_at(end);
        if first >= last {
            return None;
        }
        Some(PlayData {
            samples: self.samples[first..last].to_vec(),
            rate: self.rate,
        })
    }

    fn can_play(&self) -> bool {
        true
    }

    fn to_ref(&self) -> SourceRef {
        let mut source = SourceRef::new(SourceKind::Audio.as_str(), &self.name, &self.file);
        source.offset = Some(self.offset);
        source.channels = vec![self.channel];
        source
    }
}
