// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Recorded data shown on displays.
//!
//! Sources hold already-decoded samples. They report their extent on both
//! axes and, when they can be listened to, hand out the samples of a time
//! range for playback.

pub mod movement;
pub mod unknown;
pub mod waveform;

pub use movement::MovementSource;
pub use unknown::UnknownSource;
pub use waveform::WaveformSource;

use crate::models::project::SourceRef;

/// Kind of recording, as named in project files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    Audio,
    Movement,
    Unknown(String),
}

impl SourceKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "audio" => SourceKind::Audio,
            "movement" => SourceKind::Movement,
            other => SourceKind::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SourceKind::Audio => "audio",
            SourceKind::Movement => "movement",
            SourceKind::Unknown(name) => name,
        }
    }
}

/// Samples of a time range, ready for an audio sink.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayData {
    pub samples: Vec<f32>,
    pub rate: u32,
}

/// A recording attached to a display.
pub trait Source {
    fn name(&self) -> &str;

    fn kind(&self) -> SourceKind;

    /// First and last time covered, in axis seconds.
    fn time_bounds(&self) -> (f64, f64);

    /// Smallest and largest sample value.
    fn data_bounds(&self) -> (f64, f64);

    /// Samples between `start` and `end`, if this source can be played.
    fn play_data(&self, _start: f64, _end: f64) -> Option<PlayData> {
        None
    }

    fn can_play(&self) -> bool {
        false
    }

    /// Entry describing this source in a project index.
    fn to_ref(&self) -> SourceRef;
}

/// Min and max of a sequence, `(0, 0)` when empty.
pub(crate) fn value_range(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    values
        .into_iter()
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .unwrap_or((0.0, 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(SourceKind::from_name("audio"), SourceKind::Audio);
        assert_eq!(SourceKind::from_name("movement"), SourceKind::Movement);
        let video = SourceKind::from_name("video");
        assert_eq!(video, SourceKind::Unknown("video".to_string()));
        assert_eq!(video.as_str(), "video");
    }

    #[test]
    fn test_value_range() {
        assert_eq!(value_range(Vec::new()), (0.0, 0.0));
        assert_eq!(value_range(vec![3.0, -1.0, 2.0]), (-1.0, 3.0));
    }
}
