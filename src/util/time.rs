// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Conversions between time-axis values and UTC timestamps.
//!
//! Time-axis values are `f64` seconds since the Unix epoch.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Default status message format, e.g. `Thu Mar  3 23:05:25 2011, 250000us`.
pub const DEFAULT_TIME_FORMAT: &str = "%c, %6fus";

/// Convert axis seconds to a UTC timestamp. `None` if out of range.
pub fn to_datetime(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let mut whole = secs.floor();
    let mut nanos = ((secs - whole) * 1e9).round() as u32;
    if nanos >= 1_000_000_000 {
        whole += 1.0;
        nanos = 0;
    }
    if whole < i64::MIN as f64 || whole > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp(whole as i64, nanos)
}

pub fn from_datetime(dt: &DateTime<Utc>) -> f64 {
    dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) * 1e-9
}

/// True if `format` is a usable strftime string.
pub fn is_valid_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Format axis seconds for display, falling back to the raw number.
pub fn format_timestamp(secs: f64, format: &str) -> String {
    if let Some(dt) = to_datetime(secs) {
        let mut out = String::new();
        if write!(out, "{}", dt.format(format)).is_ok() {
            return out;
        }
    }
    format!("{secs}")
}

pub fn format_range(start: f64, end: f64, format: &str) -> String {
    format!(
        "{} - {}",
        format_timestamp(start, format),
        format_timestamp(end, format)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_datetime_roundtrip() {
        let dt = Utc.with_ymd_and_hms(2011, 3, 3, 23, 5, 25).unwrap();
        let secs = from_datetime(&dt) + 0.25;
        let back = to_datetime(secs).unwrap();
        assert_eq!(back.timestamp(), dt.timestamp());
        assert_eq!(back.timestamp_subsec_micros(), 250_000);
    }

    #[test]
    fn test_format_timestamp() {
        let secs = 1_299_193_525.25;
        assert_eq!(
            format_timestamp(secs, "%Y-%m-%d %H:%M:%S, %6fus"),
            "2011-03-03 23:05:25, 250000us"
        );
        assert!(format_timestamp(secs, DEFAULT_TIME_FORMAT).ends_with(", 250000us"));
    }

    #[test]
    fn test_format_range() {
        assert_eq!(format_range(0.0, 60.0, "%H:%M"), "00:00 - 00:01");
    }

    #[test]
    fn test_out_of_range_falls_back_to_number() {
        assert_eq!(format_timestamp(f64::NAN, "%c"), "NaN");
        assert!(to_datetime(1e30).is_none());
    }

    #[test]
    fn test_format_validation() {
        assert!(is_valid_format(DEFAULT_TIME_FORMAT));
        assert!(!is_valid_format("%Q"));
    }
}
