// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Plain-text annotation files.
//!
//! One annotation per line: `<context> <start> <end>`, where the bounds are
//! whole UTC seconds since the Unix epoch.

use crate::error::{AnnotationError, Result};
use crate::models::annotation::Annotation;
use crate::models::store::AnnotationStore;
use std::io::Write;
use std::path::Path;

/// Render store contents in the line format, sorted by start time.
///
/// Fails on context names containing whitespace and on bounds that are not
/// finite or do not fit in an `i64`.
pub fn format_annotations(store: &AnnotationStore) -> Result<String> {
    let mut out = String::new();
    for record in store.records() {
        if record.context.is_empty() || record.context.contains(char::is_whitespace) {
            return Err(AnnotationError::InvalidContextName(record.context));
        }
        let start = whole_seconds(&record.context, record.start)?;
        let end = whole_seconds(&record.context, record.end)?;
        out.push_str(&format!("{} {} {}\n", record.context, start, end));
    }
    Ok(out)
}

/// Write all annotations of `store` to `path`.
pub fn write_annotations(store: &AnnotationStore, path: &Path) -> Result<()> {
    let text = format_annotations(store)?;
    let mut file = std::fs::File::create(path)?;
    file.write_all(text.as_bytes())?;
    log::info!("Wrote {} annotations to {}", store.len(), path.display());
    Ok(())
}

/// Parse the line format. Blank lines are skipped.
pub fn parse_annotations(text: &str) -> Result<Vec<Annotation>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| parse_line(index + 1, line))
        .collect()
}

fn parse_line(line_no: usize, line: &str) -> Result<Annotation> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [context, start, end] = tokens[..] else {
        return Err(AnnotationError::Parse {
            line: line_no,
            reason: format!("expected 3 fields, found {}", tokens.len()),
        });
    };
    Ok(Annotation::new(
        context,
        parse_seconds(line_no, start)?,
        parse_seconds(line_no, end)?,
    ))
}

fn parse_seconds(line_no: usize, token: &str) -> Result<f64> {
    let value = token
        .parse::<i64>()
        .map(|secs| secs as f64)
        .or_else(|_| token.parse::<f64>())
        .map_err(|_| AnnotationError::Parse {
            line: line_no,
            reason: format!("invalid timestamp {token:?}"),
        })?;
    if !value.is_finite() {
        return Err(AnnotationError::Parse {
            line: line_no,
            reason: format!("timestamp {token:?} is not finite"),
        });
    }
    Ok(value)
}

/// Replace the contents of `store` with the annotations in `path`.
///
/// The store is cleared first. The whole file is parsed before anything is
/// added, so a malformed file leaves the store empty.
pub fn read_annotations(store: &mut AnnotationStore, path: &Path) -> Result<usize> {
    store.clear();
    let text = std::fs::read_to_string(path)?;
    let records = parse_annotations(&text).inspect_err(|e| {
        log::warn!("Rejected annotation file {}: {}", path.display(), e);
    })?;

    for record in &records {
        if let Err(e) = store.add_annotation(&record.context, record.start, record.end) {
            store.clear();
            return Err(e);
        }
    }
    log::info!("Read {} annotations from {}", records.len(), path.display());
    Ok(records.len())
}

fn whole_seconds(context: &str, t: f64) -> Result<i64> {
    let secs = t.floor();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    if secs.is_finite() && secs >= i64::MIN as f64 && secs < i64::MAX as f64 {
        Ok(secs as i64)
    } else {
        Err(AnnotationError::UnwritableBound {
            context: context.to_string(),
            value: t,
        })
    }
}
