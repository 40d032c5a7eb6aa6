// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Accelerometer logs.
//!
//! A package stores one sensor per file as `timestamp x y z` lines. Raw
//! logger output may hold several sensors per line and split the timestamp
//! into whole seconds and a fraction token; [`MovementSource::parse_multi`]
//! reads that shape.

use super::{value_range, Source, SourceKind};
use crate::models::project::SourceRef;
use anyhow::{bail, Context, Result};

/// Three-axis samples with one UTC timestamp each.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementSource {
    name: String,
    file: String,
    times: Vec<f64>,
    values: Vec<[f64; 3]>,
}

impl MovementSource {
    pub fn new(
        name: impl Into<String>,
        file: impl Into<String>,
        times: Vec<f64>,
        values: Vec<[f64; 3]>,
    ) -> Result<Self> {
        if times.len() != values.len() {
            bail!("{} timestamps but {} samples", times.len(), values.len());
        }
        Ok(Self {
            name: name.into(),
            file: file.into(),
            times,
            values,
        })
    }

    /// Parse a single-sensor log of `timestamp x y z` lines.
    pub fn parse(name: &str, file: &str, text: &str) -> Result<Self> {
        let mut times = Vec::new();
        let mut values = Vec::new();

        for (index, line) in text.lines().enumerate() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.is_empty() {
                continue;
            }
            let line_no = index + 1;
            if tokens.len() != 4 {
                bail!("line {line_no}: expected 4 fields, found {}", tokens.len());
            }
            times.push(parse_number(tokens[0], line_no)?);
            values.push(parse_axes(&tokens[1..4], line_no)?);
        }

        Self::new(name, file, times, values)
    }

    /// Parse a raw multi-sensor log, returning one source per requested sensor.
    ///
    /// The token count modulo 3 tells the timestamp shape: one token holds
    /// float seconds, two tokens hold whole seconds and the fraction digits.
    pub fn parse_multi(name: &str, text: &str, sensors: &[usize]) -> Result<Vec<Self>> {
        let mut times = Vec::new();
        let mut per_sensor: Vec<Vec<[f64; 3]>> = vec![Vec::new(); sensors.len()];

        for (index, line) in text.lines().enumerate() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.is_empty() {
                continue;
            }
            let line_no = index + 1;
            let rest = tokens.len() % 3;
            let timestamp = match rest {
                1 => parse_number(tokens[0], line_no)?,
                2 => {
                    let whole: i64 = tokens[0].parse().with_context(|| {
                        format!("line {line_no}: invalid seconds {:?}", tokens[0])
                    })?;
                    let fraction = parse_number(&format!("0.{}", tokens[1]), line_no)?;
                    whole as f64 + fraction
                }
                _ => bail!(
                    "line {line_no}: cannot find timestamp in {} fields",
                    tokens.len()
                ),
            };
            times.push(timestamp);

            for (slot, sensor) in sensors.iter().enumerate() {
                let first = rest + sensor * 3;
                let Some(axes) = tokens.get(first..first + 3) else {
                    bail!("line {line_no}: no data for sensor {sensor}");
                };
                per_sensor[slot].push(parse_axes(axes, line_no)?);
            }
        }

        sensors
            .iter()
            .zip(per_sensor)
            .map(|(sensor, values)| {
                let sensor_name = format!("{name}{sensor}");
                let file = format!("{sensor_name}.log");
                Self::new(sensor_name, file, times.clone(), values)
            })
            .collect()
    }

    /// Render in the single-sensor package format.
    pub fn to_log(&self) -> String {
        self.times
            .iter()
            .zip(&self.values)
            .map(|(t, [x, y, z])| format!("{t} {x} {y} {z}\n"))
            .collect()
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn values(&self) -> &[[f64; 3]] {
        &self.values
    }
}

fn parse_number(token: &str, line_no: usize) -> Result<f64> {
    let value: f64 = token
        .parse()
        .with_context(|| format!("line {line_no}: invalid number {token:?}"))?;
    if !value.is_finite() {
        bail!("line {line_no}: number {token:?} is not finite");
    }
    Ok(value)
}

fn parse_axes(tokens: &[&str], line_no: usize) -> Result<[f64; 3]> {
    Ok([
        parse_number(tokens[0], line_no)?,
        parse_number(tokens[1], line_no)?,
        parse_number(tokens[2], line_no)?,
    ])
}

impl Source for MovementSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Movement
    }

    fn time_bounds(&self) -> (f64, f64) {
        match (self.times.first(), self.times.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => (0.0, 0.0),
        }
    }

    fn data_bounds(&self) -> (f64, f64) {
        value_range(self.values.iter().flatten().copied())
    }

    fn to_ref(&self) -> SourceRef {
        SourceRef::new(SourceKind::Movement.as_str(), &self.name, &self.file)
    }
}
