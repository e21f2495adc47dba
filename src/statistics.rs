//! Trajectory statistics: percentiles, heading changes, summary statistics
//! and stop detection.
//!
//! Every function here takes its complete input by reference and returns a
//! freshly computed value. Nothing is cached between calls.

use crate::geo::distance;
use crate::trajectory::Sample;
use serde::Serialize;
use std::f64::consts::{PI, TAU};

/// Value at percentile `p` (0..=100) using the nearest-rank method
///
/// Sorts a copy of `values`, so the caller's slice is never reordered.
/// NaN sorts above every number. Returns `None` for empty input.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let last = sorted.len() - 1;
    let rank = (p / 100.0 * sorted.len() as f64).ceil() - 1.0;
    let index = if rank.is_nan() {
        0
    } else {
        rank.clamp(0.0, last as f64) as usize
    };

    Some(sorted[index])
}

/// Wrap an angular difference into [-π, π]
#[must_use]
pub fn wrap_angle(mut diff: f64) -> f64 {
    if !diff.is_finite() {
        return diff;
    }
    while diff > PI {
        diff -= TAU;
    }
    while diff < -PI {
        diff += TAU;
    }
    diff
}

/// Absolute heading change between adjacent samples, radians in [0, π]
///
/// Only pairs where both samples carry a heading contribute; a missing
/// heading breaks the chain instead of being bridged. For a fully headed
/// trajectory the result has `len - 1` entries.
#[must_use]
pub fn heading_changes(samples: &[Sample]) -> Vec<f64> {
    samples
        .windows(2)
        .filter_map(|pair| match (pair[0].heading, pair[1].heading) {
            (Some(from), Some(to)) => Some(wrap_angle(to - from).abs()),
            _ => None,
        })
        .collect()
}

/// Statistical summary of a series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Statistics {
    /// Mean value of the data
    pub mean: f64,
    /// Population standard deviation of the data
    pub std_dev: f64,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Range (max - min) of the data
    pub range: f64,
}

impl Statistics {
    /// Summarize `data`, `None` when empty
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_values(data: &[f64]) -> Option<Self> {
        if data.is_empty() {
            return None;
        }

        let n = data.len() as f64;
        let mean = data.iter().sum::<f64>() / n;

        let variance = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

        let std_dev = variance.sqrt();

        let min = data.iter().copied().fold(f64::INFINITY, f64::min);
        let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            mean,
            std_dev,
            min,
            max,
            range: max - min,
        })
    }
}

/// A maximal run of consecutive low-speed samples
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stop {
    /// Index of the first stopped sample
    pub start_index: usize,
    /// Index of the last stopped sample (inclusive)
    pub end_index: usize,
    /// Time between the first and last stopped sample, timestamp units
    pub duration: i64,
    /// Displacement from the sample before the run to the sample after it, meters
    pub distance_m: f64,
}

impl Stop {
    fn from_run(samples: &[Sample], start: usize, end: usize) -> Self {
        let distance_m = if start == 0 {
            0.0
        } else {
            let after = (end + 1).min(samples.len() - 1);
            distance(&samples[start - 1], &samples[after])
        };

        Self {
            start_index: start,
            end_index: end,
            duration: samples[end].timestamp - samples[start].timestamp,
            distance_m,
        }
    }

    /// Number of samples in the run
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.end_index - self.start_index + 1
    }
}

/// Find every run of samples with speed below `threshold_kmh`
///
/// Missing speed counts as stopped. A run still open at the end of the
/// trajectory is closed at the last index.
#[must_use]
pub fn find_stops(samples: &[Sample], threshold_kmh: f64) -> Vec<Stop> {
    let mut stops = Vec::new();
    let mut run_start: Option<usize> = None;

    for (i, sample) in samples.iter().enumerate() {
        let stopped = sample.speed_or_zero() < threshold_kmh;
        match (stopped, run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(start)) => {
                stops.push(Stop::from_run(samples, start, i - 1));
                run_start = None;
            }
            _ => {}
        }
    }

    if let Some(start) = run_start {
        stops.push(Stop::from_run(samples, start, samples.len() - 1));
    }

    stops
}
