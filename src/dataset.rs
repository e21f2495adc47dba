//! Labelled trajectory datasets stored as JSON.

use crate::labels::TransportMode;
use crate::trajectory::{normalize, RawSample, Sample};
use crate::{Error, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// One journey with its optional ground-truth label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledTrajectory {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Ground-truth label as recorded, which may lie outside the vocabulary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub samples: Vec<Sample>,
}

#[derive(Debug, Deserialize)]
struct RawTrajectory {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    label: Option<String>,
    samples: Vec<RawSample>,
}

impl LabeledTrajectory {
    /// Trajectory with a ground-truth mode
    #[must_use]
    pub fn new(id: impl Into<String>, mode: TransportMode, samples: Vec<Sample>) -> Self {
        Self {
            id: Some(id.into()),
            label: Some(mode.to_string()),
            samples,
        }
    }

    /// Identifier for log and report lines
    #[must_use]
    pub fn display_id(&self, index: usize) -> String {
        self.id.clone().unwrap_or_else(|| format!("#{index}"))
    }
}

impl From<RawTrajectory> for LabeledTrajectory {
    fn from(raw: RawTrajectory) -> Self {
        Self {
            id: raw.id,
            label: raw.label,
            samples: normalize(&raw.samples),
        }
    }
}

/// Parse a dataset from JSON text
///
/// # Errors
///
/// Returns an error if the text is not a JSON array of trajectories
pub fn from_json(content: &str) -> Result<Vec<LabeledTrajectory>> {
    let raw: Vec<RawTrajectory> = serde_json::from_str(content)?;
    let dataset: Vec<LabeledTrajectory> = raw.into_iter().map(LabeledTrajectory::from).collect();
    check_ordering(&dataset);
    Ok(dataset)
}

/// Load a dataset from a JSON file
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<LabeledTrajectory>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let raw: Vec<RawTrajectory> = serde_json::from_reader(reader)
        .map_err(|e| Error::DatasetError(format!("{}: {e}", path.display())))?;
    let dataset: Vec<LabeledTrajectory> = raw.into_iter().map(LabeledTrajectory::from).collect();
    check_ordering(&dataset);
    info!("Loaded {} trajectories from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Write a dataset to a JSON file
///
/// # Errors
///
/// Returns an error if the file cannot be created or written
pub fn save<P: AsRef<Path>>(path: P, dataset: &[LabeledTrajectory]) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, dataset)?;
    Ok(())
}

/// Serialize a dataset to pretty JSON text
///
/// # Errors
///
/// Returns an error if serialization fails
pub fn to_json(dataset: &[LabeledTrajectory]) -> Result<String> {
    Ok(serde_json::to_string_pretty(dataset)?)
}

/// Warn about trajectories whose timestamps go backwards
fn check_ordering(dataset: &[LabeledTrajectory]) {
    for (i, trajectory) in dataset.iter().enumerate() {
        if trajectory.samples.windows(2).any(|w| w[1].timestamp < w[0].timestamp) {
            warn!(
                "Trajectory {} has decreasing timestamps; samples are used in file order",
                trajectory.display_id(i)
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASET: &str = r#"[
        {"id": "a", "label": "bus", "samples": [
            {"timestamp": 0, "latitude": 48.0, "longitude": 11.0, "speed": 10.0},
            {"timestamp": 10, "latitude": 48.001, "longitude": 11.0, "speedKmh": 30.0, "heading": 0.1}
        ]},
        {"samples": []}
    ]"#;

    #[test]
    fn test_parse_normalizes_speed() {
        let dataset = from_json(DATASET).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset[0].label.as_deref(), Some("bus"));
        assert!((dataset[0].samples[0].speed_kmh.unwrap() - 36.0).abs() < 1e-9);
        assert_eq!(dataset[0].samples[1].speed_kmh, Some(30.0));
        assert_eq!(dataset[0].samples[1].heading, Some(0.1));
        assert_eq!(dataset[1].label, None);
        assert_eq!(dataset[1].display_id(1), "#1");
    }

    #[test]
    fn test_written_dataset_reads_back() {
        let original = vec![LabeledTrajectory::new(
            "t",
            TransportMode::Train,
            vec![Sample::new(0, 1.0, 2.0).with_speed(120.0).with_heading(0.5)],
        )];
        let parsed = from_json(&to_json(&original).unwrap()).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(from_json("{not json"), Err(Error::Json(_))));
    }
}
