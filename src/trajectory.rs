//! GPS samples and the ingestion boundary.
//!
//! Upstream data sources report speed either in m/s (`speed`) or in km/h
//! (`speedKmh`). [`RawSample`] accepts both shapes and [`Sample`] is the
//! canonical form every classifier works on, with speed always in km/h.

use crate::constants::MS_TO_KMH;
use serde::{Deserialize, Serialize};

/// One GPS fix in canonical units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    /// Timestamp in seconds, non-decreasing along a trajectory
    pub timestamp: i64,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Ground speed in km/h
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_kmh: Option<f64>,
    /// Course over ground in radians, [0, 2π)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<f64>,
}

impl Sample {
    /// Create a sample with position only
    #[must_use]
    pub fn new(timestamp: i64, latitude: f64, longitude: f64) -> Self {
        Self {
            timestamp,
            latitude,
            longitude,
            speed_kmh: None,
            heading: None,
        }
    }

    /// Set the speed in km/h
    #[must_use]
    pub fn with_speed(mut self, speed_kmh: f64) -> Self {
        self.speed_kmh = Some(speed_kmh);
        self
    }

    /// Set the heading in radians
    #[must_use]
    pub fn with_heading(mut self, heading: f64) -> Self {
        self.heading = Some(heading);
        self
    }

    /// Speed in km/h, with a missing value read as stationary
    #[must_use]
    pub fn speed_or_zero(&self) -> f64 {
        self.speed_kmh.unwrap_or(0.0)
    }
}

/// A sample as delivered by the acquisition layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    pub timestamp: i64,
    pub latitude: f64,
    pub longitude: f64,
    /// Speed in m/s
    #[serde(default)]
    pub speed: Option<f64>,
    /// Speed in km/h; takes precedence over `speed`
    #[serde(default, rename = "speedKmh", alias = "speed_kmh")]
    pub speed_kmh: Option<f64>,
    /// Heading in radians
    #[serde(default)]
    pub heading: Option<f64>,
}

impl From<RawSample> for Sample {
    fn from(raw: RawSample) -> Self {
        let speed_kmh = raw.speed_kmh.or_else(|| raw.speed.map(|ms| ms * MS_TO_KMH));
        Self {
            timestamp: raw.timestamp,
            latitude: raw.latitude,
            longitude: raw.longitude,
            speed_kmh,
            heading: raw.heading,
        }
    }
}

/// Normalize a batch of raw samples into canonical samples
#[must_use]
pub fn normalize(raw: &[RawSample]) -> Vec<Sample> {
    raw.iter().copied().map(Sample::from).collect()
}

/// Speeds of every sample in km/h, missing speed read as zero
#[must_use]
pub fn speeds(samples: &[Sample]) -> Vec<f64> {
    samples.iter().map(Sample::speed_or_zero).collect()
}

/// Maximum speed in km/h, `None` for an empty trajectory
#[must_use]
pub fn max_speed(samples: &[Sample]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(
        samples
            .iter()
            .map(Sample::speed_or_zero)
            .fold(f64::NEG_INFINITY, f64::max),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kmh_takes_precedence() {
        let raw = RawSample {
            speed: Some(10.0),
            speed_kmh: Some(20.0),
            ..RawSample::default()
        };
        assert_eq!(Sample::from(raw).speed_kmh, Some(20.0));
    }

    #[test]
    fn test_ms_converted_to_kmh() {
        let raw = RawSample {
            speed: Some(10.0),
            ..RawSample::default()
        };
        let sample = Sample::from(raw);
        assert!((sample.speed_kmh.unwrap() - 36.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_speed_stays_missing() {
        let sample = Sample::from(RawSample::default());
        assert_eq!(sample.speed_kmh, None);
        assert_eq!(sample.speed_or_zero(), 0.0);
    }

    #[test]
    fn test_raw_sample_accepts_both_spellings() {
        let camel: RawSample =
            serde_json::from_str(r#"{"timestamp":1,"latitude":0.0,"longitude":0.0,"speedKmh":5.0}"#).unwrap();
        let snake: RawSample =
            serde_json::from_str(r#"{"timestamp":1,"latitude":0.0,"longitude":0.0,"speed_kmh":5.0}"#).unwrap();
        assert_eq!(camel.speed_kmh, Some(5.0));
        assert_eq!(snake.speed_kmh, Some(5.0));
    }

    #[test]
    fn test_max_speed() {
        assert_eq!(max_speed(&[]), None);
        let samples = vec![
            Sample::new(0, 0.0, 0.0).with_speed(3.0),
            Sample::new(1, 0.0, 0.0),
            Sample::new(2, 0.0, 0.0).with_speed(-4.0),
        ];
        assert_eq!(max_speed(&samples), Some(3.0));
        assert_eq!(speeds(&samples), vec![3.0, 0.0, -4.0]);
    }
}
