//! Transportation-mode classifiers.
//!
//! Four independent strategies share one input contract: a trajectory of
//! canonical [`Sample`]s, possibly empty. None of them panic on degenerate
//! input; they return a sentinel label instead.

/// Maximum-speed bucket classifier
pub mod baseline;

/// Outlier-resistant percentile-speed bucket classifier
pub mod percentile;

/// Bus/car discrimination from stop frequency and spacing
pub mod stop_pattern;

/// Fixed/variable route discrimination from heading variance
pub mod heading_change;

use crate::config::SpeedThresholds;
use crate::constants::DEFAULT_SPEED_PERCENTILE;
use crate::labels::{RouteKind, SpeedMode, TransportMode, VehicleMode};
use crate::trajectory::Sample;
use crate::{Error, Result};
use serde::Serialize;
use std::fmt;

pub use baseline::BaselineClassifier;
pub use heading_change::HeadingChangeClassifier;
pub use percentile::PercentileClassifier;
pub use stop_pattern::StopPatternClassifier;

/// Label vocabulary a classifier answers in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelFamily {
    Speed,
    Vehicle,
    Route,
}

/// Result of any classifier, tagged by label family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "family", content = "label", rename_all = "kebab-case")]
pub enum Classification {
    /// Speed bucket
    Speed(SpeedMode),
    /// Bus or car, `None` when the classifier declined
    Vehicle(Option<VehicleMode>),
    /// Route kind, `None` when there was too little heading data
    Route(Option<RouteKind>),
}

impl Classification {
    /// Family this result belongs to
    #[must_use]
    pub fn family(&self) -> LabelFamily {
        match self {
            Self::Speed(_) => LabelFamily::Speed,
            Self::Vehicle(_) => LabelFamily::Vehicle,
            Self::Route(_) => LabelFamily::Route,
        }
    }

    /// Label string, `None` for a declined classification
    #[must_use]
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::Speed(mode) => Some(mode.as_str()),
            Self::Vehicle(mode) => mode.map(VehicleMode::as_str),
            Self::Route(kind) => kind.map(RouteKind::as_str),
        }
    }

    /// The evaluation mode this label names, if any
    #[must_use]
    pub fn transport_mode(&self) -> Option<TransportMode> {
        match self {
            Self::Speed(mode) => mode.transport_mode(),
            Self::Vehicle(mode) => mode.map(TransportMode::from),
            Self::Route(_) => None,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label().unwrap_or("null"))
    }
}

/// Trait for all trajectory classifiers
pub trait TrajectoryClassifier: Send + Sync {
    /// Classify a trajectory
    fn classify(&self, samples: &[Sample]) -> Classification;

    /// Get classifier name
    fn name(&self) -> &str;

    /// Family of every [`Classification`] this classifier returns
    fn family(&self) -> LabelFamily;
}

/// Bucket a speed in km/h into a speed mode
///
/// NaN falls through every comparison and lands in `Unknown`.
#[must_use]
pub fn speed_bucket(speed_kmh: f64, thresholds: &SpeedThresholds) -> SpeedMode {
    if speed_kmh < thresholds.walking_max {
        SpeedMode::Walking
    } else if speed_kmh < thresholds.cycling_max {
        SpeedMode::Cycling
    } else if speed_kmh < thresholds.road_vehicle_max {
        SpeedMode::BusOrCar
    } else if speed_kmh < thresholds.train_max {
        SpeedMode::Train
    } else {
        SpeedMode::Unknown
    }
}

/// Names accepted by [`create_classifier`]
pub const CLASSIFIER_NAMES: [&str; 4] = ["baseline", "percentile95", "stop-pattern", "heading-change"];

/// Create a classifier with default thresholds by name
///
/// `percentile:<p>` selects a percentile other than 95.
///
/// # Errors
///
/// Returns [`Error::UnknownClassifier`] for an unrecognised name and
/// [`Error::InvalidInput`] for an out-of-range percentile.
pub fn create_classifier(classifier_type: &str) -> Result<Box<dyn TrajectoryClassifier>> {
    let normalized = classifier_type.trim().to_lowercase().replace('_', "-");
    let mut parts = normalized.splitn(2, ':');
    let kind = parts.next().unwrap_or_default();
    let param = parts.next();

    match (kind, param) {
        ("baseline" | "max-speed", None) => Ok(Box::new(BaselineClassifier::default())),
        ("percentile95" | "p95", None) => Ok(Box::new(PercentileClassifier::default())),
        ("percentile", param) => {
            let p = match param {
                Some(raw) => raw
                    .parse::<f64>()
                    .map_err(|_| Error::InvalidInput(format!("Invalid percentile: {raw}")))?,
                None => DEFAULT_SPEED_PERCENTILE,
            };
            PercentileClassifier::with_percentile(p, SpeedThresholds::default())
                .map(|c| Box::new(c) as Box<dyn TrajectoryClassifier>)
        }
        ("stop-pattern" | "stops", None) => Ok(Box::new(StopPatternClassifier::default())),
        ("heading-change" | "heading", None) => Ok(Box::new(HeadingChangeClassifier::default())),
        _ => Err(Error::UnknownClassifier(classifier_type.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_bucket_boundaries() {
        let t = SpeedThresholds::default();
        assert_eq!(speed_bucket(0.0, &t), SpeedMode::Walking);
        assert_eq!(speed_bucket(6.999, &t), SpeedMode::Walking);
        assert_eq!(speed_bucket(7.0, &t), SpeedMode::Cycling);
        assert_eq!(speed_bucket(25.0, &t), SpeedMode::BusOrCar);
        assert_eq!(speed_bucket(80.0, &t), SpeedMode::Train);
        assert_eq!(speed_bucket(200.0, &t), SpeedMode::Unknown);
        assert_eq!(speed_bucket(f64::NAN, &t), SpeedMode::Unknown);
        assert_eq!(speed_bucket(-5.0, &t), SpeedMode::Walking);
    }

    #[test]
    fn test_create_classifier() {
        for name in CLASSIFIER_NAMES {
            assert_eq!(create_classifier(name).unwrap().name(), name);
        }
        assert!(create_classifier("p95").is_ok());
        assert!(create_classifier("percentile:90").is_ok());
        assert!(create_classifier("percentile:150").is_err());
        assert!(create_classifier("percentile:abc").is_err());
        assert!(matches!(create_classifier("kalman"), Err(Error::UnknownClassifier(_))));
    }

    #[test]
    fn test_family_matches_output() {
        let samples: Vec<Sample> = (0..5)
            .map(|i| Sample::new(i, 0.0, 0.0).with_speed(40.0).with_heading(0.0))
            .collect();
        for name in CLASSIFIER_NAMES {
            let classifier = create_classifier(name).unwrap();
            assert_eq!(classifier.classify(&samples).family(), classifier.family(), "{name}");
            assert_eq!(classifier.classify(&[]).family(), classifier.family(), "{name}");
        }
        assert_eq!(create_classifier("heading").unwrap().family(), LabelFamily::Route);
    }

    #[test]
    fn test_classification_display() {
        assert_eq!(Classification::Vehicle(None).to_string(), "null");
        assert_eq!(Classification::Speed(SpeedMode::BusOrCar).to_string(), "bus-or-car");
        assert_eq!(
            Classification::Vehicle(Some(VehicleMode::Bus)).transport_mode(),
            Some(TransportMode::Bus)
        );
        assert_eq!(Classification::Route(Some(RouteKind::Uncertain)).transport_mode(), None);
    }
}
