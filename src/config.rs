//! Configuration management for the classifier suite

use crate::classifiers::{
    BaselineClassifier, HeadingChangeClassifier, PercentileClassifier, StopPatternClassifier,
    TrajectoryClassifier,
};
use crate::constants::{
    BUS_MIN_STOPS, BUS_STOP_FREQUENCY_PER_KM, BUS_STOP_SPACING_MAX_M, BUS_STOP_SPACING_MIN_M,
    CYCLING_MAX_KMH, DEFAULT_SPEED_PERCENTILE, FIXED_ROUTE_MAX_MEAN_DEG, FIXED_ROUTE_MAX_STD_DEG,
    MIN_HEADING_SAMPLES, ROAD_VEHICLE_MAX_KMH, STOP_SPEED_THRESHOLD_KMH, TRAIN_MAX_KMH,
    VARIABLE_ROUTE_MIN_MEAN_DEG, VARIABLE_ROUTE_MIN_STD_DEG, WALKING_MAX_KMH,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Classifier configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Speed bucket boundaries
    pub speed: SpeedThresholds,

    /// Percentile classifier configuration
    pub percentile: PercentileConfig,

    /// Stop-pattern classifier configuration
    pub stops: StopPatternConfig,

    /// Heading-change classifier configuration
    pub heading: HeadingConfig,
}

/// Upper bounds (exclusive) of each speed bucket, km/h
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedThresholds {
    /// Below this is walking
    pub walking_max: f64,

    /// Below this is cycling
    pub cycling_max: f64,

    /// Below this is bus or car
    pub road_vehicle_max: f64,

    /// Below this is train, at or above is unknown
    pub train_max: f64,
}

/// Percentile classifier parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PercentileConfig {
    /// Percentile of speed to classify on (0-100)
    pub percentile: f64,
}

/// Stop-pattern classifier parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StopPatternConfig {
    /// Speed below which a sample counts as stopped, km/h
    pub stop_speed_threshold_kmh: f64,

    /// Stops per kilometer above which the vehicle is a bus
    pub bus_frequency_per_km: f64,

    /// Lower edge of the bus stop spacing band, meters
    pub bus_spacing_min_m: f64,

    /// Upper edge of the bus stop spacing band, meters
    pub bus_spacing_max_m: f64,

    /// Minimum stops for the spacing band rule
    pub bus_min_stops: usize,
}

/// Heading-change classifier parameters, degrees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingConfig {
    /// Fixed route needs mean change below this
    pub fixed_max_mean_deg: f64,

    /// and standard deviation below this
    pub fixed_max_std_deg: f64,

    /// Variable route when mean change is above this
    pub variable_min_mean_deg: f64,

    /// or standard deviation is above this
    pub variable_min_std_deg: f64,

    /// Minimum samples carrying a heading
    pub min_samples: usize,
}

impl Default for SpeedThresholds {
    fn default() -> Self {
        Self {
            walking_max: WALKING_MAX_KMH,
            cycling_max: CYCLING_MAX_KMH,
            road_vehicle_max: ROAD_VEHICLE_MAX_KMH,
            train_max: TRAIN_MAX_KMH,
        }
    }
}

impl Default for PercentileConfig {
    fn default() -> Self {
        Self {
            percentile: DEFAULT_SPEED_PERCENTILE,
        }
    }
}

impl Default for StopPatternConfig {
    fn default() -> Self {
        Self {
            stop_speed_threshold_kmh: STOP_SPEED_THRESHOLD_KMH,
            bus_frequency_per_km: BUS_STOP_FREQUENCY_PER_KM,
            bus_spacing_min_m: BUS_STOP_SPACING_MIN_M,
            bus_spacing_max_m: BUS_STOP_SPACING_MAX_M,
            bus_min_stops: BUS_MIN_STOPS,
        }
    }
}

impl Default for HeadingConfig {
    fn default() -> Self {
        Self {
            fixed_max_mean_deg: FIXED_ROUTE_MAX_MEAN_DEG,
            fixed_max_std_deg: FIXED_ROUTE_MAX_STD_DEG,
            variable_min_mean_deg: VARIABLE_ROUTE_MIN_MEAN_DEG,
            variable_min_std_deg: VARIABLE_ROUTE_MIN_STD_DEG,
            min_samples: MIN_HEADING_SAMPLES,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load a configuration file and validate it, or the defaults without a path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let config = Self::from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid configuration
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Create a classifier from configuration by name
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown name or an invalid percentile
    pub fn create_classifier(&self, name: &str) -> Result<Box<dyn TrajectoryClassifier>> {
        match name.trim().to_lowercase().replace('_', "-").as_str() {
            "baseline" | "max-speed" => Ok(Box::new(BaselineClassifier::new(self.speed.clone()))),
            "percentile95" | "p95" | "percentile" => Ok(Box::new(self.percentile_classifier()?)),
            "stop-pattern" | "stops" => Ok(Box::new(StopPatternClassifier::new(
                self.speed.clone(),
                self.stops.clone(),
            ))),
            "heading-change" | "heading" => Ok(Box::new(HeadingChangeClassifier::new(self.heading.clone()))),
            _ => Err(Error::UnknownClassifier(name.to_string())),
        }
    }

    /// Every classifier in the suite, configured from this file
    ///
    /// # Errors
    ///
    /// Returns an error if the percentile is out of range
    pub fn create_all(&self) -> Result<Vec<Box<dyn TrajectoryClassifier>>> {
        crate::classifiers::CLASSIFIER_NAMES
            .iter()
            .map(|name| self.create_classifier(name))
            .collect()
    }

    /// Percentile classifier for the configured percentile
    ///
    /// # Errors
    ///
    /// Returns an error if the percentile is out of range
    #[allow(clippy::float_cmp)]
    pub fn percentile_classifier(&self) -> Result<PercentileClassifier> {
        if self.percentile.percentile == DEFAULT_SPEED_PERCENTILE {
            Ok(PercentileClassifier::new(self.speed.clone()))
        } else {
            PercentileClassifier::with_percentile(self.percentile.percentile, self.speed.clone())
        }
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> Result<()> {
        let s = &self.speed;
        let increasing = s.walking_max > 0.0
            && s.walking_max < s.cycling_max
            && s.cycling_max < s.road_vehicle_max
            && s.road_vehicle_max < s.train_max;
        if !increasing {
            return Err(Error::ConfigError(
                "Speed thresholds must be positive and strictly increasing".to_string(),
            ));
        }

        if !(0.0..=100.0).contains(&self.percentile.percentile) {
            return Err(Error::ConfigError(
                "Percentile must be between 0 and 100".to_string(),
            ));
        }

        if self.stops.stop_speed_threshold_kmh <= 0.0 {
            return Err(Error::ConfigError(
                "Stop speed threshold must be greater than 0".to_string(),
            ));
        }
        if self.stops.bus_spacing_min_m > self.stops.bus_spacing_max_m {
            return Err(Error::ConfigError(
                "Bus stop spacing band minimum exceeds maximum".to_string(),
            ));
        }

        let h = &self.heading;
        if h.fixed_max_mean_deg > h.variable_min_mean_deg || h.fixed_max_std_deg > h.variable_min_std_deg {
            return Err(Error::ConfigError(
                "Fixed-route thresholds must not exceed variable-route thresholds".to_string(),
            ));
        }
        if h.min_samples < 2 {
            return Err(Error::ConfigError(
                "Heading classifier needs at least 2 samples".to_string(),
            ));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Transportation mode classifier configuration

# Speed buckets, km/h (upper bounds, exclusive)
speed:
  walking_max: 7.0
  cycling_max: 25.0
  road_vehicle_max: 80.0
  train_max: 200.0

# Outlier-resistant speed classifier
percentile:
  percentile: 95.0

# Bus vs car from stops
stops:
  stop_speed_threshold_kmh: 1.8
  bus_frequency_per_km: 1.0
  bus_spacing_min_m: 300.0
  bus_spacing_max_m: 1000.0
  bus_min_stops: 2

# Fixed vs variable route from heading changes, degrees
heading:
  fixed_max_mean_deg: 3.0
  fixed_max_std_deg: 15.0
  variable_min_mean_deg: 5.0
  variable_min_std_deg: 20.0
  min_samples: 2
"#;
