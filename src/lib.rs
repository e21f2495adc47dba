//! Rule-based transportation mode classification for GPS trajectories.
//!
//! This library guesses how a journey was made (walking, cycling, bus, car
//! or train) from a sequence of GPS fixes, using a handful of small,
//! deterministic heuristics, and scores those heuristics against labelled
//! data:
//! - Geospatial primitives (haversine distance, bearing)
//! - Trajectory statistics (percentiles, heading changes, stop detection)
//! - Four classifiers sharing one input contract
//! - A confusion-matrix evaluation engine
//!
//! Every function in the numeric core is pure and total: empty or
//! single-sample trajectories produce sentinel labels, never panics.
//!
//! # Examples
//!
//! ## Classifying a trajectory
//!
//! ```
//! use motion_classifier::classifiers::{BaselineClassifier, PercentileClassifier};
//! use motion_classifier::labels::SpeedMode;
//! use motion_classifier::trajectory::Sample;
//!
//! let mut speeds = vec![4.5; 20];
//! speeds.push(60.0);
//! let samples: Vec<Sample> = speeds
//!     .iter()
//!     .enumerate()
//!     .map(|(i, &v)| Sample::new(i as i64, 48.1, 11.5).with_speed(v))
//!     .collect();
//!
//! // One spurious fix is enough to fool the max-speed rule
//! assert_eq!(BaselineClassifier::default().label(&samples), SpeedMode::BusOrCar);
//! assert_eq!(PercentileClassifier::default().label(&samples), SpeedMode::Walking);
//! ```
//!
//! ## Selecting classifiers by name
//!
//! ```
//! use motion_classifier::classifiers::create_classifier;
//! use motion_classifier::synthetic::TrajectoryGenerator;
//! use motion_classifier::labels::TransportMode;
//!
//! # fn main() -> motion_classifier::Result<()> {
//! let train = TrajectoryGenerator::new(42).generate(TransportMode::Train, 120);
//! let classifier = create_classifier("heading-change")?;
//! println!("{}: {}", classifier.name(), classifier.classify(&train));
//! # Ok(())
//! # }
//! ```
//!
//! ## Scoring predictions
//!
//! ```
//! use motion_classifier::evaluation::ConfusionMatrix;
//! use motion_classifier::labels::TransportMode::{Bus, Car, Cycling, Walking};
//!
//! let matrix = ConfusionMatrix::from_pairs(&[
//!     (Walking, Walking),
//!     (Walking, Walking),
//!     (Cycling, Cycling),
//!     (Bus, Car),
//! ]);
//! assert_eq!(matrix.accuracy(), 0.75);
//! assert_eq!(matrix.recall(Bus), 0.0);
//! ```

/// Great-circle distance and bearing
pub mod geo;

/// Canonical GPS samples and speed-unit normalization
pub mod trajectory;

/// Percentiles, heading changes and stop detection
pub mod statistics;

/// Label vocabularies
pub mod labels;

/// The four transportation-mode classifiers
pub mod classifiers;

/// Confusion matrix and derived metrics
pub mod evaluation;

/// Seeded synthetic trajectories for calibration
pub mod synthetic;

/// Labelled dataset I/O
pub mod dataset;

/// Whole-suite evaluation reports
pub mod report;

/// Error types and result handling
pub mod error;

/// Constants used throughout the classifiers
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
