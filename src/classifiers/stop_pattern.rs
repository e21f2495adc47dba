use super::{speed_bucket, Classification, LabelFamily, TrajectoryClassifier};
use crate::config::{SpeedThresholds, StopPatternConfig};
use crate::geo::path_length;
use crate::labels::{SpeedMode, VehicleMode};
use crate::statistics::find_stops;
use crate::trajectory::{max_speed, Sample};
use log::trace;

/// Separates buses from cars by how often and how regularly they stop
///
/// Only answers for trajectories whose maximum speed falls in the
/// bus-or-car bucket; walking, cycling and train speeds yield `None`.
#[derive(Debug, Clone, Default)]
pub struct StopPatternClassifier {
    speed: SpeedThresholds,
    config: StopPatternConfig,
}

impl StopPatternClassifier {
    #[must_use]
    pub fn new(speed: SpeedThresholds, config: StopPatternConfig) -> Self {
        Self { speed, config }
    }

    /// Bus or car, or `None` outside the road-vehicle speed range
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn label(&self, samples: &[Sample]) -> Option<VehicleMode> {
        let max = max_speed(samples)?;
        if speed_bucket(max, &self.speed) != SpeedMode::BusOrCar {
            return None;
        }

        let stops = find_stops(samples, self.config.stop_speed_threshold_kmh);
        if stops.is_empty() {
            return Some(VehicleMode::Car);
        }

        let stop_count = stops.len();
        let total_m = path_length(samples);
        let avg_spacing_m = total_m / stop_count.max(1) as f64;
        // A stationary trace with stops has infinite frequency
        let stops_per_km = stop_count as f64 / (total_m / 1000.0);

        trace!(
            "stop pattern: {stop_count} stops over {total_m:.0} m, {stops_per_km:.2}/km, spacing {avg_spacing_m:.0} m"
        );

        if stops_per_km > self.config.bus_frequency_per_km {
            return Some(VehicleMode::Bus);
        }

        let in_band = (self.config.bus_spacing_min_m..=self.config.bus_spacing_max_m).contains(&avg_spacing_m);
        if in_band && stop_count >= self.config.bus_min_stops {
            Some(VehicleMode::Bus)
        } else {
            Some(VehicleMode::Car)
        }
    }
}

impl TrajectoryClassifier for StopPatternClassifier {
    fn classify(&self, samples: &[Sample]) -> Classification {
        Classification::Vehicle(self.label(samples))
    }

    fn name(&self) -> &str {
        "stop-pattern"
    }

    fn family(&self) -> LabelFamily {
        LabelFamily::Vehicle
    }
}
