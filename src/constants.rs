//! Constants used throughout the classifiers

/// Mean spherical Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Conversion factor from m/s to km/h
pub const MS_TO_KMH: f64 = 3.6;

/// Upper bound (exclusive) of the walking speed bucket, km/h
pub const WALKING_MAX_KMH: f64 = 7.0;
/// Upper bound (exclusive) of the cycling speed bucket, km/h
pub const CYCLING_MAX_KMH: f64 = 25.0;
/// Upper bound (exclusive) of the bus-or-car speed bucket, km/h
pub const ROAD_VEHICLE_MAX_KMH: f64 = 80.0;
/// Upper bound (exclusive) of the train speed bucket, km/h
pub const TRAIN_MAX_KMH: f64 = 200.0;

/// Percentile used by the outlier-resistant speed classifier
pub const DEFAULT_SPEED_PERCENTILE: f64 = 95.0;

/// Below this speed a sample counts as stopped (0.5 m/s expressed in km/h)
pub const STOP_SPEED_THRESHOLD_KMH: f64 = 0.5 * MS_TO_KMH;

/// Stops per kilometer above which a road vehicle is taken to be a bus
pub const BUS_STOP_FREQUENCY_PER_KM: f64 = 1.0;
/// Canonical bus stop spacing band, meters
pub const BUS_STOP_SPACING_MIN_M: f64 = 300.0;
pub const BUS_STOP_SPACING_MAX_M: f64 = 1000.0;
/// Minimum stop count for the spacing rule to apply
pub const BUS_MIN_STOPS: usize = 2;

/// Heading-change thresholds, degrees
pub const FIXED_ROUTE_MAX_MEAN_DEG: f64 = 3.0;
pub const FIXED_ROUTE_MAX_STD_DEG: f64 = 15.0;
pub const VARIABLE_ROUTE_MIN_MEAN_DEG: f64 = 5.0;
pub const VARIABLE_ROUTE_MIN_STD_DEG: f64 = 20.0;

/// Minimum number of samples carrying a heading for route classification
pub const MIN_HEADING_SAMPLES: usize = 2;
