//! Great-circle distance and bearing between GPS samples.

use crate::constants::EARTH_RADIUS_M;
use crate::trajectory::Sample;
use std::f64::consts::TAU;

/// Haversine distance between two samples in meters
#[must_use]
pub fn distance(a: &Sample, b: &Sample) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);

    // Rounding can push h slightly past 1 for antipodal points
    2.0 * EARTH_RADIUS_M * h.clamp(0.0, 1.0).sqrt().asin()
}

/// Initial compass bearing from `a` to `b` in radians, [0, 2π)
///
/// Identical points yield 0.
#[must_use]
pub fn bearing(a: &Sample, b: &Sample) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();

    let theta = y.atan2(x).rem_euclid(TAU);
    if theta >= TAU {
        0.0
    } else {
        theta
    }
}

/// Total length of a trajectory in meters
#[must_use]
pub fn path_length(samples: &[Sample]) -> f64 {
    samples.windows(2).map(|pair| distance(&pair[0], &pair[1])).sum()
}
