//! Helper functions and utilities for tests

#![allow(dead_code)]

use motion_classifier::trajectory::Sample;

/// Meters per degree of latitude on the crate's spherical Earth
pub const METERS_PER_DEGREE: f64 = 111_194.93;

/// Stationary trajectory with the given speeds, one sample per second
pub fn trajectory_from_speeds(speeds: &[f64]) -> Vec<Sample> {
    speeds
        .iter()
        .enumerate()
        .map(|(i, &v)| Sample::new(i as i64, 48.137, 11.575).with_speed(v))
        .collect()
}

/// Due-north trajectory advancing `step_m` meters per sample, 10 s apart
pub fn northbound(speeds: &[f64], step_m: f64) -> Vec<Sample> {
    let step_deg = step_m / METERS_PER_DEGREE;
    speeds
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            Sample::new(i as i64 * 10, 48.0 + i as f64 * step_deg, 11.0)
                .with_speed(v)
                .with_heading(0.0)
        })
        .collect()
}

/// Trajectory with the given headings in degrees
pub fn trajectory_from_headings(headings_deg: &[f64]) -> Vec<Sample> {
    headings_deg
        .iter()
        .enumerate()
        .map(|(i, &h)| Sample::new(i as i64, 0.0, 0.0).with_speed(30.0).with_heading(h.to_radians()))
        .collect()
}
