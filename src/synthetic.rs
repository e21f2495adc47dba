//! Synthetic trajectory generation for calibration and tests.
//!
//! Each mode gets a speed and steering profile loosely modeled on real
//! traces: pedestrians wander, trains hold a line, buses stop every few
//! hundred meters and cars only at the occasional light. Output is fully
//! determined by the seed.

use crate::constants::EARTH_RADIUS_M;
use crate::labels::TransportMode;
use crate::trajectory::Sample;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

/// Speed and steering profile for one mode
#[derive(Debug, Clone, Copy)]
struct Profile {
    /// Cruising speed range, km/h
    cruise_kmh: (f64, f64),
    /// Per-step speed jitter, km/h
    speed_noise: f64,
    /// Per-step heading jitter, degrees
    heading_noise_deg: f64,
    /// Chance of a sharp turn on any step
    turn_probability: f64,
    /// Meters between scheduled stops, `None` for no schedule
    stop_spacing_m: Option<(f64, f64)>,
    /// Chance of an unscheduled stop on any step
    random_stop_probability: f64,
    /// Samples spent standing at a stop
    stop_length: (usize, usize),
}

fn profile(mode: TransportMode) -> Profile {
    match mode {
        TransportMode::Walking => Profile {
            cruise_kmh: (3.5, 5.0),
            speed_noise: 0.4,
            heading_noise_deg: 12.0,
            turn_probability: 0.05,
            stop_spacing_m: None,
            random_stop_probability: 0.0,
            stop_length: (0, 0),
        },
        TransportMode::Cycling => Profile {
            cruise_kmh: (13.0, 19.0),
            speed_noise: 1.5,
            heading_noise_deg: 6.0,
            turn_probability: 0.03,
            stop_spacing_m: None,
            random_stop_probability: 0.0,
            stop_length: (0, 0),
        },
        TransportMode::Bus => Profile {
            cruise_kmh: (28.0, 40.0),
            speed_noise: 2.0,
            heading_noise_deg: 1.0,
            turn_probability: 0.01,
            stop_spacing_m: Some((350.0, 600.0)),
            random_stop_probability: 0.0,
            stop_length: (2, 4),
        },
        TransportMode::Car => Profile {
            cruise_kmh: (40.0, 65.0),
            speed_noise: 3.0,
            heading_noise_deg: 8.0,
            turn_probability: 0.08,
            stop_spacing_m: None,
            random_stop_probability: 0.002,
            stop_length: (2, 5),
        },
        TransportMode::Train => Profile {
            cruise_kmh: (110.0, 150.0),
            speed_noise: 2.0,
            heading_noise_deg: 0.3,
            turn_probability: 0.0,
            stop_spacing_m: None,
            random_stop_probability: 0.0,
            stop_length: (0, 0),
        },
    }
}

/// Seeded generator of per-mode synthetic trajectories
pub struct TrajectoryGenerator {
    rng: StdRng,
    interval_s: i64,
    origin: (f64, f64),
}

impl TrajectoryGenerator {
    /// Create a generator sampling every 10 seconds from a fixed origin
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            interval_s: 10,
            origin: (48.137, 11.575),
        }
    }

    /// Change the sampling interval in seconds (minimum 1)
    #[must_use]
    pub fn with_interval(mut self, interval_s: i64) -> Self {
        self.interval_s = interval_s.max(1);
        self
    }

    /// Change the starting position
    #[must_use]
    pub fn with_origin(mut self, latitude: f64, longitude: f64) -> Self {
        self.origin = (latitude, longitude);
        self
    }

    /// Generate one trajectory of `len` samples for `mode`
    #[allow(clippy::cast_precision_loss)]
    pub fn generate(&mut self, mode: TransportMode, len: usize) -> Vec<Sample> {
        let p = profile(mode);
        let dt = self.interval_s as f64;

        let cruise = self.rng.gen_range(p.cruise_kmh.0..=p.cruise_kmh.1);
        let mut heading = self.rng.gen_range(0.0..TAU);
        let (mut lat, mut lon) = self.origin;
        let mut until_stop = p.stop_spacing_m.map(|range| self.sample_range(range));
        let mut stopped_for = 0usize;

        let mut samples = Vec::with_capacity(len);
        for i in 0..len {
            let speed = if stopped_for > 0 {
                stopped_for -= 1;
                0.0
            } else {
                let noise = self.rng.gen_range(-p.speed_noise..=p.speed_noise);
                (cruise + noise).max(0.0)
            };

            if self.rng.gen_bool(p.turn_probability) {
                heading += self.rng.gen_range(-90f64..=90.0).to_radians();
            } else if p.heading_noise_deg > 0.0 {
                heading += self.rng.gen_range(-p.heading_noise_deg..=p.heading_noise_deg).to_radians();
            }
            heading = heading.rem_euclid(TAU);

            samples.push(
                Sample::new(i as i64 * self.interval_s, lat, lon)
                    .with_speed(speed)
                    .with_heading(heading),
            );

            let step_m = speed / 3.6 * dt;
            let (next_lat, next_lon) = advance(lat, lon, heading, step_m);
            lat = next_lat;
            lon = next_lon;

            if let Some(remaining) = until_stop.as_mut() {
                *remaining -= step_m;
                if *remaining <= 0.0 && stopped_for == 0 {
                    stopped_for = self.stop_length(p);
                    until_stop = p.stop_spacing_m.map(|range| self.sample_range(range));
                }
            }
            if stopped_for == 0 && p.random_stop_probability > 0.0 && self.rng.gen_bool(p.random_stop_probability) {
                stopped_for = self.stop_length(p);
            }
        }

        samples
    }

    /// Generate `count` trajectories for `mode`
    pub fn generate_many(&mut self, mode: TransportMode, count: usize, len: usize) -> Vec<Vec<Sample>> {
        (0..count).map(|_| self.generate(mode, len)).collect()
    }

    /// Trajectory whose heading is drawn uniformly at random on every step
    #[allow(clippy::cast_precision_loss)]
    pub fn random_walk(&mut self, len: usize, speed_kmh: f64) -> Vec<Sample> {
        let (mut lat, mut lon) = self.origin;
        let mut samples = Vec::with_capacity(len);
        for i in 0..len {
            let heading = self.rng.gen_range(0.0..TAU);
            samples.push(
                Sample::new(i as i64 * self.interval_s, lat, lon)
                    .with_speed(speed_kmh)
                    .with_heading(heading),
            );
            (lat, lon) = advance(lat, lon, heading, speed_kmh / 3.6 * self.interval_s as f64);
        }
        samples
    }

    fn sample_range(&mut self, range: (f64, f64)) -> f64 {
        self.rng.gen_range(range.0..=range.1)
    }

    fn stop_length(&mut self, p: Profile) -> usize {
        self.rng.gen_range(p.stop_length.0..=p.stop_length.1)
    }
}

/// Move `distance_m` from a point along `heading`, flat-earth approximation
fn advance(lat: f64, lon: f64, heading: f64, distance_m: f64) -> (f64, f64) {
    let dlat = distance_m * heading.cos() / EARTH_RADIUS_M;
    let dlon = distance_m * heading.sin() / (EARTH_RADIUS_M * lat.to_radians().cos());
    (lat + dlat.to_degrees(), lon + dlon.to_degrees())
}
