//! Classifier agreement with seeded synthetic trajectories

use motion_classifier::classifiers::{HeadingChangeClassifier, PercentileClassifier, StopPatternClassifier};
use motion_classifier::labels::{RouteKind, SpeedMode, TransportMode, VehicleMode};
use motion_classifier::synthetic::TrajectoryGenerator;

const SEEDS: u64 = 10;
const LEN: usize = 200;

fn trajectories(mode: TransportMode) -> Vec<Vec<motion_classifier::trajectory::Sample>> {
    (0..SEEDS)
        .map(|seed| TrajectoryGenerator::new(seed).generate(mode, LEN))
        .collect()
}

#[test]
fn test_speed_buckets_match_generated_modes() {
    let classifier = PercentileClassifier::default();
    let expected = [
        (TransportMode::Walking, SpeedMode::Walking),
        (TransportMode::Cycling, SpeedMode::Cycling),
        (TransportMode::Bus, SpeedMode::BusOrCar),
        (TransportMode::Car, SpeedMode::BusOrCar),
        (TransportMode::Train, SpeedMode::Train),
    ];

    for (mode, speed_mode) in expected {
        for samples in trajectories(mode) {
            assert_eq!(classifier.label(&samples), speed_mode, "{mode}");
        }
    }
}

#[test]
fn test_stop_pattern_separates_bus_from_car() {
    let classifier = StopPatternClassifier::default();

    for samples in trajectories(TransportMode::Bus) {
        assert_eq!(classifier.label(&samples), Some(VehicleMode::Bus));
    }
    for samples in trajectories(TransportMode::Car) {
        assert_eq!(classifier.label(&samples), Some(VehicleMode::Car));
    }
    for samples in trajectories(TransportMode::Train) {
        assert_eq!(classifier.label(&samples), None);
    }
}

#[test]
fn test_trains_follow_fixed_routes() {
    let classifier = HeadingChangeClassifier::default();
    for samples in trajectories(TransportMode::Train) {
        assert_eq!(classifier.label(&samples), Some(RouteKind::FixedRoute));
    }
}

#[test]
fn test_generated_trajectories_are_deterministic() {
    let mut a = TrajectoryGenerator::new(99).with_interval(3);
    let mut b = TrajectoryGenerator::new(99).with_interval(3);
    assert_eq!(
        a.generate_many(TransportMode::Cycling, 3, 40),
        b.generate_many(TransportMode::Cycling, 3, 40)
    );
}
