//! End-to-end tests: dataset in, evaluation report out

use motion_classifier::config::Config;
use motion_classifier::dataset::{self, LabeledTrajectory};
use motion_classifier::labels::TransportMode;
use motion_classifier::report::{evaluate, CASCADE_NAME};
use motion_classifier::synthetic::TrajectoryGenerator;

fn synthetic_dataset(per_mode: usize) -> Vec<LabeledTrajectory> {
    let mut generator = TrajectoryGenerator::new(2024);
    TransportMode::ALL
        .iter()
        .flat_map(|&mode| {
            generator
                .generate_many(mode, per_mode, 150)
                .into_iter()
                .enumerate()
                .map(move |(i, samples)| LabeledTrajectory::new(format!("{mode}-{i}"), mode, samples))
                .collect::<Vec<_>>()
        })
        .collect()
}

#[test]
fn test_report_covers_every_classifier() {
    let data = synthetic_dataset(4);
    let report = evaluate(&Config::default(), &data).unwrap();

    assert_eq!(report.trajectories, 20);
    assert_eq!(report.unlabeled, 0);
    for name in ["baseline", "percentile95", "stop-pattern", CASCADE_NAME] {
        assert!(report.classifier(name).is_some(), "missing {name}");
    }
    // Heading-change output is tabulated per actual label, not scored
    assert!(report.classifier("heading-change").is_none());
    assert_eq!(report.routes.len(), 5);
    assert!(report.routes.iter().all(|row| {
        row.fixed_route + row.variable_route + row.uncertain + row.declined == 4
    }));
}

#[test]
fn test_cascade_scores_vehicle_modes() {
    let data = synthetic_dataset(4);
    let report = evaluate(&Config::default(), &data).unwrap();

    // Speed classifiers can never name bus or car, so those pairs are dropped
    let p95 = report.classifier("percentile95").unwrap();
    assert_eq!(p95.matrix.dropped(), 8);
    assert_eq!(p95.matrix.get(TransportMode::Train, TransportMode::Train), 4);

    let cascade = report.classifier(CASCADE_NAME).unwrap();
    assert_eq!(cascade.matrix.total(), 20);
    assert!((cascade.accuracy - 1.0).abs() < 1e-12, "accuracy {}", cascade.accuracy);

    // Stop-pattern declines walking, cycling and train
    let stops = report.classifier("stop-pattern").unwrap();
    assert_eq!(stops.declined, 12);
}

#[test]
fn test_unlabeled_trajectories_are_not_scored() {
    let json = r#"[
        {"id": "a", "label": "walking", "samples": [
            {"timestamp": 0, "latitude": 0.0, "longitude": 0.0, "speedKmh": 4.0},
            {"timestamp": 1, "latitude": 0.0, "longitude": 0.0, "speedKmh": 5.0}
        ]},
        {"samples": [
            {"timestamp": 0, "latitude": 0.0, "longitude": 0.0, "speed": 30.0}
        ]}
    ]"#;
    let data = dataset::from_json(json).unwrap();
    let report = evaluate(&Config::default(), &data).unwrap();

    assert_eq!(report.trajectories, 2);
    assert_eq!(report.unlabeled, 1);
    assert_eq!(report.classifier("baseline").unwrap().matrix.total(), 1);
}

#[test]
fn test_report_renders() {
    let report = evaluate(&Config::default(), &synthetic_dataset(1)).unwrap();
    let text = report.render_text();
    assert!(text.contains("percentile95"));
    assert!(text.contains(CASCADE_NAME));

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["trajectories"], 5);
}
