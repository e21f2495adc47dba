//! Scores every classifier against a labelled dataset.

use crate::classifiers::{
    Classification, LabelFamily, PercentileClassifier, StopPatternClassifier, TrajectoryClassifier,
};
use crate::config::Config;
use crate::dataset::LabeledTrajectory;
use crate::evaluation::{ConfusionMatrix, LabelMetrics};
use crate::labels::{RouteKind, SpeedMode, TransportMode};
use crate::trajectory::Sample;
use crate::Result;
use log::{debug, info};
use serde::Serialize;
use std::fmt::Write as _;

/// Name of the percentile classifier refined by the stop-pattern classifier
pub const CASCADE_NAME: &str = "percentile95+stop-pattern";

/// Metrics for one classifier over the dataset
#[derive(Debug, Clone, Serialize)]
pub struct ClassifierReport {
    pub name: String,
    pub matrix: ConfusionMatrix,
    pub accuracy: f64,
    pub macro_f1: f64,
    pub labels: Vec<LabelMetrics>,
    /// Trajectories the classifier declined to label
    pub declined: u64,
}

/// Heading-classifier outcomes for trajectories of one actual label
#[derive(Debug, Clone, Default, Serialize)]
pub struct RouteDistribution {
    pub classifier: String,
    pub actual: String,
    pub fixed_route: u64,
    pub variable_route: u64,
    pub uncertain: u64,
    pub declined: u64,
}

/// Full evaluation of the suite
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub trajectories: usize,
    /// Trajectories without a ground-truth label, classified but not scored
    pub unlabeled: usize,
    pub classifiers: Vec<ClassifierReport>,
    pub routes: Vec<RouteDistribution>,
}

/// Speed label refined to bus or car by the stop pattern where possible
#[must_use]
pub fn cascade_label(speed: &PercentileClassifier, stops: &StopPatternClassifier, samples: &[Sample]) -> Option<String> {
    match speed.label(samples) {
        SpeedMode::BusOrCar => stops.label(samples).map(|mode| TransportMode::from(mode).to_string()),
        other => Some(other.to_string()),
    }
}

impl ClassifierReport {
    #[allow(clippy::cast_possible_truncation)]
    fn new(name: &str, pairs: &[(&str, Option<String>)]) -> Self {
        let declined = pairs.iter().filter(|(_, predicted)| predicted.is_none()).count() as u64;
        let matrix = ConfusionMatrix::from_label_pairs(
            pairs
                .iter()
                .filter_map(|(actual, predicted)| predicted.as_deref().map(|p| (*actual, p))),
        );
        debug!("{name}: {} scored, {} dropped, {declined} declined", matrix.total(), matrix.dropped());

        Self {
            name: name.to_string(),
            accuracy: matrix.accuracy(),
            macro_f1: matrix.macro_f1(),
            labels: matrix.all_label_metrics(),
            matrix,
            declined,
        }
    }
}

impl RouteDistribution {
    fn record(&mut self, kind: Option<RouteKind>) {
        match kind {
            Some(RouteKind::FixedRoute) => self.fixed_route += 1,
            Some(RouteKind::VariableRoute) => self.variable_route += 1,
            Some(RouteKind::Uncertain) => self.uncertain += 1,
            None => self.declined += 1,
        }
    }
}

/// Run every configured classifier over `dataset`
///
/// # Errors
///
/// Returns an error if the configuration cannot build the classifiers
pub fn evaluate(config: &Config, dataset: &[LabeledTrajectory]) -> Result<EvaluationReport> {
    let classifiers = config.create_all()?;
    let labeled: Vec<&LabeledTrajectory> = dataset.iter().filter(|t| t.label.is_some()).collect();
    info!(
        "Evaluating {} classifiers on {} labelled trajectories",
        classifiers.len(),
        labeled.len()
    );

    let mut reports = Vec::new();
    let mut routes: Vec<RouteDistribution> = Vec::new();

    for classifier in &classifiers {
        let outputs: Vec<(&str, Classification)> = labeled
            .iter()
            .filter_map(|t| t.label.as_deref().map(|label| (label, classifier.classify(&t.samples))))
            .collect();

        // Route kinds do not name a transport mode, so they are tabulated instead
        if classifier.family() == LabelFamily::Route {
            routes.extend(route_distribution(classifier.name(), &outputs));
            continue;
        }

        let pairs: Vec<(&str, Option<String>)> = outputs
            .iter()
            .map(|(actual, c)| (*actual, c.label().map(str::to_string)))
            .collect();
        reports.push(ClassifierReport::new(classifier.name(), &pairs));
    }

    let speed = config.percentile_classifier()?;
    let stops = StopPatternClassifier::new(config.speed.clone(), config.stops.clone());
    let cascade_pairs: Vec<(&str, Option<String>)> = labeled
        .iter()
        .filter_map(|t| t.label.as_deref().map(|label| (label, cascade_label(&speed, &stops, &t.samples))))
        .collect();
    reports.push(ClassifierReport::new(CASCADE_NAME, &cascade_pairs));

    for report in &reports {
        info!("{}: accuracy {:.3}, macro F1 {:.3}", report.name, report.accuracy, report.macro_f1);
    }

    Ok(EvaluationReport {
        trajectories: dataset.len(),
        unlabeled: dataset.len() - labeled.len(),
        classifiers: reports,
        routes,
    })
}

fn route_distribution(name: &str, outputs: &[(&str, Classification)]) -> Vec<RouteDistribution> {
    let mut rows: Vec<RouteDistribution> = Vec::new();
    for (actual, classification) in outputs {
        let Classification::Route(kind) = classification else {
            continue;
        };
        let index = match rows.iter().position(|row| row.actual == *actual) {
            Some(index) => index,
            None => {
                rows.push(RouteDistribution {
                    classifier: name.to_string(),
                    actual: (*actual).to_string(),
                    ..RouteDistribution::default()
                });
                rows.len() - 1
            }
        };
        rows[index].record(*kind);
    }
    rows.sort_by(|a, b| a.actual.cmp(&b.actual));
    rows
}

impl EvaluationReport {
    /// Find a classifier's report by name
    #[must_use]
    pub fn classifier(&self, name: &str) -> Option<&ClassifierReport> {
        self.classifiers.iter().find(|r| r.name == name)
    }

    /// Serialize to pretty JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Plain-text rendering for the terminal
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} trajectories ({} unlabelled)\n",
            self.trajectories, self.unlabeled
        );

        for report in &self.classifiers {
            let _ = writeln!(
                out,
                "== {} ==  accuracy {:.3}  macro-F1 {:.3}  declined {}  dropped {}",
                report.name,
                report.accuracy,
                report.macro_f1,
                report.declined,
                report.matrix.dropped()
            );

            let _ = write!(out, "{:>10}", "actual\\pred");
            for mode in TransportMode::ALL {
                let _ = write!(out, "{:>9}", mode.as_str());
            }
            let _ = writeln!(out);
            for actual in TransportMode::ALL {
                let _ = write!(out, "{:>10} ", actual.as_str());
                for predicted in TransportMode::ALL {
                    let _ = write!(out, "{:>9}", report.matrix.get(actual, predicted));
                }
                let _ = writeln!(out);
            }

            for m in &report.labels {
                let _ = writeln!(
                    out,
                    "  {:<8} precision {:.3}  recall {:.3}  F1 {:.3}  support {}",
                    m.label.as_str(),
                    m.precision,
                    m.recall,
                    m.f1,
                    m.support
                );
            }
            let _ = writeln!(out);
        }

        let mut current: Option<&str> = None;
        for row in &self.routes {
            if current != Some(row.classifier.as_str()) {
                let _ = writeln!(out, "== {} ==", row.classifier);
                current = Some(row.classifier.as_str());
            }
            let _ = writeln!(
                out,
                "  {:<8} fixed {}  variable {}  uncertain {}  declined {}",
                row.actual, row.fixed_route, row.variable_route, row.uncertain, row.declined
            );
        }

        out
    }
}
