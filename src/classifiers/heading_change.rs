use super::{Classification, LabelFamily, TrajectoryClassifier};
use crate::config::HeadingConfig;
use crate::labels::RouteKind;
use crate::statistics::{heading_changes, Statistics};
use crate::trajectory::Sample;

/// Separates fixed-route vehicles (train, bus) from free navigation (car)
/// by the spread of step-to-step heading changes
///
/// The fixed and variable thresholds leave a band between them that maps
/// to `Uncertain`.
#[derive(Debug, Clone, Default)]
pub struct HeadingChangeClassifier {
    config: HeadingConfig,
}

impl HeadingChangeClassifier {
    #[must_use]
    pub fn new(config: HeadingConfig) -> Self {
        Self { config }
    }

    /// Mean and standard deviation of heading changes in degrees
    #[must_use]
    pub fn heading_change_stats(&self, samples: &[Sample]) -> Option<Statistics> {
        let headed = samples.iter().filter(|s| s.heading.is_some()).count();
        if headed < self.config.min_samples.max(2) {
            return None;
        }

        let degrees: Vec<f64> = heading_changes(samples).into_iter().map(f64::to_degrees).collect();
        Statistics::from_values(&degrees)
    }

    /// Route kind, or `None` without enough adjacent headed samples
    #[must_use]
    pub fn label(&self, samples: &[Sample]) -> Option<RouteKind> {
        let stats = self.heading_change_stats(samples)?;
        let c = &self.config;

        Some(if stats.mean < c.fixed_max_mean_deg && stats.std_dev < c.fixed_max_std_deg {
            RouteKind::FixedRoute
        } else if stats.mean > c.variable_min_mean_deg || stats.std_dev > c.variable_min_std_deg {
            RouteKind::VariableRoute
        } else {
            RouteKind::Uncertain
        })
    }
}

impl TrajectoryClassifier for HeadingChangeClassifier {
    fn classify(&self, samples: &[Sample]) -> Classification {
        Classification::Route(self.label(samples))
    }

    fn name(&self) -> &str {
        "heading-change"
    }

    fn family(&self) -> LabelFamily {
        LabelFamily::Route
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_headings_deg(headings: &[f64]) -> Vec<Sample> {
        headings
            .iter()
            .enumerate()
            .map(|(i, &h)| Sample::new(i as i64, 0.0, 0.0).with_heading(h.to_radians()))
            .collect()
    }

    #[test]
    fn test_needs_two_headings() {
        let classifier = HeadingChangeClassifier::default();
        assert_eq!(classifier.label(&[]), None);
        assert_eq!(classifier.label(&with_headings_deg(&[90.0])), None);
        assert_eq!(classifier.label(&[Sample::new(0, 0.0, 0.0), Sample::new(1, 0.0, 0.0)]), None);
    }

    #[test]
    fn test_missing_heading_is_not_bridged() {
        let classifier = HeadingChangeClassifier::default();
        let samples = vec![
            Sample::new(0, 0.0, 0.0).with_heading(0.0),
            Sample::new(1, 0.0, 0.0),
            Sample::new(2, 0.0, 0.0).with_heading(90f64.to_radians()),
        ];
        assert_eq!(classifier.heading_change_stats(&samples), None);
        assert_eq!(classifier.label(&samples), None);
    }

    #[test]
    fn test_constant_heading_is_fixed_route() {
        let classifier = HeadingChangeClassifier::default();
        assert_eq!(classifier.label(&with_headings_deg(&[45.0; 20])), Some(RouteKind::FixedRoute));
    }

    #[test]
    fn test_zigzag_is_variable_route() {
        let classifier = HeadingChangeClassifier::default();
        let headings: Vec<f64> = (0..20).map(|i| if i % 2 == 0 { 0.0 } else { 90.0 }).collect();
        assert_eq!(classifier.label(&with_headings_deg(&headings)), Some(RouteKind::VariableRoute));
    }

    #[test]
    fn test_dead_zone_is_uncertain() {
        // Steady 4° per step: mean 4, std 0, between the two cutoffs
        let classifier = HeadingChangeClassifier::default();
        let headings: Vec<f64> = (0..20).map(|i| f64::from(i) * 4.0).collect();
        assert_eq!(classifier.label(&with_headings_deg(&headings)), Some(RouteKind::Uncertain));
    }

    #[test]
    fn test_stats_in_degrees() {
        let classifier = HeadingChangeClassifier::default();
        let stats = classifier
            .heading_change_stats(&with_headings_deg(&[350.0, 10.0, 30.0]))
            .unwrap();
        assert!((stats.mean - 20.0).abs() < 1e-9);
        assert!(stats.std_dev.abs() < 1e-9);
    }
}
