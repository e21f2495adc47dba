//! Confusion matrix and the metrics derived from it.
//!
//! Rows are the actual mode, columns the predicted mode, both over the five
//! [`TransportMode`] labels. Pairs naming any other label (for example
//! `bus-or-car` or `unknown` from the speed classifiers) are not counted;
//! they are tallied in [`ConfusionMatrix::dropped`] instead.

use crate::labels::TransportMode;
use log::debug;
use serde::Serialize;

const N: usize = TransportMode::ALL.len();

/// Actual × predicted count table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    cells: [[u64; N]; N],
    dropped: u64,
}

/// Precision, recall and F1 for one label
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelMetrics {
    pub label: TransportMode,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of pairs whose actual label is this one
    pub support: u64,
}

impl ConfusionMatrix {
    /// Build a matrix from typed pairs
    #[must_use]
    pub fn from_pairs(pairs: &[(TransportMode, TransportMode)]) -> Self {
        let mut matrix = Self::default();
        for &(actual, predicted) in pairs {
            matrix.cells[actual.index()][predicted.index()] += 1;
        }
        matrix
    }

    /// Build a matrix from label strings, ignoring out-of-vocabulary pairs
    pub fn from_label_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut matrix = Self::default();
        for (actual, predicted) in pairs {
            match (actual.parse::<TransportMode>(), predicted.parse::<TransportMode>()) {
                (Ok(a), Ok(p)) => matrix.cells[a.index()][p.index()] += 1,
                _ => {
                    debug!("Ignoring out-of-vocabulary pair ({actual}, {predicted})");
                    matrix.dropped += 1;
                }
            }
        }
        matrix
    }

    /// Count for one cell
    #[must_use]
    pub fn get(&self, actual: TransportMode, predicted: TransportMode) -> u64 {
        self.cells[actual.index()][predicted.index()]
    }

    /// Sum of every cell
    #[must_use]
    pub fn total(&self) -> u64 {
        self.cells.iter().flatten().sum()
    }

    /// Pairs ignored because a label was outside the vocabulary
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    fn row_sum(&self, actual: TransportMode) -> u64 {
        self.cells[actual.index()].iter().sum()
    }

    fn column_sum(&self, predicted: TransportMode) -> u64 {
        self.cells.iter().map(|row| row[predicted.index()]).sum()
    }

    /// Fraction of pairs on the diagonal, 0 for an empty matrix
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let correct: u64 = (0..N).map(|i| self.cells[i][i]).sum();
        correct as f64 / total as f64
    }

    /// Of the pairs predicted as `label`, the fraction that really were
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn precision(&self, label: TransportMode) -> f64 {
        let predicted = self.column_sum(label);
        if predicted == 0 {
            return 0.0;
        }
        self.get(label, label) as f64 / predicted as f64
    }

    /// Of the pairs that really were `label`, the fraction predicted as such
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn recall(&self, label: TransportMode) -> f64 {
        let actual = self.row_sum(label);
        if actual == 0 {
            return 0.0;
        }
        self.get(label, label) as f64 / actual as f64
    }

    /// Harmonic mean of precision and recall for `label`
    #[must_use]
    pub fn f1(&self, label: TransportMode) -> f64 {
        f1_score(self.precision(label), self.recall(label))
    }

    /// Metrics for a single label
    #[must_use]
    pub fn label_metrics(&self, label: TransportMode) -> LabelMetrics {
        let precision = self.precision(label);
        let recall = self.recall(label);
        LabelMetrics {
            label,
            precision,
            recall,
            f1: f1_score(precision, recall),
            support: self.row_sum(label),
        }
    }

    /// Metrics for every label, in matrix order
    #[must_use]
    pub fn all_label_metrics(&self) -> Vec<LabelMetrics> {
        TransportMode::ALL.iter().map(|&label| self.label_metrics(label)).collect()
    }

    /// Unweighted mean F1 over labels that occur as actual or predicted
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn macro_f1(&self) -> f64 {
        let present: Vec<f64> = TransportMode::ALL
            .iter()
            .filter(|&&label| self.row_sum(label) > 0 || self.column_sum(label) > 0)
            .map(|&label| self.f1(label))
            .collect();
        if present.is_empty() {
            return 0.0;
        }
        present.iter().sum::<f64>() / present.len() as f64
    }
}

/// `2pr / (p + r)`, 0 when both are 0
#[must_use]
pub fn f1_score(precision: f64, recall: f64) -> f64 {
    let sum = precision + recall;
    if sum <= 0.0 {
        0.0
    } else {
        2.0 * precision * recall / sum
    }
}
