use super::{speed_bucket, Classification, LabelFamily, TrajectoryClassifier};
use crate::config::SpeedThresholds;
use crate::constants::DEFAULT_SPEED_PERCENTILE;
use crate::labels::SpeedMode;
use crate::statistics::percentile;
use crate::trajectory::{speeds, Sample};
use crate::{Error, Result};

/// Classifies by a high percentile of speed, so a single spurious fix
/// cannot move the trajectory into a faster bucket
#[derive(Debug, Clone)]
pub struct PercentileClassifier {
    percentile: f64,
    thresholds: SpeedThresholds,
    name: String,
}

impl PercentileClassifier {
    /// 95th-percentile classifier with the given bucket thresholds
    #[must_use]
    pub fn new(thresholds: SpeedThresholds) -> Self {
        Self {
            percentile: DEFAULT_SPEED_PERCENTILE,
            thresholds,
            name: "percentile95".to_string(),
        }
    }

    /// Classifier using an arbitrary percentile
    ///
    /// # Errors
    ///
    /// Returns an error if `p` is not within [0, 100]
    pub fn with_percentile(p: f64, thresholds: SpeedThresholds) -> Result<Self> {
        if !(0.0..=100.0).contains(&p) {
            return Err(Error::InvalidInput(format!(
                "Percentile must be between 0 and 100, got {p}"
            )));
        }
        Ok(Self {
            percentile: p,
            thresholds,
            name: format!("percentile{p}"),
        })
    }

    /// Speed mode for a trajectory, `Unknown` when empty
    #[must_use]
    pub fn label(&self, samples: &[Sample]) -> SpeedMode {
        match percentile(&speeds(samples), self.percentile) {
            Some(v) => speed_bucket(v, &self.thresholds),
            None => SpeedMode::Unknown,
        }
    }
}

impl Default for PercentileClassifier {
    fn default() -> Self {
        Self::new(SpeedThresholds::default())
    }
}

impl TrajectoryClassifier for PercentileClassifier {
    fn classify(&self, samples: &[Sample]) -> Classification {
        Classification::Speed(self.label(samples))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn family(&self) -> LabelFamily {
        LabelFamily::Speed
    }
}
