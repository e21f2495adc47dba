use super::{speed_bucket, Classification, LabelFamily, TrajectoryClassifier};
use crate::config::SpeedThresholds;
use crate::labels::SpeedMode;
use crate::trajectory::{max_speed, Sample};

/// Classifies by the maximum speed seen anywhere in the trajectory
#[derive(Debug, Clone, Default)]
pub struct BaselineClassifier {
    thresholds: SpeedThresholds,
}

impl BaselineClassifier {
    #[must_use]
    pub fn new(thresholds: SpeedThresholds) -> Self {
        Self { thresholds }
    }

    /// Speed mode for a trajectory, `Unknown` when empty
    #[must_use]
    pub fn label(&self, samples: &[Sample]) -> SpeedMode {
        match max_speed(samples) {
            Some(max) => speed_bucket(max, &self.thresholds),
            None => SpeedMode::Unknown,
        }
    }
}

impl TrajectoryClassifier for BaselineClassifier {
    fn classify(&self, samples: &[Sample]) -> Classification {
        Classification::Speed(self.label(samples))
    }

    fn name(&self) -> &str {
        "baseline"
    }

    fn family(&self) -> LabelFamily {
        LabelFamily::Speed
    }
}
