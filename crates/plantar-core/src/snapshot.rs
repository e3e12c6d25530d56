use crate::error::SignalError;
use crate::zones::{Foot, PressureFrame};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TemperatureReading {
    pub left: f64,
    pub right: f64,
    pub baseline_left: f64,
    pub baseline_right: f64,
}

impl TemperatureReading {
    pub fn at_baseline(baseline_left: f64, baseline_right: f64) -> Self {
        Self {
            left: baseline_left,
            right: baseline_right,
            baseline_left,
            baseline_right,
        }
    }

    /// Signed rise over baseline, °C.
    pub fn delta(&self, foot: Foot) -> f64 {
        match foot {
            Foot::Left => self.left - self.baseline_left,
            Foot::Right => self.right - self.baseline_right,
        }
    }

    /// Foot with the larger absolute deviation; ties go to the left foot.
    pub fn max_abs_delta(&self) -> (Foot, f64) {
        let left = self.delta(Foot::Left).abs();
        let right = self.delta(Foot::Right).abs();
        if right > left {
            (Foot::Right, right)
        } else {
            (Foot::Left, left)
        }
    }
}

/// One reading of every simulated channel. Replaced wholesale each tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SignalSnapshot {
    pub timestamp: DateTime<Utc>,
    pub pressure: PressureFrame,
    pub temperature: TemperatureReading,
}

impl SignalSnapshot {
    pub fn validate(&self) -> Result<(), SignalError> {
        for (idx, v) in self.pressure.left.iter().enumerate() {
            SignalError::check_finite(LEFT_ZONE_FIELDS[idx], *v)?;
        }
        for (idx, v) in self.pressure.right.iter().enumerate() {
            SignalError::check_finite(RIGHT_ZONE_FIELDS[idx], *v)?;
        }
        SignalError::check_finite("pressure.max", self.pressure.summary.max)?;
        SignalError::check_finite("pressure.avg", self.pressure.summary.avg)?;
        SignalError::check_finite("temperature.left", self.temperature.left)?;
        SignalError::check_finite("temperature.right", self.temperature.right)?;
        SignalError::check_finite("temperature.baseline_left", self.temperature.baseline_left)?;
        SignalError::check_finite(
            "temperature.baseline_right",
            self.temperature.baseline_right,
        )?;
        Ok(())
    }
}

const LEFT_ZONE_FIELDS: [&str; 6] = [
    "pressure.left[0]",
    "pressure.left[1]",
    "pressure.left[2]",
    "pressure.left[3]",
    "pressure.left[4]",
    "pressure.left[5]",
];

const RIGHT_ZONE_FIELDS: [&str; 6] = [
    "pressure.right[0]",
    "pressure.right[1]",
    "pressure.right[2]",
    "pressure.right[3]",
    "pressure.right[4]",
    "pressure.right[5]",
];
