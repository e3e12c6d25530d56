use crate::error::ConfigError;
use crate::zones::ZoneReadings;
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Longest display, grace or cooldown window a config may ask for: one day.
pub const MAX_WINDOW_MS: u64 = 86_400_000;

/// Shape of the synthetic insole stream. Defaults reproduce the demo walking pattern.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulatorConfig {
    pub left_base_kpa: ZoneReadings,
    pub right_base_kpa: ZoneReadings,
    pub pressure_noise_kpa: f64,
    pub spike_period_steps: u64,
    /// Spike fires while `step % period` is strictly above this value.
    pub spike_window_after: u64,
    pub spike_min_kpa: f64,
    pub spike_max_kpa: f64,
    pub spike_cap_kpa: f64,
    pub baseline_left_temp: f64,
    pub baseline_right_temp: f64,
    pub temp_noise_c: f64,
    pub hotspot_period_steps: u64,
    pub hotspot_window_after: u64,
    pub hotspot_min_c: f64,
    pub hotspot_max_c: f64,
}

impl SimulatorConfig {
    pub fn default_for_session() -> Self {
        Self {
            left_base_kpa: [240.0, 225.0, 110.0, 265.0, 250.0, 160.0],
            right_base_kpa: [245.0, 230.0, 115.0, 330.0, 310.0, 170.0],
            pressure_noise_kpa: 10.0,
            spike_period_steps: 50,
            spike_window_after: 45,
            spike_min_kpa: 60.0,
            spike_max_kpa: 120.0,
            spike_cap_kpa: 450.0,
            baseline_left_temp: 32.3,
            baseline_right_temp: 32.5,
            temp_noise_c: 0.2,
            hotspot_period_steps: 60,
            hotspot_window_after: 55,
            hotspot_min_c: 1.5,
            hotspot_max_c: 2.0,
        }
    }

    /// Same pattern with every random term removed.
    pub fn noiseless() -> Self {
        Self {
            pressure_noise_kpa: 0.0,
            temp_noise_c: 0.0,
            ..Self::default_for_session()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for v in self.left_base_kpa.iter().chain(self.right_base_kpa.iter()) {
            if !v.is_finite() || *v < 0.0 {
                return Err(ConfigError::invalid(
                    "simulator.base_kpa",
                    format!("zone load must be finite and >= 0, got {v}"),
                ));
            }
        }
        non_negative("simulator.pressure_noise_kpa", self.pressure_noise_kpa)?;
        non_negative("simulator.temp_noise_c", self.temp_noise_c)?;
        window(
            "simulator.spike_window_after",
            self.spike_period_steps,
            self.spike_window_after,
        )?;
        window(
            "simulator.hotspot_window_after",
            self.hotspot_period_steps,
            self.hotspot_window_after,
        )?;
        ordered_range("simulator.spike_kpa", self.spike_min_kpa, self.spike_max_kpa)?;
        ordered_range("simulator.hotspot_c", self.hotspot_min_c, self.hotspot_max_c)?;
        non_negative("simulator.spike_cap_kpa", self.spike_cap_kpa)?;
        if !self.baseline_left_temp.is_finite() || !self.baseline_right_temp.is_finite() {
            return Err(ConfigError::invalid(
                "simulator.baseline_temp",
                "baselines must be finite",
            ));
        }
        Ok(())
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self::default_for_session()
    }
}

/// Re-fire windows per rule, in milliseconds. `None` disables debouncing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RuleCooldowns {
    pub vpt_ms: Option<u64>,
    pub hotspot_ms: Option<u64>,
    pub gait_ms: Option<u64>,
    pub temperature_ms: Option<u64>,
    pub pressure_ms: Option<u64>,
}

impl RuleCooldowns {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("rules.cooldowns.vpt_ms", self.vpt_ms),
            ("rules.cooldowns.hotspot_ms", self.hotspot_ms),
            ("rules.cooldowns.gait_ms", self.gait_ms),
            ("rules.cooldowns.temperature_ms", self.temperature_ms),
            ("rules.cooldowns.pressure_ms", self.pressure_ms),
        ];
        for (field, ms) in fields {
            if let Some(ms) = ms {
                bounded_window(field, ms)?;
            }
        }
        Ok(())
    }
}

impl Default for RuleCooldowns {
    fn default() -> Self {
        Self {
            vpt_ms: Some(2_000),
            hotspot_ms: Some(5_000),
            gait_ms: Some(8_000),
            temperature_ms: None,
            pressure_ms: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RuleThresholds {
    pub hotspot_temp_delta_c: f64,
    pub hotspot_forefoot_lateral_kpa: f64,
    pub hotspot_forefoot_medial_kpa: f64,
    pub gait_asymmetry_pct: f64,
    pub gait_critical_pct: f64,
    pub temperature_delta_low_c: f64,
    pub temperature_delta_high_c: f64,
    pub pressure_max_kpa: f64,
    pub cooldowns: RuleCooldowns,
}

impl RuleThresholds {
    pub fn default_for_session() -> Self {
        Self {
            hotspot_temp_delta_c: 1.2,
            hotspot_forefoot_lateral_kpa: 380.0,
            hotspot_forefoot_medial_kpa: 360.0,
            gait_asymmetry_pct: 25.0,
            gait_critical_pct: 50.0,
            temperature_delta_low_c: 1.5,
            temperature_delta_high_c: 2.0,
            pressure_max_kpa: 450.0,
            cooldowns: RuleCooldowns::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("rules.hotspot_temp_delta_c", self.hotspot_temp_delta_c)?;
        non_negative(
            "rules.hotspot_forefoot_lateral_kpa",
            self.hotspot_forefoot_lateral_kpa,
        )?;
        non_negative(
            "rules.hotspot_forefoot_medial_kpa",
            self.hotspot_forefoot_medial_kpa,
        )?;
        non_negative("rules.pressure_max_kpa", self.pressure_max_kpa)?;
        ordered_range(
            "rules.gait_pct",
            self.gait_asymmetry_pct,
            self.gait_critical_pct,
        )?;
        ordered_range(
            "rules.temperature_delta_c",
            self.temperature_delta_low_c,
            self.temperature_delta_high_c,
        )?;
        self.cooldowns.validate()
    }
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self::default_for_session()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QueueConfig {
    pub display_ms: u64,
    pub grace_ms: u64,
    pub max_pending: usize,
}

impl QueueConfig {
    pub fn display(&self) -> Duration {
        window_duration(self.display_ms)
    }

    pub fn grace(&self) -> Duration {
        window_duration(self.grace_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display_ms == 0 {
            return Err(ConfigError::invalid("queue.display_ms", "must be > 0"));
        }
        bounded_window("queue.display_ms", self.display_ms)?;
        bounded_window("queue.grace_ms", self.grace_ms)?;
        if self.max_pending == 0 {
            return Err(ConfigError::invalid("queue.max_pending", "must be > 0"));
        }
        Ok(())
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            display_ms: 5_000,
            grace_ms: 300,
            max_pending: 32,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MonitorConfig {
    pub simulator: SimulatorConfig,
    pub rules: RuleThresholds,
    pub queue: QueueConfig,
}

impl MonitorConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: MonitorConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulator.validate()?;
        self.rules.validate()?;
        self.queue.validate()
    }
}

pub fn cooldown(ms: Option<u64>) -> Option<Duration> {
    ms.map(window_duration)
}

/// Saturates at [`MAX_WINDOW_MS`] for configs built in code without `validate()`.
fn window_duration(ms: u64) -> Duration {
    let ms = i64::try_from(ms.min(MAX_WINDOW_MS)).unwrap_or(i64::MAX);
    Duration::milliseconds(ms)
}

fn bounded_window(field: &'static str, ms: u64) -> Result<(), ConfigError> {
    if ms > MAX_WINDOW_MS {
        return Err(ConfigError::invalid(
            field,
            format!("{ms} ms exceeds the {MAX_WINDOW_MS} ms ceiling"),
        ));
    }
    Ok(())
}

fn non_negative(field: &'static str, v: f64) -> Result<(), ConfigError> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be finite and >= 0, got {v}")))
    }
}

fn ordered_range(field: &'static str, lo: f64, hi: f64) -> Result<(), ConfigError> {
    non_negative(field, lo)?;
    non_negative(field, hi)?;
    if lo > hi {
        return Err(ConfigError::invalid(field, format!("lower bound {lo} exceeds upper {hi}")));
    }
    Ok(())
}

fn window(field: &'static str, period: u64, after: u64) -> Result<(), ConfigError> {
    if period == 0 || after >= period {
        return Err(ConfigError::invalid(
            field,
            format!("window start {after} must be below period {period}"),
        ));
    }
    Ok(())
}
