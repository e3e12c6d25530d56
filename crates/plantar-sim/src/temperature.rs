use crate::walk::{in_anomaly_window, noise, uniform};
use plantar_core::{SimulatorConfig, TemperatureReading};
use rand::Rng;
use tracing::trace;

/// Baselines are carried over from `previous` and never recomputed.
pub fn next_temperature<R: Rng + ?Sized>(
    cfg: &SimulatorConfig,
    previous: &TemperatureReading,
    step: u64,
    rng: &mut R,
) -> TemperatureReading {
    let drift = (step as f64 * 0.1).sin() * 0.3;
    let left = previous.baseline_left + drift + noise(rng, cfg.temp_noise_c);
    let mut right = previous.baseline_right + drift + noise(rng, cfg.temp_noise_c);

    if in_anomaly_window(step, cfg.hotspot_period_steps, cfg.hotspot_window_after) {
        let rise = uniform(rng, cfg.hotspot_min_c, cfg.hotspot_max_c);
        right += rise;
        trace!(step, rise, right, "right foot thermal anomaly");
    }

    TemperatureReading {
        left,
        right,
        baseline_left: previous.baseline_left,
        baseline_right: previous.baseline_right,
    }
}
