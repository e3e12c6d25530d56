use crate::walk::{in_anomaly_window, noise, uniform, walk_cycle};
use plantar_core::{FootZone, PressureFrame, SimulatorConfig, ZoneReadings};
use rand::Rng;
use tracing::trace;

const SPIKED_ZONES: [FootZone; 2] = [FootZone::ForefootLateral, FootZone::ForefootMedial];

/// Loads at `step` with no noise and no spike.
pub fn resting_frame(cfg: &SimulatorConfig, step: u64) -> PressureFrame {
    let cycle = walk_cycle(step);
    PressureFrame::new(
        scale(&cfg.left_base_kpa, cycle),
        scale(&cfg.right_base_kpa, cycle),
    )
}

pub fn next_pressure<R: Rng + ?Sized>(
    cfg: &SimulatorConfig,
    step: u64,
    rng: &mut R,
) -> PressureFrame {
    let cycle = walk_cycle(step);
    let mut left = [0.0; 6];
    let mut right = [0.0; 6];
    for zone in FootZone::ALL {
        let i = zone.index();
        left[i] = (cfg.left_base_kpa[i] * cycle + noise(rng, cfg.pressure_noise_kpa)).max(0.0);
        right[i] = (cfg.right_base_kpa[i] * cycle + noise(rng, cfg.pressure_noise_kpa)).max(0.0);
    }

    if in_anomaly_window(step, cfg.spike_period_steps, cfg.spike_window_after) {
        for zone in SPIKED_ZONES {
            let i = zone.index();
            let spike = uniform(rng, cfg.spike_min_kpa, cfg.spike_max_kpa);
            right[i] = (right[i] + spike).min(cfg.spike_cap_kpa);
            trace!(step, zone = zone.label(), spike, value = right[i], "forefoot spike");
        }
    }

    PressureFrame::new(left, right)
}

fn scale(base: &ZoneReadings, factor: f64) -> ZoneReadings {
    let mut out = *base;
    for v in out.iter_mut() {
        *v *= factor;
    }
    out
}
