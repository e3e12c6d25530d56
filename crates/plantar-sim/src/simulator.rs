use crate::pressure::{next_pressure, resting_frame};
use crate::temperature::next_temperature;
use chrono::{DateTime, Utc};
use plantar_core::{SignalSnapshot, SimulatorConfig, TemperatureReading};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything the generator needs between ticks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulatorState {
    pub active: bool,
    pub pressure_step: u64,
    pub temperature_step: u64,
    pub snapshot: SignalSnapshot,
}

impl SimulatorState {
    pub fn initial(cfg: &SimulatorConfig, now: DateTime<Utc>) -> Self {
        Self {
            active: true,
            pressure_step: 0,
            temperature_step: 0,
            snapshot: SignalSnapshot {
                timestamp: now,
                pressure: resting_frame(cfg, 0),
                temperature: TemperatureReading::at_baseline(
                    cfg.baseline_left_temp,
                    cfg.baseline_right_temp,
                ),
            },
        }
    }
}

/// Advance one tick. An inactive state is returned unchanged.
pub fn tick<R: Rng + ?Sized>(
    cfg: &SimulatorConfig,
    state: &SimulatorState,
    rng: &mut R,
    now: DateTime<Utc>,
) -> SimulatorState {
    if !state.active {
        return state.clone();
    }

    let pressure_step = state.pressure_step + 1;
    let temperature_step = state.temperature_step + 1;
    let pressure = next_pressure(cfg, pressure_step, rng);
    let temperature = next_temperature(cfg, &state.snapshot.temperature, temperature_step, rng);

    debug!(
        step = pressure_step,
        max_kpa = pressure.summary.max,
        right_temp = temperature.right,
        "simulator tick"
    );

    SimulatorState {
        active: true,
        pressure_step,
        temperature_step,
        snapshot: SignalSnapshot {
            timestamp: now,
            pressure,
            temperature,
        },
    }
}

/// Owned simulator with its own RNG, for hosts that just want `advance`.
pub struct Simulator<R: Rng = StdRng> {
    config: SimulatorConfig,
    state: SimulatorState,
    rng: R,
}

impl Simulator<StdRng> {
    pub fn seeded(config: SimulatorConfig, seed: u64, now: DateTime<Utc>) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed), now)
    }

    pub fn from_entropy(config: SimulatorConfig, now: DateTime<Utc>) -> Self {
        Self::with_rng(config, StdRng::from_entropy(), now)
    }
}

impl<R: Rng> Simulator<R> {
    pub fn with_rng(config: SimulatorConfig, rng: R, now: DateTime<Utc>) -> Self {
        let state = SimulatorState::initial(&config, now);
        Self { config, state, rng }
    }

    /// Pausing freezes the stream; the last snapshot stays visible.
    pub fn set_active(&mut self, active: bool) {
        if self.state.active != active {
            debug!(active, step = self.state.pressure_step, "simulator activity changed");
        }
        self.state.active = active;
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    pub fn advance(&mut self, now: DateTime<Utc>) -> &SignalSnapshot {
        self.state = tick(&self.config, &self.state, &mut self.rng, now);
        &self.state.snapshot
    }

    pub fn snapshot(&self) -> &SignalSnapshot {
        &self.state.snapshot
    }

    pub fn state(&self) -> &SimulatorState {
        &self.state
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }
}
