pub mod pressure;
pub mod simulator;
pub mod temperature;
pub mod walk;

pub use pressure::next_pressure;
pub use simulator::{tick, Simulator, SimulatorState};
pub use temperature::next_temperature;
pub use walk::{in_anomaly_window, walk_cycle};
