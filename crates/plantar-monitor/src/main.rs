mod host;

use anyhow::{bail, Context};
use clap::Parser;
use plantar_core::MonitorConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Runs the insole simulator and alert engine, printing notification transitions as JSON lines.
#[derive(Parser, Debug)]
#[command(name = "plantar-monitor", version)]
pub struct Args {
    /// JSON config; missing fields fall back to defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Ticks to run. 0 runs until interrupted (realtime only).
    #[arg(long, default_value_t = 120)]
    pub ticks: u64,
    /// Tick on a wall-clock 1 s interval instead of replaying on a simulated clock.
    #[arg(long)]
    pub realtime: bool,
    #[arg(long)]
    pub seed: Option<u64>,
    /// Percent; any value above 0 marks VPT as active.
    #[arg(long, default_value_t = 0.0)]
    pub vpt_intensity: f64,
    #[arg(long, default_value_t = 0.0)]
    pub gait_asymmetry: f64,
    #[arg(long)]
    pub json_logs: bool,
    /// Print the Prometheus exposition after the run.
    #[arg(long)]
    pub metrics: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<MonitorConfig> {
    let Some(path) = path else {
        return Ok(MonitorConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    MonitorConfig::from_json_str(&raw).with_context(|| format!("loading config {}", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.json_logs);

    if args.ticks == 0 && !args.realtime {
        bail!("--ticks 0 requires --realtime");
    }
    let config = load_config(args.config.as_ref())?;

    if args.realtime {
        host::run_realtime(&args, config).await
    } else {
        host::run_replay(&args, config)
    }
}
