use crate::Args;
use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use plantar_alerts::{ExternalSignals, MonitorSession, QueueTransition, TickReport};
use plantar_core::MonitorConfig;
use plantar_metrics::MonitorMetrics;
use std::io::Write;
use tracing::info;

struct Host {
    session: MonitorSession,
    metrics: MonitorMetrics,
    print_metrics: bool,
}

impl Host {
    fn start(args: &Args, config: MonitorConfig, now: DateTime<Utc>) -> anyhow::Result<Self> {
        let mut session = match args.seed {
            Some(seed) => MonitorSession::seeded(config, seed, now),
            None => MonitorSession::from_entropy(config, now),
        }
        .context("starting monitor session")?;
        let metrics = MonitorMetrics::new().context("registering metrics")?;
        info!(session = %session.id(), seed = ?args.seed, "monitor session started");

        let external = ExternalSignals {
            vpt_active: args.vpt_intensity > 0.0,
            vpt_intensity: args.vpt_intensity,
            gait_asymmetry: args.gait_asymmetry,
        };
        let report = session
            .set_external_signals(external, now)
            .context("applying external signals")?;

        let mut host = Self {
            session,
            metrics,
            print_metrics: args.metrics,
        };
        host.publish(&report)?;
        Ok(host)
    }

    fn tick(&mut self, now: DateTime<Utc>) -> anyhow::Result<()> {
        let report = self.session.advance(now).context("evaluating tick")?;
        self.publish(&report)
    }

    fn settle_queue(&mut self, now: DateTime<Utc>) -> anyhow::Result<()> {
        let transitions = self.session.advance_queue(now);
        emit(&transitions)
    }

    fn publish(&mut self, report: &TickReport) -> anyhow::Result<()> {
        self.metrics.observe_report(report);
        emit(&report.transitions)
    }

    fn finish(self) -> anyhow::Result<()> {
        info!(session = %self.session.id(), pending = self.session.queue().pending_len(), "monitor session finished");
        if self.print_metrics {
            let text = self.metrics.encode_text()?;
            print!("{text}");
        }
        Ok(())
    }
}

fn emit(transitions: &[QueueTransition]) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for t in transitions {
        writeln!(out, "{}", serde_json::to_string(t)?)?;
    }
    Ok(())
}

/// Simulated clock: one tick per second, no sleeping.
pub fn run_replay(args: &Args, config: MonitorConfig) -> anyhow::Result<()> {
    let start = Utc::now();
    let grace = config.queue.grace();
    let mut host = Host::start(args, config, start)?;

    for step in 1..=args.ticks {
        let now = start + Duration::seconds(step as i64);
        host.tick(now)?;
        host.settle_queue(now + grace)?;
    }
    host.finish()
}

pub async fn run_realtime(args: &Args, config: MonitorConfig) -> anyhow::Result<()> {
    let mut host = Host::start(args, config, Utc::now())?;
    let mut ticker = tokio::time::interval(std::time::Duration::from_secs(1));
    let mut display = tokio::time::interval(std::time::Duration::from_millis(100));
    ticker.tick().await;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut ticks = 0u64;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                host.tick(Utc::now())?;
                ticks += 1;
                if args.ticks != 0 && ticks >= args.ticks {
                    break;
                }
            }
            _ = display.tick() => host.settle_queue(Utc::now())?,
            res = &mut ctrl_c => {
                res.context("waiting for ctrl-c")?;
                info!("interrupted");
                break;
            }
        }
    }
    host.finish()
}
