use crate::engine::RuleEngine;
use crate::queue::{NotificationQueue, QueueTransition};
use crate::rules::{ExternalSignals, RuleId, RuleInput};
use chrono::{DateTime, Utc};
use plantar_core::{ConfigError, MonitorConfig, NotificationEvent, SignalError, SignalSnapshot};
use plantar_sim::Simulator;
use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;
use tracing::{info_span, warn};
use uuid::Uuid;

/// What one host-loop step produced.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TickReport {
    pub snapshot: SignalSnapshot,
    pub emitted: Vec<NotificationEvent>,
    pub transitions: Vec<QueueTransition>,
    pub dropped: Vec<NotificationEvent>,
    pub pending: usize,
}

/// Simulator, rule engine and presentation queue for one monitoring screen.
///
/// Nothing here owns a timer: the host calls [`MonitorSession::advance`] once per
/// tick and may call [`MonitorSession::advance_queue`] in between.
pub struct MonitorSession<R: Rng = StdRng> {
    id: Uuid,
    simulator: Simulator<R>,
    engine: RuleEngine,
    queue: NotificationQueue,
    external: ExternalSignals,
}

impl MonitorSession<StdRng> {
    pub fn seeded(
        config: MonitorConfig,
        seed: u64,
        now: DateTime<Utc>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let simulator = Simulator::seeded(config.simulator.clone(), seed, now);
        Self::with_simulator(config, simulator)
    }

    pub fn from_entropy(config: MonitorConfig, now: DateTime<Utc>) -> Result<Self, ConfigError> {
        config.validate()?;
        let simulator = Simulator::from_entropy(config.simulator.clone(), now);
        Self::with_simulator(config, simulator)
    }
}

impl<R: Rng> MonitorSession<R> {
    /// Rules and queue come from `config`; the simulator keeps its own settings.
    pub fn with_simulator(
        config: MonitorConfig,
        simulator: Simulator<R>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        simulator.config().validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            simulator,
            engine: RuleEngine::new(config.rules),
            queue: NotificationQueue::new(config.queue),
            external: ExternalSignals::default(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// One tick: sample and evaluate, then settle the queue clock and enqueue.
    ///
    /// A rejected snapshot returns before the queue is touched, so pending
    /// expiries surface on the next call.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<TickReport, SignalError> {
        let span = info_span!("monitor_tick", session = %self.id);
        let _guard = span.enter();

        let emitted = if self.simulator.is_active() {
            self.simulator.advance(now);
            self.observe(now)?
        } else {
            Vec::new()
        };
        let mut transitions = self.queue.advance(now);
        let dropped = self.push_all(&emitted, now, &mut transitions);
        Ok(self.report(emitted, transitions, dropped))
    }

    /// Expiry and promotion only; for hosts whose display timer fires between ticks.
    pub fn advance_queue(&mut self, now: DateTime<Utc>) -> Vec<QueueTransition> {
        self.queue.advance(now)
    }

    /// Changing VPT or gait values re-evaluates immediately against the current snapshot.
    /// Values are stored clamped to 0..=100; non-finite ones are rejected and the
    /// previous signals kept.
    pub fn set_external_signals(
        &mut self,
        external: ExternalSignals,
        now: DateTime<Utc>,
    ) -> Result<TickReport, SignalError> {
        let span = info_span!("monitor_external", session = %self.id);
        let _guard = span.enter();

        let external = RuleInput {
            snapshot: *self.simulator.snapshot(),
            external,
        }
        .sanitized()?
        .external;
        let emitted = if external != self.external {
            let previous = std::mem::replace(&mut self.external, external);
            match self.observe(now) {
                Ok(events) => events,
                Err(err) => {
                    self.external = previous;
                    return Err(err);
                }
            }
        } else {
            Vec::new()
        };
        let mut transitions = self.queue.advance(now);
        let dropped = self.push_all(&emitted, now, &mut transitions);
        Ok(self.report(emitted, transitions, dropped))
    }

    pub fn external_signals(&self) -> ExternalSignals {
        self.external
    }

    pub fn set_active(&mut self, active: bool) {
        self.simulator.set_active(active);
    }

    pub fn dismiss(&mut self, now: DateTime<Utc>) -> Option<NotificationEvent> {
        self.queue.dismiss(now)
    }

    pub fn current(&self) -> Option<&NotificationEvent> {
        self.queue.current()
    }

    pub fn queue(&self) -> &NotificationQueue {
        &self.queue
    }

    pub fn snapshot(&self) -> &SignalSnapshot {
        self.simulator.snapshot()
    }

    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    pub fn trigger(
        &mut self,
        rule: RuleId,
        now: DateTime<Utc>,
    ) -> Result<NotificationEvent, SignalError> {
        let input = self.input();
        let event = self.engine.trigger(rule, &input, now)?;
        let outcome = self.queue.enqueue(event.clone(), now);
        if let Some(dropped) = outcome.dropped {
            warn!(session = %self.id, id = %dropped.id, "manual trigger evicted pending notification");
        }
        Ok(event)
    }

    pub fn trigger_vpt(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<NotificationEvent, SignalError> {
        self.trigger(RuleId::VptActivation, now)
    }

    pub fn trigger_hotspot(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<NotificationEvent, SignalError> {
        self.trigger(RuleId::Hotspot, now)
    }

    pub fn trigger_gait(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<NotificationEvent, SignalError> {
        self.trigger(RuleId::GaitAsymmetry, now)
    }

    pub fn trigger_temperature(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<NotificationEvent, SignalError> {
        self.trigger(RuleId::Temperature, now)
    }

    pub fn trigger_pressure(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<NotificationEvent, SignalError> {
        self.trigger(RuleId::Pressure, now)
    }

    fn input(&self) -> RuleInput {
        RuleInput {
            snapshot: *self.simulator.snapshot(),
            external: self.external,
        }
    }

    fn observe(&mut self, now: DateTime<Utc>) -> Result<Vec<NotificationEvent>, SignalError> {
        let input = self.input();
        self.engine.observe(&input, now)
    }

    fn push_all(
        &mut self,
        events: &[NotificationEvent],
        now: DateTime<Utc>,
        transitions: &mut Vec<QueueTransition>,
    ) -> Vec<NotificationEvent> {
        let mut dropped = Vec::new();
        for event in events {
            let outcome = self.queue.enqueue(event.clone(), now);
            if outcome.displayed {
                transitions.push(QueueTransition::Shown(event.clone()));
            }
            dropped.extend(outcome.dropped);
        }
        dropped
    }

    fn report(
        &self,
        emitted: Vec<NotificationEvent>,
        transitions: Vec<QueueTransition>,
        dropped: Vec<NotificationEvent>,
    ) -> TickReport {
        TickReport {
            snapshot: *self.simulator.snapshot(),
            emitted,
            transitions,
            dropped,
            pending: self.queue.pending_len(),
        }
    }
}
