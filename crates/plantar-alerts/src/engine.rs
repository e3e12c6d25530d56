use crate::debounce::EngineState;
use crate::rules::{evaluate, stamp, synthesize, RuleId, RuleInput};
use chrono::{DateTime, Utc};
use plantar_core::{NotificationEvent, RuleThresholds, SignalError};
use tracing::{info, warn};

/// Owns thresholds plus the debounce state carried between observations.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    rules: RuleThresholds,
    state: EngineState,
}

impl RuleEngine {
    pub fn new(rules: RuleThresholds) -> Self {
        Self {
            rules,
            state: EngineState::default(),
        }
    }

    /// Invalid input leaves the debounce state untouched.
    pub fn observe(
        &mut self,
        input: &RuleInput,
        now: DateTime<Utc>,
    ) -> Result<Vec<NotificationEvent>, SignalError> {
        let evaluation = match evaluate(&self.rules, &self.state, input, now) {
            Ok(e) => e,
            Err(err) => {
                warn!(error = %err, "rejected sensor input");
                return Err(err);
            }
        };
        self.state = evaluation.state;
        for event in &evaluation.events {
            info!(
                id = %event.id,
                kind = %event.kind,
                severity = %event.severity,
                message = %event.message,
                "notification raised"
            );
        }
        Ok(evaluation.events)
    }

    /// Manual entry point: skips predicate and cooldown, leaves debounce untouched.
    /// Input is still checked and clamped like an observation.
    pub fn trigger(
        &mut self,
        rule: RuleId,
        input: &RuleInput,
        now: DateTime<Utc>,
    ) -> Result<NotificationEvent, SignalError> {
        let input = match input.sanitized() {
            Ok(input) => input,
            Err(err) => {
                warn!(error = %err, ?rule, "rejected manual trigger input");
                return Err(err);
            }
        };
        let draft = synthesize(rule, &self.rules, &input);
        let event = stamp(draft, &mut self.state, now);
        info!(id = %event.id, kind = %event.kind, ?rule, "notification triggered manually");
        Ok(event)
    }

    pub fn rules(&self) -> &RuleThresholds {
        &self.rules
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }
}
