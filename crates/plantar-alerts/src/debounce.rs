use crate::rules::RuleId;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Last emission per rule, threaded through evaluation as value-in / value-out.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RuleDebounceState {
    last_fired_at: BTreeMap<RuleId, DateTime<Utc>>,
    last_vpt_intensity: Option<f64>,
}

impl RuleDebounceState {
    pub fn last_fired_at(&self, rule: RuleId) -> Option<DateTime<Utc>> {
        self.last_fired_at.get(&rule).copied()
    }

    /// A rule with no cooldown is always ready.
    pub fn is_ready(&self, rule: RuleId, cooldown: Option<Duration>, now: DateTime<Utc>) -> bool {
        match (cooldown, self.last_fired_at(rule)) {
            (Some(window), Some(last)) => now - last >= window,
            _ => true,
        }
    }

    pub fn record(&mut self, rule: RuleId, now: DateTime<Utc>) {
        self.last_fired_at.insert(rule, now);
    }

    pub fn last_vpt_intensity(&self) -> Option<f64> {
        self.last_vpt_intensity
    }

    pub fn set_last_vpt_intensity(&mut self, intensity: Option<f64>) {
        self.last_vpt_intensity = intensity;
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EngineState {
    pub debounce: RuleDebounceState,
    /// Feeds event ids; bumps once per created event.
    pub next_sequence: u64,
}

impl EngineState {
    pub(crate) fn take_sequence(&mut self) -> u64 {
        let seq = self.next_sequence;
        self.next_sequence += 1;
        seq
    }
}
