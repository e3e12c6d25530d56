use crate::debounce::EngineState;
use crate::message::{self, AlertDraft};
use chrono::{DateTime, Duration, Utc};
use plantar_core::{
    cooldown, Foot, FootZone, NotificationEvent, RuleThresholds, SignalError, SignalSnapshot,
};
use serde::{Deserialize, Serialize};

/// The five detection rules. Order here is evaluation and emission order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    VptActivation,
    Hotspot,
    GaitAsymmetry,
    Temperature,
    Pressure,
}

impl RuleId {
    pub const ALL: [RuleId; 5] = [
        RuleId::VptActivation,
        RuleId::Hotspot,
        RuleId::GaitAsymmetry,
        RuleId::Temperature,
        RuleId::Pressure,
    ];

    pub fn cooldown(self, rules: &RuleThresholds) -> Option<Duration> {
        let c = &rules.cooldowns;
        cooldown(match self {
            RuleId::VptActivation => c.vpt_ms,
            RuleId::Hotspot => c.hotspot_ms,
            RuleId::GaitAsymmetry => c.gait_ms,
            RuleId::Temperature => c.temperature_ms,
            RuleId::Pressure => c.pressure_ms,
        })
    }
}

/// Signals that do not come from the insole simulator.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ExternalSignals {
    pub vpt_active: bool,
    /// 0..=100
    pub vpt_intensity: f64,
    /// 0..=100
    pub gait_asymmetry: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RuleInput {
    pub snapshot: SignalSnapshot,
    pub external: ExternalSignals,
}

impl RuleInput {
    /// Rejects non-finite readings and clamps percentages into 0..=100.
    pub fn sanitized(&self) -> Result<RuleInput, SignalError> {
        self.snapshot.validate()?;
        let vpt_intensity =
            SignalError::check_finite("vpt_intensity", self.external.vpt_intensity)?;
        let gait_asymmetry =
            SignalError::check_finite("gait_asymmetry", self.external.gait_asymmetry)?;
        Ok(RuleInput {
            snapshot: self.snapshot,
            external: ExternalSignals {
                vpt_active: self.external.vpt_active,
                vpt_intensity: vpt_intensity.clamp(0.0, 100.0),
                gait_asymmetry: gait_asymmetry.clamp(0.0, 100.0),
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub events: Vec<NotificationEvent>,
    pub state: EngineState,
}

/// Run every rule against `input`. Pure: the caller keeps or discards the returned state.
pub fn evaluate(
    rules: &RuleThresholds,
    state: &EngineState,
    input: &RuleInput,
    now: DateTime<Utc>,
) -> Result<Evaluation, SignalError> {
    let input = input.sanitized()?;
    let mut next = state.clone();
    let mut events = Vec::new();

    if !input.external.vpt_active || input.external.vpt_intensity <= 0.0 {
        next.debounce.set_last_vpt_intensity(None);
    }

    for rule in RuleId::ALL {
        if !predicate(rule, rules, &next, &input) {
            continue;
        }
        if !next.debounce.is_ready(rule, rule.cooldown(rules), now) {
            continue;
        }
        next.debounce.record(rule, now);
        if rule == RuleId::VptActivation {
            next.debounce
                .set_last_vpt_intensity(Some(input.external.vpt_intensity));
        }
        let draft = synthesize(rule, rules, &input);
        events.push(stamp(draft, &mut next, now));
    }

    Ok(Evaluation {
        events,
        state: next,
    })
}

/// Render `rule`'s alert from current values without checking its predicate.
/// `input` should already have been through [`RuleInput::sanitized`].
pub fn synthesize(rule: RuleId, rules: &RuleThresholds, input: &RuleInput) -> AlertDraft {
    let snap = &input.snapshot;
    match rule {
        RuleId::VptActivation => message::vpt(input.external.vpt_intensity),
        RuleId::Hotspot => message::hotspot(
            snap.temperature.delta(Foot::Right),
            forefoot_peak(snap),
        ),
        RuleId::GaitAsymmetry => {
            message::gait(input.external.gait_asymmetry, rules.gait_critical_pct)
        }
        RuleId::Temperature => {
            let (foot, _) = snap.temperature.max_abs_delta();
            message::temperature(foot, snap.temperature.delta(foot))
        }
        RuleId::Pressure => message::pressure(snap.pressure.summary.max, rules.pressure_max_kpa),
    }
}

pub(crate) fn stamp(draft: AlertDraft, state: &mut EngineState, now: DateTime<Utc>) -> NotificationEvent {
    NotificationEvent::new(
        draft.kind,
        draft.severity,
        draft.message,
        now,
        state.take_sequence(),
    )
}

fn predicate(rule: RuleId, rules: &RuleThresholds, state: &EngineState, input: &RuleInput) -> bool {
    let snap = &input.snapshot;
    let ext = &input.external;
    match rule {
        RuleId::VptActivation => {
            ext.vpt_active
                && ext.vpt_intensity > 0.0
                && state.debounce.last_vpt_intensity() != Some(ext.vpt_intensity)
        }
        RuleId::Hotspot => {
            let right = &snap.pressure.right;
            snap.temperature.delta(Foot::Right).abs() > rules.hotspot_temp_delta_c
                && (right[FootZone::ForefootLateral.index()] > rules.hotspot_forefoot_lateral_kpa
                    || right[FootZone::ForefootMedial.index()] > rules.hotspot_forefoot_medial_kpa)
        }
        RuleId::GaitAsymmetry => ext.gait_asymmetry > rules.gait_asymmetry_pct,
        RuleId::Temperature => {
            let (_, delta) = snap.temperature.max_abs_delta();
            delta > rules.temperature_delta_low_c && delta < rules.temperature_delta_high_c
        }
        RuleId::Pressure => snap.pressure.summary.max > rules.pressure_max_kpa,
    }
}

fn forefoot_peak(snap: &SignalSnapshot) -> f64 {
    snap.pressure
        .zone(Foot::Right, FootZone::ForefootLateral)
        .max(snap.pressure.zone(Foot::Right, FootZone::ForefootMedial))
}
