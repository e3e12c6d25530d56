use plantar_core::{Foot, NotificationKind, Severity};

/// Kind, severity and rendered text before an id and timestamp are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertDraft {
    pub kind: NotificationKind,
    pub severity: Severity,
    pub message: String,
}

pub fn vpt(intensity: f64) -> AlertDraft {
    AlertDraft {
        kind: NotificationKind::Vpt,
        severity: Severity::Info,
        message: format!(
            "VPT stimulation active at {intensity:.0}% intensity. Report any change in sensation."
        ),
    }
}

pub fn hotspot(temp_delta: f64, forefoot_kpa: f64) -> AlertDraft {
    AlertDraft {
        kind: NotificationKind::Hotspot,
        severity: Severity::Warning,
        message: format!(
            "Possible hotspot on the {}: temperature {:.1}°C {} baseline with forefoot pressure at {:.0} kPa. Offload and inspect the skin.",
            Foot::Right.label(),
            temp_delta.abs(),
            direction(temp_delta),
            forefoot_kpa
        ),
    }
}

/// `critical_above` splits the gait rule between plain asymmetry and fall risk.
pub fn gait(asymmetry: f64, critical_above: f64) -> AlertDraft {
    if asymmetry > critical_above {
        AlertDraft {
            kind: NotificationKind::FallRisk,
            severity: Severity::Critical,
            message: format!(
                "High fall risk: gait asymmetry at {asymmetry:.0}%. Stop walking and find support."
            ),
        }
    } else {
        AlertDraft {
            kind: NotificationKind::Gait,
            severity: Severity::Warning,
            message: format!(
                "Gait asymmetry at {asymmetry:.0}% indicates elevated fall risk. Consider slowing down."
            ),
        }
    }
}

pub fn temperature(foot: Foot, delta: f64) -> AlertDraft {
    AlertDraft {
        kind: NotificationKind::Temperature,
        severity: Severity::Warning,
        message: format!(
            "{} temperature is {:.1}°C {} baseline.",
            capitalize(foot.label()),
            delta.abs(),
            direction(delta)
        ),
    }
}

pub fn pressure(max_kpa: f64, limit_kpa: f64) -> AlertDraft {
    AlertDraft {
        kind: NotificationKind::Pressure,
        severity: Severity::Warning,
        message: format!(
            "Peak plantar pressure of {max_kpa:.0} kPa exceeds the {limit_kpa:.0} kPa limit. Shift your weight."
        ),
    }
}

fn direction(delta: f64) -> &'static str {
    if delta < 0.0 {
        "below"
    } else {
        "above"
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
