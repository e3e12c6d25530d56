use crate::MonitorMetrics;
use chrono::{TimeZone, Utc};
use plantar_alerts::TickReport;
use plantar_core::{
    NotificationEvent, NotificationKind, PressureFrame, Severity, SignalSnapshot,
    TemperatureReading,
};

fn report() -> TickReport {
    let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let event = |kind, severity, seq| NotificationEvent::new(kind, severity, "m", now, seq);
    TickReport {
        snapshot: SignalSnapshot {
            timestamp: now,
            pressure: PressureFrame::new([100.0; 6], [120.0, 0.0, 0.0, 410.0, 0.0, 0.0]),
            temperature: TemperatureReading {
                right: 34.0,
                ..TemperatureReading::at_baseline(32.3, 32.5)
            },
        },
        emitted: vec![
            event(NotificationKind::Hotspot, Severity::Warning, 0),
            event(NotificationKind::FallRisk, Severity::Critical, 1),
            event(NotificationKind::Hotspot, Severity::Warning, 2),
        ],
        transitions: Vec::new(),
        dropped: vec![event(NotificationKind::Vpt, Severity::Info, 3)],
        pending: 4,
    }
}

#[test]
fn report_updates_counters_and_gauges() {
    let metrics = MonitorMetrics::new().unwrap();
    metrics.observe_report(&report());

    assert_eq!(
        metrics
            .notifications_total
            .with_label_values(&["hotspot", "warning"])
            .get(),
        2
    );
    assert_eq!(
        metrics
            .notifications_total
            .with_label_values(&["fall-risk", "critical"])
            .get(),
        1
    );
    assert_eq!(metrics.notifications_dropped_total.get(), 1);
    assert_eq!(metrics.pending_notifications.get(), 4);
    assert_eq!(metrics.peak_pressure_kpa.get(), 410.0);
    let right = metrics
        .temperature_delta_celsius
        .with_label_values(&["right"])
        .get();
    assert!((right - 1.5).abs() < 1e-9);
}

#[test]
fn sessions_do_not_share_registries() {
    let a = MonitorMetrics::new().unwrap();
    let b = MonitorMetrics::new().unwrap();
    a.observe_report(&report());
    assert_eq!(b.notifications_dropped_total.get(), 0);

    let text = a.encode_text().unwrap();
    assert!(text.contains("plantar_notifications_total{kind=\"hotspot\",severity=\"warning\"} 2"));
    assert!(text.contains("plantar_pending_notifications 4"));
}
