use chrono::{DateTime, Duration, TimeZone, Utc};
use plantar_alerts::{ExternalSignals, NotificationQueue, QueueTransition, RuleEngine, RuleInput};
use plantar_core::{
    MonitorConfig, NotificationKind, PressureFrame, Severity, SignalSnapshot, TemperatureReading,
};

fn at(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(1_750_000_000_000 + ms).unwrap()
}

fn frame(right_forefoot: f64) -> SignalSnapshot {
    SignalSnapshot {
        timestamp: at(0),
        pressure: PressureFrame::new(
            [150.0, 140.0, 80.0, 200.0, 190.0, 110.0],
            [155.0, 145.0, 85.0, right_forefoot, 195.0, 115.0],
        ),
        temperature: TemperatureReading::at_baseline(32.3, 32.5),
    }
}

/// (right temperature, right lateral forefoot kPa) per tick.
fn golden_ticks() -> Vec<(f64, f64)> {
    vec![(32.5, 300.0), (34.0, 400.0)]
}

#[test]
fn hotspot_scenario_yields_single_warning() {
    let config = MonitorConfig::default();
    let mut engine = RuleEngine::new(config.rules.clone());
    let mut queue = NotificationQueue::new(config.queue.clone());
    let mut shown = Vec::new();

    for (i, (right_temp, forefoot)) in golden_ticks().into_iter().enumerate() {
        let now = at(i as i64 * 1_000);
        let mut snapshot = frame(forefoot);
        snapshot.timestamp = now;
        snapshot.temperature.right = right_temp;

        let events = engine
            .observe(
                &RuleInput {
                    snapshot,
                    external: ExternalSignals::default(),
                },
                now,
            )
            .unwrap();

        if i == 0 {
            assert!(events.is_empty());
        }
        for e in events {
            shown.push(e.clone());
            queue.enqueue(e, now);
        }
    }

    assert_eq!(shown.len(), 1);
    let hotspot = &shown[0];
    assert_eq!(hotspot.kind, NotificationKind::Hotspot);
    assert_eq!(hotspot.severity, Severity::Warning);
    assert!(hotspot.message.contains("1.5"), "{}", hotspot.message);
    assert!(hotspot.message.contains("right foot"), "{}", hotspot.message);
    assert_eq!(queue.current(), Some(hotspot));

    let transitions = queue.advance(at(1_000) + Duration::milliseconds(5_000));
    assert_eq!(transitions, vec![QueueTransition::Dismissed(hotspot.clone())]);
    assert!(queue.is_idle());
}

#[test]
fn burst_is_shown_in_detection_order() {
    let config = MonitorConfig::default();
    let mut engine = RuleEngine::new(config.rules.clone());
    let mut queue = NotificationQueue::new(config.queue.clone());

    let mut snapshot = frame(400.0);
    snapshot.temperature.right = 34.2;
    let events = engine
        .observe(
            &RuleInput {
                snapshot,
                external: ExternalSignals {
                    vpt_active: true,
                    vpt_intensity: 30.0,
                    gait_asymmetry: 55.0,
                },
            },
            at(0),
        )
        .unwrap();
    assert_eq!(events.len(), 4);
    for e in &events {
        queue.enqueue(e.clone(), at(0));
    }

    let mut order = vec![queue.current().map(|e| e.kind)];
    let mut now = at(0);
    while !queue.is_idle() {
        now = now + Duration::milliseconds(100);
        for t in queue.advance(now) {
            if let QueueTransition::Shown(e) = t {
                order.push(Some(e.kind));
            }
        }
    }
    assert_eq!(
        order,
        vec![
            Some(NotificationKind::Vpt),
            Some(NotificationKind::Hotspot),
            Some(NotificationKind::FallRisk),
            Some(NotificationKind::Temperature),
        ]
    );
}
