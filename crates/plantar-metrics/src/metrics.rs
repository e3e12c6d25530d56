use plantar_alerts::TickReport;
use plantar_core::{Foot, NotificationEvent};
use prometheus::{
    Encoder, Gauge, GaugeVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("prometheus: {0}")]
    Prometheus(#[from] prometheus::Error),
    #[error("exposition is not utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Per-session registry; nothing is registered globally.
pub struct MonitorMetrics {
    registry: Registry,
    pub notifications_total: IntCounterVec,
    pub notifications_dropped_total: IntCounter,
    pub pending_notifications: IntGauge,
    pub peak_pressure_kpa: Gauge,
    pub temperature_delta_celsius: GaugeVec,
}

impl MonitorMetrics {
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let notifications_total = IntCounterVec::new(
            Opts::new("plantar_notifications_total", "Notifications raised by kind and severity"),
            &["kind", "severity"],
        )?;
        let notifications_dropped_total = IntCounter::new(
            "plantar_notifications_dropped_total",
            "Pending notifications evicted by the queue cap",
        )?;
        let pending_notifications = IntGauge::new(
            "plantar_pending_notifications",
            "Notifications waiting behind the displayed one",
        )?;
        let peak_pressure_kpa =
            Gauge::new("plantar_peak_pressure_kpa", "Highest zone pressure in the last snapshot")?;
        let temperature_delta_celsius = GaugeVec::new(
            Opts::new(
                "plantar_temperature_delta_celsius",
                "Signed temperature deviation from baseline",
            ),
            &["foot"],
        )?;

        registry.register(Box::new(notifications_total.clone()))?;
        registry.register(Box::new(notifications_dropped_total.clone()))?;
        registry.register(Box::new(pending_notifications.clone()))?;
        registry.register(Box::new(peak_pressure_kpa.clone()))?;
        registry.register(Box::new(temperature_delta_celsius.clone()))?;

        Ok(Self {
            registry,
            notifications_total,
            notifications_dropped_total,
            pending_notifications,
            peak_pressure_kpa,
            temperature_delta_celsius,
        })
    }

    pub fn observe_report(&self, report: &TickReport) {
        for event in &report.emitted {
            self.observe_notification(event);
        }
        self.notifications_dropped_total
            .inc_by(report.dropped.len() as u64);
        self.pending_notifications.set(report.pending as i64);

        let snap = &report.snapshot;
        self.peak_pressure_kpa.set(snap.pressure.summary.max);
        self.temperature_delta_celsius
            .with_label_values(&["left"])
            .set(snap.temperature.delta(Foot::Left));
        self.temperature_delta_celsius
            .with_label_values(&["right"])
            .set(snap.temperature.delta(Foot::Right));
    }

    pub fn observe_notification(&self, event: &NotificationEvent) {
        self.notifications_total
            .with_label_values(&[event.kind.as_str(), event.severity.as_str()])
            .inc();
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn encode_text(&self) -> Result<String, MetricsError> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}
