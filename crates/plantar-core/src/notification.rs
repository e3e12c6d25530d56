use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    Gait,
    Temperature,
    Pressure,
    Vpt,
    Hotspot,
    FallRisk,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Gait => "gait",
            NotificationKind::Temperature => "temperature",
            NotificationKind::Pressure => "pressure",
            NotificationKind::Vpt => "vpt",
            NotificationKind::Hotspot => "hotspot",
            NotificationKind::FallRisk => "fall-risk",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered from least to most urgent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered alert. The message is fixed at creation and never re-derived.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    pub severity: Severity,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl NotificationEvent {
    /// `sequence` disambiguates events of the same kind created in the same millisecond.
    pub fn new(
        kind: NotificationKind,
        severity: Severity,
        message: impl Into<String>,
        created_at: DateTime<Utc>,
        sequence: u64,
    ) -> Self {
        let id = format!(
            "{}-{}-{}",
            kind.as_str(),
            created_at.timestamp_millis(),
            sequence
        );
        Self {
            id,
            kind,
            message: message.into(),
            severity,
            created_at,
        }
    }
}
