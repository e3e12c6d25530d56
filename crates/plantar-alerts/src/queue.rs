use chrono::{DateTime, Duration, Utc};
use plantar_core::{NotificationEvent, QueueConfig, Severity};
use serde::Serialize;
use std::collections::VecDeque;
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DisplayedNotification {
    pub event: NotificationEvent,
    pub shown_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "transition", content = "notification", rename_all = "snake_case")]
pub enum QueueTransition {
    Shown(NotificationEvent),
    Dismissed(NotificationEvent),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnqueueOutcome {
    /// The new event went straight to display.
    pub displayed: bool,
    /// Entry evicted from `pending` to respect the cap.
    pub dropped: Option<NotificationEvent>,
}

/// One-at-a-time presentation queue. New events never preempt the displayed one.
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    config: QueueConfig,
    current: Option<DisplayedNotification>,
    pending: VecDeque<NotificationEvent>,
    promote_at: Option<DateTime<Utc>>,
}

impl NotificationQueue {
    pub fn new(config: QueueConfig) -> Self {
        Self {
            config,
            current: None,
            pending: VecDeque::new(),
            promote_at: None,
        }
    }

    pub fn current(&self) -> Option<&NotificationEvent> {
        self.current.as_ref().map(|d| &d.event)
    }

    pub fn displayed(&self) -> Option<&DisplayedNotification> {
        self.current.as_ref()
    }

    pub fn pending(&self) -> impl Iterator<Item = &NotificationEvent> {
        self.pending.iter()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none() && self.pending.is_empty()
    }

    pub fn enqueue(&mut self, event: NotificationEvent, now: DateTime<Utc>) -> EnqueueOutcome {
        if self.is_idle() && self.promote_at.is_none() {
            self.show(event, now);
            return EnqueueOutcome {
                displayed: true,
                dropped: None,
            };
        }

        self.pending.push_back(event);
        let dropped = if self.pending.len() > self.config.max_pending {
            self.evict()
        } else {
            None
        };
        EnqueueOutcome {
            displayed: false,
            dropped,
        }
    }

    /// User dismissal. The next pending event appears after the grace delay.
    pub fn dismiss(&mut self, now: DateTime<Utc>) -> Option<NotificationEvent> {
        let displayed = self.current.take()?;
        self.schedule_promotion(now);
        debug!(id = %displayed.event.id, "notification dismissed");
        Some(displayed.event)
    }

    /// Apply every expiry and promotion due at or before `now`, in time order.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Vec<QueueTransition> {
        let mut transitions = Vec::new();
        loop {
            if let Some(displayed) = &self.current {
                if now < displayed.expires_at {
                    break;
                }
                let at = displayed.expires_at;
                if let Some(expired) = self.current.take() {
                    debug!(id = %expired.event.id, "notification expired");
                    transitions.push(QueueTransition::Dismissed(expired.event));
                }
                self.schedule_promotion(at);
                continue;
            }

            match self.promote_at {
                Some(at) if now >= at => {
                    self.promote_at = None;
                    if let Some(next) = self.pending.pop_front() {
                        self.show(next.clone(), at);
                        transitions.push(QueueTransition::Shown(next));
                    }
                }
                _ => break,
            }
        }
        transitions
    }

    fn show(&mut self, event: NotificationEvent, at: DateTime<Utc>) {
        debug!(id = %event.id, pending = self.pending.len(), "notification shown");
        self.current = Some(DisplayedNotification {
            expires_at: later(at, self.config.display()),
            shown_at: at,
            event,
        });
    }

    fn schedule_promotion(&mut self, at: DateTime<Utc>) {
        self.promote_at = if self.pending.is_empty() {
            None
        } else {
            Some(later(at, self.config.grace()))
        };
    }

    /// Drop the oldest entry of the lowest severity present.
    fn evict(&mut self) -> Option<NotificationEvent> {
        let lowest: Severity = self.pending.iter().map(|e| e.severity).min()?;
        let idx = self.pending.iter().position(|e| e.severity == lowest)?;
        let dropped = self.pending.remove(idx)?;
        warn!(
            id = %dropped.id,
            severity = %dropped.severity,
            cap = self.config.max_pending,
            "notification queue full, dropping entry"
        );
        Some(dropped)
    }
}

fn later(at: DateTime<Utc>, by: Duration) -> DateTime<Utc> {
    at.checked_add_signed(by).unwrap_or(DateTime::<Utc>::MAX_UTC)
}
