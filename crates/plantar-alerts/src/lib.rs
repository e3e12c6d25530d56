pub mod debounce;
pub mod engine;
pub mod message;
pub mod queue;
pub mod rules;
pub mod session;

pub use debounce::{EngineState, RuleDebounceState};
pub use engine::RuleEngine;
pub use message::AlertDraft;
pub use queue::{DisplayedNotification, EnqueueOutcome, NotificationQueue, QueueTransition};
pub use rules::{evaluate, synthesize, Evaluation, ExternalSignals, RuleId, RuleInput};
pub use session::{MonitorSession, TickReport};
