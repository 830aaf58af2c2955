//! Port for structured decision event logging.
//!
//! Defines the [`DecisionEventLogger`] trait for recording lifecycle events
//! (decision created, vote cast, finalized, ...) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures an audit
//! trail in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured decision event for logging.
pub struct DecisionEvent {
    /// Event type identifier (e.g., "vote_cast", "decision_finalized").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl DecisionEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging decision events to a structured log.
///
/// The `log` method is synchronous and non-fallible; logging failures
/// never disturb the operation being logged.
pub trait DecisionEventLogger: Send + Sync {
    fn log(&self, event: DecisionEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoDecisionLogger;

impl DecisionEventLogger for NoDecisionLogger {
    fn log(&self, _event: DecisionEvent) {}
}
