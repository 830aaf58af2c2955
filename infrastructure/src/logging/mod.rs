//! Logging infrastructure: structured decision event logging.
//!
//! Provides [`JsonlDecisionLogger`], a JSONL file writer that implements
//! the [`DecisionEventLogger`](decision_application::DecisionEventLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlDecisionLogger;
