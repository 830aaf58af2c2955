//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod clock;
pub mod decision_store;
pub mod event_logger;
pub mod record_publisher;
pub mod user_directory;
