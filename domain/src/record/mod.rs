//! Decision records

pub mod generator;

pub use generator::{DecisionRecord, RecordError, RecordGenerator};
