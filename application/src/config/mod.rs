//! Application-level configuration.
//!
//! Controls how use cases behave, independent of where the values came
//! from (file, environment or defaults).

use decision_domain::SuccessCriteria;

/// Engine behavior configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Render and publish a decision record after finalization.
    pub records_enabled: bool,
    /// Success rule used when a new decision does not name one.
    pub default_criteria: SuccessCriteria,
    /// Deadline offset (in days) used when a new decision does not set one.
    pub default_deadline_days: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            records_enabled: true,
            default_criteria: SuccessCriteria::SimpleMajority,
            default_deadline_days: 7,
        }
    }
}

impl EngineConfig {
    /// Disable record generation (e.g. for dry runs).
    pub fn without_records(mut self) -> Self {
        self.records_enabled = false;
        self
    }
}
