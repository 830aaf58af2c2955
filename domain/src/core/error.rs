//! Domain error types

use chrono::NaiveDate;
use thiserror::Error;

/// Domain-level errors raised while validating new decisions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("A decision needs a name")]
    EmptyName,

    #[error("A decision needs a proposal")]
    EmptyProposal,

    #[error("A decision needs at least one voter")]
    EmptyRoster,

    #[error("The deadline {0} is already in the past")]
    DeadlineInPast(NaiveDate),

    #[error("Quorum {quorum} exceeds the {roster} voters on the roster")]
    QuorumTooLarge { quorum: usize, roster: usize },

    #[error("Quorum must be at least 1")]
    ZeroQuorum,
}

impl DomainError {
    /// Check if this error concerns the voter roster
    pub fn is_roster_error(&self) -> bool {
        matches!(
            self,
            DomainError::EmptyRoster | DomainError::QuorumTooLarge { .. } | DomainError::ZeroQuorum
        )
    }
}
