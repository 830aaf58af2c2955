//! Decision lifecycle status

use serde::{Deserialize, Serialize};

/// Lifecycle status of a decision
///
/// `Active` is the only non-terminal state. Once a decision leaves it,
/// it never returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DecisionStatus {
    /// Accepting votes
    #[default]
    Active,
    /// Finalized, proposal passed
    Approved,
    /// Finalized, proposal failed
    Rejected,
    /// Withdrawn before finalization
    Cancelled,
    /// Removed by its creator
    Deleted,
}

impl DecisionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionStatus::Active => "active",
            DecisionStatus::Approved => "approved",
            DecisionStatus::Rejected => "rejected",
            DecisionStatus::Cancelled => "cancelled",
            DecisionStatus::Deleted => "deleted",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, DecisionStatus::Active)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }

    /// Whether the decision reached an approve/reject verdict
    pub fn is_finalized(&self) -> bool {
        matches!(self, DecisionStatus::Approved | DecisionStatus::Rejected)
    }

    /// Check whether `self -> next` is a legal lifecycle transition
    pub fn can_transition_to(&self, next: DecisionStatus) -> bool {
        match (self, next) {
            (DecisionStatus::Active, DecisionStatus::Active) => false,
            (DecisionStatus::Active, _) => true,
            (
                DecisionStatus::Approved
                | DecisionStatus::Rejected
                | DecisionStatus::Cancelled
                | DecisionStatus::Deleted,
                _,
            ) => false,
        }
    }
}

impl std::fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DecisionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(DecisionStatus::Active),
            "approved" => Ok(DecisionStatus::Approved),
            "rejected" => Ok(DecisionStatus::Rejected),
            "cancelled" | "canceled" => Ok(DecisionStatus::Cancelled),
            "deleted" => Ok(DecisionStatus::Deleted),
            other => Err(format!(
                "Unknown decision status: {}. Valid: active, approved, rejected, cancelled, deleted",
                other
            )),
        }
    }
}
