//! Validation of decisions before they are created

use super::criteria::SuccessCriteria;
use super::entities::{Decision, DecisionId, MessageOrigin, UserId, Voter, build_roster};
use crate::core::error::DomainError;
use chrono::{DateTime, NaiveDate, Utc};

/// Everything needed to open a decision
#[derive(Debug, Clone)]
pub struct DecisionDraft {
    pub name: String,
    pub proposal: String,
    pub success_criteria: SuccessCriteria,
    pub deadline: NaiveDate,
    pub creator_id: UserId,
    /// Voter IDs as resolved from the roster source; may contain duplicates
    pub voters: Vec<UserId>,
    pub quorum: Option<usize>,
    pub origin: Option<MessageOrigin>,
}

impl DecisionDraft {
    /// Check the draft against the current time
    ///
    /// The roster is deduplicated before it is measured.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::EmptyName);
        }
        if self.proposal.trim().is_empty() {
            return Err(DomainError::EmptyProposal);
        }
        if self.deadline < now.date_naive() {
            return Err(DomainError::DeadlineInPast(self.deadline));
        }

        let roster = build_roster(&DecisionId::new(""), &self.voters).len();
        if roster == 0 {
            return Err(DomainError::EmptyRoster);
        }
        match self.quorum {
            Some(0) => Err(DomainError::ZeroQuorum),
            Some(quorum) if quorum > roster => Err(DomainError::QuorumTooLarge { quorum, roster }),
            _ => Ok(()),
        }
    }

    /// Validate and build the decision plus its roster
    pub fn build(
        self,
        id: DecisionId,
        now: DateTime<Utc>,
    ) -> Result<(Decision, Vec<Voter>), DomainError> {
        self.validate(now)?;

        let roster = build_roster(&id, &self.voters);
        let mut decision = Decision::new(
            id,
            self.name.trim(),
            self.proposal,
            self.success_criteria,
            self.deadline,
            self.creator_id,
            now,
        );
        decision.quorum = self.quorum;
        decision.origin = self.origin;
        Ok((decision, roster))
    }
}
