//! Vote types for decisions
//!
//! This module defines the voting primitives: the closed set of vote
//! choices and the per-voter vote record.

use crate::decision::{DecisionId, UserId, voter_key};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A voter's choice
///
/// Stored records carrying any other value deserialize as
/// [`VoteType::Unrecognized`]. Such votes still count toward the total
/// but toward no named bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Yes,
    No,
    Abstain,
    #[serde(other)]
    Unrecognized,
}

impl VoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteType::Yes => "yes",
            VoteType::No => "no",
            VoteType::Abstain => "abstain",
            VoteType::Unrecognized => "unrecognized",
        }
    }
}

impl std::fmt::Display for VoteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for VoteType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" | "y" | "approve" => Ok(VoteType::Yes),
            "no" | "n" | "reject" => Ok(VoteType::No),
            "abstain" | "a" => Ok(VoteType::Abstain),
            _ => Err(format!("Unknown vote: {}. Valid: yes, no, abstain", s)),
        }
    }
}

/// A single voter's live vote on a decision
///
/// At most one vote exists per (decision, user). A newer vote for the
/// same voter replaces the older one.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use decision_domain::decision::{DecisionId, UserId};
/// use decision_domain::quorum::{Vote, VoteType};
///
/// let vote = Vote::new(DecisionId::new("d1"), UserId::new("U1"), VoteType::Yes, Utc::now());
/// assert_eq!(vote.id, "d1#U1");
/// assert!(vote.is_yes());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id: String,
    pub decision_id: DecisionId,
    pub user_id: UserId,
    pub vote_type: VoteType,
    pub voted_at: DateTime<Utc>,
}

impl Vote {
    /// Create a new vote
    pub fn new(
        decision_id: DecisionId,
        user_id: UserId,
        vote_type: VoteType,
        voted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: voter_key(&decision_id, &user_id),
            decision_id,
            user_id,
            vote_type,
            voted_at,
        }
    }

    pub fn is_yes(&self) -> bool {
        self.vote_type == VoteType::Yes
    }

    pub fn is_no(&self) -> bool {
        self.vote_type == VoteType::No
    }

    /// Whether `self` should win over `other` under last-write-wins
    pub fn supersedes(&self, other: &Vote) -> bool {
        self.voted_at >= other.voted_at
    }
}
