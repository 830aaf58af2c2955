//! Storage ports
//!
//! The engine owns decisions; storage is a passive key-value store.
//! Vote queries may lag behind vote writes (read-after-write is only
//! eventually consistent), which is why callers merge their own write
//! into query results before tallying.

use async_trait::async_trait;
use decision_domain::{Decision, DecisionId, UserId, Vote, Voter};
use thiserror::Error;

/// Errors from a storage backend
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt record {key}: {message}")]
    Corrupt { key: String, message: String },

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Decisions keyed by decision ID
#[async_trait]
pub trait DecisionRepository: Send + Sync {
    async fn get_decision(&self, id: &DecisionId) -> Result<Option<Decision>, StoreError>;

    /// Insert or overwrite a decision
    async fn put_decision(&self, decision: &Decision) -> Result<(), StoreError>;

    /// All decisions currently in the `active` state
    async fn list_active_decisions(&self) -> Result<Vec<Decision>, StoreError>;
}

/// Votes keyed by (decision ID, user ID)
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Insert or replace the vote for `vote.user_id`
    async fn put_vote(&self, vote: &Vote) -> Result<(), StoreError>;

    async fn get_vote(
        &self,
        decision_id: &DecisionId,
        user_id: &UserId,
    ) -> Result<Option<Vote>, StoreError>;

    /// All votes for a decision; may not yet include recent writes
    async fn query_votes(&self, decision_id: &DecisionId) -> Result<Vec<Vote>, StoreError>;
}

/// Voter rosters keyed by decision ID
#[async_trait]
pub trait RosterRepository: Send + Sync {
    async fn put_voters(&self, decision_id: &DecisionId, voters: &[Voter])
    -> Result<(), StoreError>;

    async fn voters(&self, decision_id: &DecisionId) -> Result<Vec<Voter>, StoreError>;
}
