//! In-memory store

use async_trait::async_trait;
use decision_application::{DecisionRepository, RosterRepository, StoreError, VoteRepository};
use decision_domain::decision::voter_key;
use decision_domain::{Decision, DecisionId, UserId, Vote, Voter};
use std::collections::{HashMap, VecDeque};
use tokio::sync::RwLock;

/// Store backed by maps behind async locks
///
/// With [`with_read_lag`](Self::with_read_lag), vote queries leave out the
/// most recent vote writes, the way an eventually consistent index can.
/// Point reads (`get_vote`) are never stale.
#[derive(Default)]
pub struct InMemoryStore {
    decisions: RwLock<HashMap<DecisionId, Decision>>,
    votes: RwLock<HashMap<String, Vote>>,
    voters: RwLock<HashMap<DecisionId, Vec<Voter>>>,
    /// Keys of the latest vote writes not yet visible to queries
    pending: RwLock<VecDeque<String>>,
    read_lag: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hide the last `writes` vote writes from `query_votes`
    pub fn with_read_lag(mut self, writes: usize) -> Self {
        self.read_lag = writes;
        self
    }
}

#[async_trait]
impl DecisionRepository for InMemoryStore {
    async fn get_decision(&self, id: &DecisionId) -> Result<Option<Decision>, StoreError> {
        Ok(self.decisions.read().await.get(id).cloned())
    }

    async fn put_decision(&self, decision: &Decision) -> Result<(), StoreError> {
        self.decisions
            .write()
            .await
            .insert(decision.id.clone(), decision.clone());
        Ok(())
    }

    async fn list_active_decisions(&self) -> Result<Vec<Decision>, StoreError> {
        let mut active: Vec<Decision> = self
            .decisions
            .read()
            .await
            .values()
            .filter(|d| d.is_active())
            .cloned()
            .collect();
        active.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(active)
    }
}

#[async_trait]
impl VoteRepository for InMemoryStore {
    async fn put_vote(&self, vote: &Vote) -> Result<(), StoreError> {
        self.votes
            .write()
            .await
            .insert(vote.id.clone(), vote.clone());

        if self.read_lag > 0 {
            let mut pending = self.pending.write().await;
            pending.retain(|key| key != &vote.id);
            pending.push_back(vote.id.clone());
            while pending.len() > self.read_lag {
                pending.pop_front();
            }
        }
        Ok(())
    }

    async fn get_vote(
        &self,
        decision_id: &DecisionId,
        user_id: &UserId,
    ) -> Result<Option<Vote>, StoreError> {
        let key = voter_key(decision_id, user_id);
        Ok(self.votes.read().await.get(&key).cloned())
    }

    async fn query_votes(&self, decision_id: &DecisionId) -> Result<Vec<Vote>, StoreError> {
        let pending = self.pending.read().await;
        let mut votes: Vec<Vote> = self
            .votes
            .read()
            .await
            .values()
            .filter(|v| &v.decision_id == decision_id && !pending.contains(&v.id))
            .cloned()
            .collect();
        votes.sort_by(|a, b| a.voted_at.cmp(&b.voted_at));
        Ok(votes)
    }
}

#[async_trait]
impl RosterRepository for InMemoryStore {
    async fn put_voters(
        &self,
        decision_id: &DecisionId,
        voters: &[Voter],
    ) -> Result<(), StoreError> {
        self.voters
            .write()
            .await
            .insert(decision_id.clone(), voters.to_vec());
        Ok(())
    }

    async fn voters(&self, decision_id: &DecisionId) -> Result<Vec<Voter>, StoreError> {
        Ok(self
            .voters
            .read()
            .await
            .get(decision_id)
            .cloned()
            .unwrap_or_default())
    }
}
