//! In-process store for use case tests.

use crate::ports::decision_store::{
    DecisionRepository, RosterRepository, StoreError, VoteRepository,
};
use async_trait::async_trait;
use decision_domain::{Decision, DecisionId, UserId, Vote, Voter};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Hash-map store whose vote queries can be made to miss the latest write
#[derive(Default)]
pub(crate) struct MockStore {
    decisions: Mutex<HashMap<DecisionId, Decision>>,
    votes: Mutex<HashMap<String, Vote>>,
    /// Key of the most recent vote write, hidden from queries while lagging
    last_write: Mutex<Option<String>>,
    voters: Mutex<HashMap<DecisionId, Vec<Voter>>>,
    /// Decision committed by the next roster read, standing in for a
    /// concurrent writer
    commit_on_roster_read: Mutex<Option<Decision>>,
    lagging: AtomicBool,
    fail_decision_writes: AtomicBool,
    pub(crate) decision_writes: AtomicUsize,
}

impl MockStore {
    pub(crate) fn lagging() -> Self {
        let store = Self::default();
        store.lagging.store(true, Ordering::SeqCst);
        store
    }

    pub(crate) fn fail_decision_writes(&self) {
        self.fail_decision_writes.store(true, Ordering::SeqCst);
    }

    pub(crate) fn commit_on_roster_read(&self, decision: Decision) {
        *self.commit_on_roster_read.lock().unwrap() = Some(decision);
    }

    pub(crate) fn writes(&self) -> usize {
        self.decision_writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DecisionRepository for MockStore {
    async fn get_decision(&self, id: &DecisionId) -> Result<Option<Decision>, StoreError> {
        Ok(self.decisions.lock().unwrap().get(id).cloned())
    }

    async fn put_decision(&self, decision: &Decision) -> Result<(), StoreError> {
        if self.fail_decision_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("write refused".to_string()));
        }
        self.decision_writes.fetch_add(1, Ordering::SeqCst);
        self.decisions
            .lock()
            .unwrap()
            .insert(decision.id.clone(), decision.clone());
        Ok(())
    }

    async fn list_active_decisions(&self) -> Result<Vec<Decision>, StoreError> {
        let mut active: Vec<Decision> = self
            .decisions
            .lock()
            .unwrap()
            .values()
            .filter(|d| d.is_active())
            .cloned()
            .collect();
        active.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(active)
    }
}

#[async_trait]
impl VoteRepository for MockStore {
    async fn put_vote(&self, vote: &Vote) -> Result<(), StoreError> {
        self.votes
            .lock()
            .unwrap()
            .insert(vote.id.clone(), vote.clone());
        *self.last_write.lock().unwrap() = Some(vote.id.clone());
        Ok(())
    }

    async fn get_vote(
        &self,
        decision_id: &DecisionId,
        user_id: &UserId,
    ) -> Result<Option<Vote>, StoreError> {
        let key = decision_domain::decision::voter_key(decision_id, user_id);
        Ok(self.votes.lock().unwrap().get(&key).cloned())
    }

    async fn query_votes(&self, decision_id: &DecisionId) -> Result<Vec<Vote>, StoreError> {
        let hidden = if self.lagging.load(Ordering::SeqCst) {
            self.last_write.lock().unwrap().clone()
        } else {
            None
        };
        let mut votes: Vec<Vote> = self
            .votes
            .lock()
            .unwrap()
            .values()
            .filter(|v| &v.decision_id == decision_id)
            .filter(|v| hidden.as_ref() != Some(&v.id))
            .cloned()
            .collect();
        votes.sort_by(|a, b| a.voted_at.cmp(&b.voted_at));
        Ok(votes)
    }
}

#[async_trait]
impl RosterRepository for MockStore {
    async fn put_voters(
        &self,
        decision_id: &DecisionId,
        voters: &[Voter],
    ) -> Result<(), StoreError> {
        self.voters
            .lock()
            .unwrap()
            .insert(decision_id.clone(), voters.to_vec());
        Ok(())
    }

    async fn voters(&self, decision_id: &DecisionId) -> Result<Vec<Voter>, StoreError> {
        if let Some(decision) = self.commit_on_roster_read.lock().unwrap().take() {
            self.decisions
                .lock()
                .unwrap()
                .insert(decision.id.clone(), decision);
        }
        Ok(self
            .voters
            .lock()
            .unwrap()
            .get(decision_id)
            .cloned()
            .unwrap_or_default())
    }
}
