//! Decision Status use case
//!
//! Read-only view of a decision: votes so far, a provisional result as if
//! the decision were finalized now, and the deadlock advisory.

use crate::ports::decision_store::StoreError;
use crate::services::DecisionServices;
use crate::use_cases::shared::missing_voters;
use decision_domain::{
    DeadlockDetector, DeadlockResult, Decision, DecisionId, DecisionResult, OutcomeEvaluator,
    UserId, Vote, VoteCounts, required_count, tally,
};
use serde::Serialize;

/// Snapshot of a decision and its votes
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionStatusView {
    pub decision: Decision,
    pub votes: Vec<Vote>,
    pub counts: VoteCounts,
    pub required_voters: usize,
    /// Outcome if the decision were finalized with the current votes
    pub provisional: DecisionResult,
    pub deadlock: DeadlockResult,
    pub missing_voters: Vec<UserId>,
}

/// Use case for inspecting a decision
pub struct DecisionStatusUseCase {
    services: DecisionServices,
}

impl DecisionStatusUseCase {
    pub fn new(services: DecisionServices) -> Self {
        Self { services }
    }

    /// Returns `None` for an unknown decision
    pub async fn execute(
        &self,
        decision_id: &DecisionId,
    ) -> Result<Option<DecisionStatusView>, StoreError> {
        let Some(decision) = self.services.decisions.get_decision(decision_id).await? else {
            return Ok(None);
        };
        let roster = self.services.roster.voters(decision_id).await?;
        let votes = self.services.votes.query_votes(decision_id).await?;

        let required_voters = required_count(&roster);
        let counts = tally(&votes);
        let provisional = OutcomeEvaluator::evaluate_criteria(
            decision.success_criteria,
            &counts,
            required_voters,
            decision.quorum,
        );
        let deadlock =
            DeadlockDetector::check(&counts, decision.success_criteria, required_voters);
        let missing_voters = missing_voters(&roster, &votes);

        Ok(Some(DecisionStatusView {
            decision,
            votes,
            counts,
            required_voters,
            provisional,
            deadlock,
            missing_voters,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::clock::FixedClock;
    use crate::ports::decision_store::{DecisionRepository, RosterRepository, VoteRepository};
    use crate::use_cases::test_support::MockStore;
    use chrono::{NaiveDate, TimeZone, Utc};
    use decision_domain::{SuccessCriteria, VoteType, build_roster};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_status_view() {
        let store = Arc::new(MockStore::default());
        let id = DecisionId::new("1792314000.000003");
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
        let decision = Decision::new(
            id.clone(),
            "Adopt RFC process",
            "All breaking changes go through an RFC",
            SuccessCriteria::Unanimous,
            NaiveDate::from_ymd_opt(2026, 10, 30).unwrap(),
            UserId::new("U1"),
            at,
        );
        store.put_decision(&decision).await.unwrap();
        store
            .put_voters(&id, &build_roster(&id, &["U1".into(), "U2".into(), "U3".into()]))
            .await
            .unwrap();
        store
            .put_vote(&Vote::new(id.clone(), "U2".into(), VoteType::No, at))
            .await
            .unwrap();

        let use_case = DecisionStatusUseCase::new(DecisionServices::from_store(
            store,
            Arc::new(FixedClock::new(at)),
        ));
        let view = use_case.execute(&id).await.unwrap().unwrap();

        assert_eq!(view.counts, VoteCounts::new(0, 1, 0));
        assert_eq!(view.required_voters, 3);
        assert!(!view.provisional.passed);
        assert!(view.deadlock.deadlocked);
        assert_eq!(view.missing_voters, vec![UserId::new("U1"), UserId::new("U3")]);
        assert!(view.decision.is_active());
    }

    #[tokio::test]
    async fn test_unknown_decision_is_none() {
        let store = Arc::new(MockStore::default());
        let clock = Arc::new(FixedClock::new(Utc::now()));
        let use_case = DecisionStatusUseCase::new(DecisionServices::from_store(store, clock));
        assert!(use_case.execute(&DecisionId::new("x")).await.unwrap().is_none());
    }
}
