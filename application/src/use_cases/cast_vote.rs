//! Cast Vote use case
//!
//! Records a vote and, when the decision becomes due, runs finalization.
//!
//! The vote query issued right after the write may not contain the write
//! yet, so the fresh vote is merged into the query result before it is
//! tallied. Without that, the last voter of a roster could see the
//! decision as incomplete and finalization would never fire.

use crate::ports::decision_store::StoreError;
use crate::ports::event_logger::DecisionEvent;
use crate::services::DecisionServices;
use crate::use_cases::finalize_decision::{FinalizeDecisionUseCase, FinalizeOutcome};
use crate::use_cases::shared::on_roster;
use decision_domain::{
    DeadlockDetector, DeadlockResult, DecisionId, DecisionStatus, FinalizationStateMachine,
    UserId, Vote, VoteCounts, VoteType, merge_known_write, required_count, tally,
};
use serde_json::json;
use tracing::{info, warn};

/// Input for the CastVote use case
#[derive(Debug, Clone)]
pub struct CastVoteInput {
    pub decision_id: DecisionId,
    pub user_id: UserId,
    pub vote_type: VoteType,
}

impl CastVoteInput {
    pub fn new(decision_id: DecisionId, user_id: UserId, vote_type: VoteType) -> Self {
        Self {
            decision_id,
            user_id,
            vote_type,
        }
    }
}

/// Details of a recorded vote
#[derive(Debug, Clone)]
pub struct VoteReceipt {
    pub vote: Vote,
    /// The voter's previous choice, if this vote replaced one
    pub replaced: Option<VoteType>,
    /// Counts after merging this vote into the stored votes
    pub counts: VoteCounts,
    pub required_voters: usize,
    /// Advisory only; never blocks or triggers finalization
    pub deadlock: DeadlockResult,
    /// Set when this vote made the decision due
    pub finalization: Option<FinalizeOutcome>,
}

/// Result of a vote request
#[derive(Debug, Clone)]
pub enum CastVoteOutcome {
    Recorded(Box<VoteReceipt>),
    NotFound(DecisionId),
    NotActive(DecisionStatus),
    NotEligible(UserId),
}

impl CastVoteOutcome {
    /// User-facing message
    pub fn message(&self) -> String {
        match self {
            CastVoteOutcome::Recorded(receipt) => {
                let verb = if receipt.replaced.is_some() {
                    "updated"
                } else {
                    "recorded"
                };
                format!(
                    "Your vote ({}) has been {}. {} of {} votes cast.",
                    receipt.vote.vote_type, verb, receipt.counts.total, receipt.required_voters
                )
            }
            CastVoteOutcome::NotFound(id) => format!("Decision {} not found", id),
            CastVoteOutcome::NotActive(status) => format!(
                "This decision is no longer active (status: {}); votes are closed",
                status
            ),
            CastVoteOutcome::NotEligible(user) => format!(
                "{} is not a required voter for this decision",
                user
            ),
        }
    }
}

/// Use case for casting (or changing) a vote
pub struct CastVoteUseCase {
    services: DecisionServices,
    finalize: FinalizeDecisionUseCase,
}

impl CastVoteUseCase {
    pub fn new(services: DecisionServices) -> Self {
        Self {
            finalize: FinalizeDecisionUseCase::new(services.clone()),
            services,
        }
    }

    pub async fn execute(&self, input: CastVoteInput) -> Result<CastVoteOutcome, StoreError> {
        let CastVoteInput {
            decision_id,
            user_id,
            vote_type,
        } = input;

        let Some(decision) = self.services.decisions.get_decision(&decision_id).await? else {
            return Ok(CastVoteOutcome::NotFound(decision_id));
        };
        if !decision.is_active() {
            return Ok(CastVoteOutcome::NotActive(decision.status()));
        }

        let roster = self.services.roster.voters(&decision_id).await?;
        if !on_roster(&roster, &user_id) {
            return Ok(CastVoteOutcome::NotEligible(user_id));
        }
        let required_voters = required_count(&roster);

        let previous = self.services.votes.get_vote(&decision_id, &user_id).await?;
        let now = self.services.clock.now();
        let vote = Vote::new(decision_id.clone(), user_id, vote_type, now);
        self.services.votes.put_vote(&vote).await?;

        let queried = self.services.votes.query_votes(&decision_id).await?;
        let votes = merge_known_write(&vote, queried);
        let counts = tally(&votes);
        let deadlock =
            DeadlockDetector::check(&counts, decision.success_criteria, required_voters);

        info!(
            "Vote {} from {} on {} ({}/{} cast)",
            vote.vote_type, vote.user_id, decision_id, counts.total, required_voters
        );
        self.services.logger.log(DecisionEvent::new(
            "vote_cast",
            json!({
                "decision_id": decision_id,
                "user_id": vote.user_id,
                "vote_type": vote.vote_type,
                "replaced": previous.as_ref().map(|p| p.vote_type),
                "votes_cast": counts.total,
                "required_voters": required_voters,
                "deadlocked": deadlock.deadlocked,
            }),
        ));

        let finalization = if FinalizationStateMachine::should_finalize(
            decision.status(),
            decision.deadline,
            now,
            counts.total,
            required_voters,
        ) {
            match self.finalize.execute(&decision_id, Some(votes)).await {
                Ok(outcome) => Some(outcome),
                Err(e) => {
                    // The vote is stored; the next vote or deadline sweep retries.
                    warn!("Finalization of {} after vote failed: {}", decision_id, e);
                    None
                }
            }
        } else {
            None
        };

        Ok(CastVoteOutcome::Recorded(Box::new(VoteReceipt {
            vote,
            replaced: previous.map(|p| p.vote_type),
            counts,
            required_voters,
            deadlock,
            finalization,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::clock::FixedClock;
    use crate::ports::decision_store::{DecisionRepository, RosterRepository};
    use crate::use_cases::test_support::MockStore;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use decision_domain::{Decision, SuccessCriteria, build_roster};
    use std::sync::Arc;

    fn id() -> DecisionId {
        DecisionId::new("1792314000.000001")
    }

    async fn setup(store: Arc<MockStore>, criteria: SuccessCriteria) -> CastVoteUseCase {
        let decision = Decision::new(
            id(),
            "Team offsite",
            "Hold the offsite in Lisbon",
            criteria,
            NaiveDate::from_ymd_opt(2026, 10, 25).unwrap(),
            UserId::new("U1"),
            Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap(),
        );
        store.put_decision(&decision).await.unwrap();
        store
            .put_voters(&id(), &build_roster(&id(), &["U1".into(), "U2".into(), "U3".into()]))
            .await
            .unwrap();
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2026, 10, 18, 10, 0, 0).unwrap(),
        ));
        CastVoteUseCase::new(DecisionServices::from_store(store, clock))
    }

    fn vote(user: &str, vote_type: VoteType) -> CastVoteInput {
        CastVoteInput::new(id(), UserId::new(user), vote_type)
    }

    #[tokio::test]
    async fn test_full_roster_finalizes() {
        let store = Arc::new(MockStore::default());
        let use_case = setup(store.clone(), SuccessCriteria::SimpleMajority).await;

        use_case.execute(vote("U1", VoteType::Yes)).await.unwrap();
        use_case.execute(vote("U2", VoteType::Yes)).await.unwrap();
        let outcome = use_case.execute(vote("U3", VoteType::No)).await.unwrap();

        let CastVoteOutcome::Recorded(receipt) = outcome else {
            panic!("expected Recorded");
        };
        let Some(FinalizeOutcome::Finalized(report)) = &receipt.finalization else {
            panic!("expected finalization");
        };
        assert!(report.result.passed);
        assert_eq!(report.result.percentage, 66.67);
        assert!(report.result.reason.contains("66.67%"));
        assert_eq!(report.status(), DecisionStatus::Approved);
    }

    #[tokio::test]
    async fn test_lagging_query_still_finalizes_on_last_vote() {
        let store = Arc::new(MockStore::lagging());
        let use_case = setup(store.clone(), SuccessCriteria::SimpleMajority).await;

        use_case.execute(vote("U1", VoteType::Yes)).await.unwrap();
        use_case.execute(vote("U2", VoteType::No)).await.unwrap();
        let outcome = use_case.execute(vote("U3", VoteType::Yes)).await.unwrap();

        let CastVoteOutcome::Recorded(receipt) = outcome else {
            panic!("expected Recorded");
        };
        assert_eq!(receipt.counts.total, 3);
        assert_eq!(receipt.counts.yes, 2);
        assert!(matches!(
            receipt.finalization,
            Some(FinalizeOutcome::Finalized(_))
        ));
    }

    #[tokio::test]
    async fn test_revote_replaces_previous() {
        let store = Arc::new(MockStore::default());
        let use_case = setup(store, SuccessCriteria::SimpleMajority).await;

        use_case.execute(vote("U1", VoteType::No)).await.unwrap();
        let outcome = use_case.execute(vote("U1", VoteType::Yes)).await.unwrap();

        let CastVoteOutcome::Recorded(receipt) = &outcome else {
            panic!("expected Recorded");
        };
        assert_eq!(receipt.replaced, Some(VoteType::No));
        assert_eq!(receipt.counts.total, 1);
        assert_eq!(receipt.counts.yes, 1);
        assert!(receipt.finalization.is_none());
        assert!(outcome.message().contains("updated"));
    }

    #[tokio::test]
    async fn test_ineligible_voter_refused() {
        let store = Arc::new(MockStore::default());
        let use_case = setup(store, SuccessCriteria::SimpleMajority).await;

        let outcome = use_case.execute(vote("U9", VoteType::Yes)).await.unwrap();
        assert!(matches!(outcome, CastVoteOutcome::NotEligible(_)));
        assert!(outcome.message().contains("not a required voter"));
    }

    #[tokio::test]
    async fn test_vote_after_finalization_refused() {
        let store = Arc::new(MockStore::default());
        let use_case = setup(store, SuccessCriteria::Unanimous).await;

        use_case.execute(vote("U1", VoteType::Yes)).await.unwrap();
        use_case.execute(vote("U2", VoteType::No)).await.unwrap();
        use_case.execute(vote("U3", VoteType::Yes)).await.unwrap();

        let outcome = use_case.execute(vote("U2", VoteType::Yes)).await.unwrap();
        assert!(matches!(
            outcome,
            CastVoteOutcome::NotActive(DecisionStatus::Rejected)
        ));
        assert!(outcome.message().contains("no longer active"));
    }

    #[tokio::test]
    async fn test_deadlock_is_advisory() {
        let store = Arc::new(MockStore::default());
        let use_case = setup(store.clone(), SuccessCriteria::Unanimous).await;

        let outcome = use_case.execute(vote("U1", VoteType::No)).await.unwrap();
        let CastVoteOutcome::Recorded(receipt) = outcome else {
            panic!("expected Recorded");
        };
        assert!(receipt.deadlock.deadlocked);
        assert!(receipt.finalization.is_none());
        assert!(store.get_decision(&id()).await.unwrap().unwrap().is_active());
    }

    #[tokio::test]
    async fn test_vote_after_deadline_finalizes() {
        let store = Arc::new(MockStore::default());
        let decision = Decision::new(
            id(),
            "Late",
            "Deadline already over",
            SuccessCriteria::SimpleMajority,
            NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            UserId::new("U1"),
            Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap(),
        );
        store.put_decision(&decision).await.unwrap();
        store
            .put_voters(&id(), &build_roster(&id(), &["U1".into(), "U2".into()]))
            .await
            .unwrap();
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2026, 10, 18, 10, 0, 0).unwrap(),
        ));
        clock.advance(Duration::days(1));
        let use_case = CastVoteUseCase::new(DecisionServices::from_store(store, clock));

        let outcome = use_case.execute(vote("U1", VoteType::Yes)).await.unwrap();
        let CastVoteOutcome::Recorded(receipt) = outcome else {
            panic!("expected Recorded");
        };
        assert!(matches!(
            receipt.finalization,
            Some(FinalizeOutcome::Finalized(ref report)) if report.status() == DecisionStatus::Approved
        ));
    }
}
