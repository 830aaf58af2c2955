//! Decision, roster and identity types

use super::criteria::SuccessCriteria;
use super::status::DecisionStatus;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Opaque decision identifier
///
/// Usually derived from the timestamp of the message that started the
/// decision (e.g. `"1718000000.123456"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecisionId(String);

impl DecisionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build an identifier from a point in time (`<unix seconds>.<micros>`)
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        Self(format!("{}.{:06}", at.timestamp(), at.timestamp_subsec_micros()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DecisionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DecisionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Opaque user identifier from the messaging platform
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Composite storage key for per-voter records (`<decision>#<user>`)
pub fn voter_key(decision_id: &DecisionId, user_id: &UserId) -> String {
    format!("{}#{}", decision_id, user_id)
}

/// Where the decision was posted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageOrigin {
    pub channel_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<String>,
}

impl MessageOrigin {
    pub fn new(channel_id: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            thread_ts: None,
        }
    }

    pub fn with_thread(mut self, thread_ts: impl Into<String>) -> Self {
        self.thread_ts = Some(thread_ts.into());
        self
    }
}

/// A proposal put to a group of voters
///
/// The `status` field is only changed through
/// [`FinalizationStateMachine`](crate::lifecycle::FinalizationStateMachine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub id: DecisionId,
    pub name: String,
    pub proposal: String,
    pub success_criteria: SuccessCriteria,
    /// Last day on which votes are accepted
    pub deadline: NaiveDate,
    status: DecisionStatus,
    pub creator_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Explicit quorum for unanimous decisions (defaults to the roster size)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quorum: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<MessageOrigin>,
}

impl Decision {
    /// Create a new active decision
    pub fn new(
        id: DecisionId,
        name: impl Into<String>,
        proposal: impl Into<String>,
        success_criteria: SuccessCriteria,
        deadline: NaiveDate,
        creator_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            proposal: proposal.into(),
            success_criteria,
            deadline,
            status: DecisionStatus::Active,
            creator_id,
            created_at,
            updated_at: created_at,
            quorum: None,
            origin: None,
        }
    }

    pub fn with_quorum(mut self, quorum: usize) -> Self {
        self.quorum = Some(quorum);
        self
    }

    pub fn with_origin(mut self, origin: MessageOrigin) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn status(&self) -> DecisionStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn is_creator(&self, user_id: &UserId) -> bool {
        &self.creator_id == user_id
    }

    pub(crate) fn set_status(&mut self, status: DecisionStatus, at: DateTime<Utc>) {
        self.status = status;
        self.updated_at = at;
    }
}

/// Roster entry: a user who must vote on a decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voter {
    pub id: String,
    pub decision_id: DecisionId,
    pub user_id: UserId,
    pub required: bool,
}

impl Voter {
    /// Create a required roster entry
    pub fn required(decision_id: &DecisionId, user_id: UserId) -> Self {
        Self {
            id: voter_key(decision_id, &user_id),
            decision_id: decision_id.clone(),
            user_id,
            required: true,
        }
    }
}

/// Build a roster from user IDs, dropping duplicates but keeping first-seen order
pub fn build_roster(decision_id: &DecisionId, user_ids: &[UserId]) -> Vec<Voter> {
    let mut seen = std::collections::HashSet::new();
    user_ids
        .iter()
        .filter(|u| seen.insert((*u).clone()))
        .map(|u| Voter::required(decision_id, u.clone()))
        .collect()
}

/// Number of roster entries marked as required
pub fn required_count(roster: &[Voter]) -> usize {
    roster.iter().filter(|v| v.required).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Decision {
        Decision::new(
            DecisionId::new("1718000000.000100"),
            "Adopt Rust",
            "Use Rust for the new service",
            SuccessCriteria::SimpleMajority,
            NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
            UserId::new("U1"),
            Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_new_decision_is_active() {
        let decision = sample();
        assert_eq!(decision.status(), DecisionStatus::Active);
        assert_eq!(decision.created_at, decision.updated_at);
        assert!(decision.is_creator(&UserId::new("U1")));
        assert!(!decision.is_creator(&UserId::new("U2")));
    }

    #[test]
    fn test_decision_id_from_timestamp() {
        let at = Utc.timestamp_opt(1718000000, 123_456_000).unwrap();
        assert_eq!(DecisionId::from_timestamp(at).as_str(), "1718000000.123456");
    }

    #[test]
    fn test_build_roster_dedupes() {
        let id = DecisionId::new("d1");
        let roster = build_roster(
            &id,
            &[UserId::new("U2"), UserId::new("U1"), UserId::new("U2")],
        );
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].user_id, UserId::new("U2"));
        assert_eq!(roster[0].id, "d1#U2");
        assert!(roster.iter().all(|v| v.required));
        assert_eq!(required_count(&roster), 2);
    }

    #[test]
    fn test_decision_serializes_camel_case() {
        let decision = sample().with_quorum(2);
        let value = serde_json::to_value(&decision).unwrap();
        assert_eq!(value["successCriteria"], "simple_majority");
        assert_eq!(value["status"], "active");
        assert_eq!(value["creatorId"], "U1");
        assert_eq!(value["deadline"], "2026-10-20");
        assert_eq!(value["quorum"], 2);
        assert!(value.get("origin").is_none());

        let back: Decision = serde_json::from_value(value).unwrap();
        assert_eq!(back, decision);
    }
}
