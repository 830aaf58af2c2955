//! Shared helpers for use cases.

use decision_domain::{UserId, Vote, Voter};
use std::collections::HashSet;

/// Roster voters that have no vote in `votes`, in roster order
pub(crate) fn missing_voters(roster: &[Voter], votes: &[Vote]) -> Vec<UserId> {
    let voted: HashSet<&UserId> = votes.iter().map(|v| &v.user_id).collect();
    roster
        .iter()
        .filter(|v| v.required && !voted.contains(&v.user_id))
        .map(|v| v.user_id.clone())
        .collect()
}

/// Whether `user_id` is on the roster
pub(crate) fn on_roster(roster: &[Voter], user_id: &UserId) -> bool {
    roster.iter().any(|v| &v.user_id == user_id)
}
