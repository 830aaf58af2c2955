//! Read-after-write correction for vote queries
//!
//! The vote store is eventually consistent: a query issued right after a
//! write may not contain that write yet. Callers that just wrote a vote
//! merge it into the query result before tallying.

use super::vote::Vote;
use crate::decision::UserId;
use std::collections::HashMap;

/// Merge a freshly written vote into a queried vote list
///
/// The result holds at most one vote per voter. Duplicates in `queried`
/// collapse to the latest one, then `written` replaces the entry for its
/// voter unless the stored entry is strictly newer. If the voter is
/// missing, `written` is appended. Order of first appearance is kept.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use decision_domain::quorum::{Vote, VoteType, merge_known_write};
///
/// let now = Utc::now();
/// let queried = vec![Vote::new("d1".into(), "U1".into(), VoteType::Yes, now)];
/// let written = Vote::new("d1".into(), "U2".into(), VoteType::No, now);
///
/// let merged = merge_known_write(&written, queried);
/// assert_eq!(merged.len(), 2);
/// ```
pub fn merge_known_write(written: &Vote, queried: Vec<Vote>) -> Vec<Vote> {
    let mut merged: Vec<Vote> = Vec::with_capacity(queried.len() + 1);
    let mut index: HashMap<UserId, usize> = HashMap::new();

    for vote in queried.into_iter().chain(std::iter::once(written.clone())) {
        match index.get(&vote.user_id) {
            Some(&i) => {
                if vote.supersedes(&merged[i]) {
                    merged[i] = vote;
                }
            }
            None => {
                index.insert(vote.user_id.clone(), merged.len());
                merged.push(vote);
            }
        }
    }

    merged
}
