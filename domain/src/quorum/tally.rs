//! Vote tallying

use super::vote::{Vote, VoteType};
use serde::{Deserialize, Serialize};

/// Counts of each vote choice
///
/// `total` is the number of votes tallied, including unrecognized ones,
/// so `yes + no + abstain <= total` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VoteCounts {
    pub yes: usize,
    pub no: usize,
    pub abstain: usize,
    pub total: usize,
}

impl VoteCounts {
    pub fn new(yes: usize, no: usize, abstain: usize) -> Self {
        Self {
            yes,
            no,
            abstain,
            total: yes + no + abstain,
        }
    }

    /// Reduce a list of votes into counts
    pub fn from_votes(votes: &[Vote]) -> Self {
        let mut counts = Self::default();
        for vote in votes {
            match vote.vote_type {
                VoteType::Yes => counts.yes += 1,
                VoteType::No => counts.no += 1,
                VoteType::Abstain => counts.abstain += 1,
                VoteType::Unrecognized => {}
            }
            counts.total += 1;
        }
        counts
    }

    /// Votes that landed in no named bucket
    pub fn unrecognized(&self) -> usize {
        self.total - (self.yes + self.no + self.abstain)
    }

    /// Voters on a roster of `required` who have not voted yet
    pub fn remaining(&self, required: usize) -> usize {
        required.saturating_sub(self.total)
    }
}

/// Tally a list of votes
pub fn tally(votes: &[Vote]) -> VoteCounts {
    VoteCounts::from_votes(votes)
}

/// `part / whole` as a percentage rounded to two decimals (0 when `whole` is 0)
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64 * 10_000.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn vote(user: &str, vote_type: VoteType) -> Vote {
        Vote::new("d1".into(), user.into(), vote_type, Utc::now())
    }

    #[test]
    fn test_tally_counts_each_bucket() {
        let votes = vec![
            vote("U1", VoteType::Yes),
            vote("U2", VoteType::Yes),
            vote("U3", VoteType::No),
            vote("U4", VoteType::Abstain),
        ];
        let counts = tally(&votes);
        assert_eq!(counts, VoteCounts::new(2, 1, 1));
        assert_eq!(counts.total, 4);
        assert_eq!(counts.unrecognized(), 0);
    }

    #[test]
    fn test_unrecognized_votes_count_toward_total_only() {
        let votes = vec![vote("U1", VoteType::Yes), vote("U2", VoteType::Unrecognized)];
        let counts = tally(&votes);
        assert_eq!(counts.yes, 1);
        assert_eq!(counts.total, 2);
        assert!(counts.yes + counts.no + counts.abstain < counts.total);
        assert_eq!(counts.unrecognized(), 1);
    }

    #[test]
    fn test_empty_tally() {
        assert_eq!(tally(&[]), VoteCounts::default());
    }

    #[test]
    fn test_remaining_saturates() {
        let counts = VoteCounts::new(3, 0, 0);
        assert_eq!(counts.remaining(5), 2);
        assert_eq!(counts.remaining(2), 0);
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(2, 3), 66.67);
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(2, 4), 50.0);
        assert_eq!(percentage(1, 0), 0.0);
    }
}
