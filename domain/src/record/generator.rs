//! Decision record rendering
//!
//! Turns a finalized decision into a markdown document with six fixed
//! sections: Status, Context, Decision, Consequences, Alternatives
//! Considered and References. Output depends only on the inputs, so the
//! same decision always renders the same document.

use crate::decision::{Decision, DecisionId, DecisionStatus, UserId};
use crate::quorum::{DecisionResult, VoteCounts};
use crate::util::slugify;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Write;
use thiserror::Error;

/// Width of the zero-padded record number
const RECORD_NUMBER_WIDTH: usize = 6;

/// Errors from record rendering
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Cannot render a decision record for a decision that is {0}")]
    NotFinalized(DecisionStatus),
}

/// A rendered decision record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub decision_id: DecisionId,
    /// Zero-padded number derived from the decision ID
    pub number: String,
    pub title: String,
    /// File-name friendly form of the decision name
    pub slug: String,
    pub content: String,
}

impl DecisionRecord {
    /// Suggested file name, e.g. `ADR-1792314000000100-adopt-rust.md`
    pub fn file_name(&self) -> String {
        if self.slug.is_empty() {
            format!("ADR-{}.md", self.number)
        } else {
            format!("ADR-{}-{}.md", self.number, self.slug)
        }
    }
}

/// `<digits>` or `<digits>.<digits>`
fn is_timestamp_id(raw: &str) -> bool {
    let mut parts = raw.splitn(2, '.');
    let whole = parts.next().unwrap_or_default();
    let fraction = parts.next().unwrap_or("0");
    !whole.is_empty()
        && !fraction.is_empty()
        && whole.chars().all(|c| c.is_ascii_digit())
        && fraction.chars().all(|c| c.is_ascii_digit())
}

/// Renders decision records
pub struct RecordGenerator;

impl RecordGenerator {
    /// Record number for a decision
    ///
    /// A pure function of the ID, so concurrent decisions never contend
    /// for it. Timestamp IDs (`<secs>.<micros>`) keep every digit,
    /// zero-padded to at least six. Any other ID is used as-is, lowercased,
    /// with characters outside `[a-z0-9-]` replaced by `-`.
    ///
    /// # Example
    ///
    /// ```
    /// use decision_domain::decision::DecisionId;
    /// use decision_domain::record::RecordGenerator;
    ///
    /// assert_eq!(RecordGenerator::record_number(&DecisionId::new("1718000000.000042")), "1718000000000042");
    /// assert_eq!(RecordGenerator::record_number(&DecisionId::new("42")), "000042");
    /// assert_eq!(RecordGenerator::record_number(&DecisionId::new("Team Offsite")), "team-offsite");
    /// ```
    pub fn record_number(id: &DecisionId) -> String {
        let raw = id.as_str();
        if is_timestamp_id(raw) {
            let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
            return format!("{:0>width$}", digits, width = RECORD_NUMBER_WIDTH);
        }
        let number: String = raw
            .chars()
            .map(|c| {
                let c = c.to_ascii_lowercase();
                if c.is_ascii_alphanumeric() || c == '-' { c } else { '-' }
            })
            .collect();
        if number.is_empty() {
            "0".repeat(RECORD_NUMBER_WIDTH)
        } else {
            number
        }
    }

    /// Render a finalized decision
    ///
    /// `voter_names` maps user IDs to display names; unknown users are
    /// shown by ID.
    pub fn render(
        decision: &Decision,
        counts: &VoteCounts,
        result: &DecisionResult,
        voter_names: &HashMap<UserId, String>,
    ) -> Result<DecisionRecord, RecordError> {
        let accepted = match decision.status() {
            DecisionStatus::Approved => true,
            DecisionStatus::Rejected => false,
            other @ (DecisionStatus::Active
            | DecisionStatus::Cancelled
            | DecisionStatus::Deleted) => return Err(RecordError::NotFinalized(other)),
        };

        let number = Self::record_number(&decision.id);
        let title = format!("ADR-{}: {}", number, decision.name);
        let name_of = |user: &UserId| {
            voter_names
                .get(user)
                .cloned()
                .unwrap_or_else(|| user.to_string())
        };

        let mut doc = String::new();
        let _ = writeln!(doc, "# {}\n", title);

        // Status
        let _ = writeln!(doc, "## Status\n");
        let _ = writeln!(doc, "{}\n", if accepted { "Accepted" } else { "Rejected" });

        // Context
        let _ = writeln!(doc, "## Context\n");
        let _ = writeln!(doc, "{}\n", decision.proposal);
        let _ = writeln!(doc, "**Decision parameters**\n");
        let _ = writeln!(
            doc,
            "- Success rule: {} ({})",
            decision.success_criteria.label(),
            decision.success_criteria.as_str()
        );
        if let Some(required) = result.required_voters_count {
            let _ = writeln!(doc, "- Required voters: {}", required);
        }
        if let Some(quorum) = result.quorum {
            let _ = writeln!(doc, "- Quorum: {}", quorum);
        }
        let _ = writeln!(doc, "- Deadline: {}", decision.deadline.format("%Y-%m-%d"));
        let _ = writeln!(
            doc,
            "- Created: {} by {}",
            decision.created_at.format("%Y-%m-%d"),
            name_of(&decision.creator_id)
        );
        let mut participants: Vec<String> = voter_names.values().cloned().collect();
        participants.sort();
        if !participants.is_empty() {
            let _ = writeln!(doc, "- Voters: {}", participants.join(", "));
        }
        doc.push('\n');

        // Decision
        let _ = writeln!(doc, "## Decision\n");
        let verdict = if accepted { "✅ **Approved**" } else { "❌ **Rejected**" };
        let _ = writeln!(doc, "{}: {}\n", verdict, result.reason);
        let _ = writeln!(doc, "**Vote breakdown**\n");
        let _ = writeln!(doc, "- Yes: {} ({})", counts.yes, share(counts.yes, counts.total));
        let _ = writeln!(doc, "- No: {} ({})", counts.no, share(counts.no, counts.total));
        let _ = writeln!(
            doc,
            "- Abstain: {} ({})",
            counts.abstain,
            share(counts.abstain, counts.total)
        );
        let _ = writeln!(doc, "- Total votes cast: {}\n", counts.total);

        // Consequences
        let _ = writeln!(doc, "## Consequences\n");
        for (heading, bullets) in consequences(accepted, &decision.name) {
            let _ = writeln!(doc, "### {}\n", heading);
            for bullet in bullets {
                let _ = writeln!(doc, "- {}", bullet);
            }
            doc.push('\n');
        }

        // Alternatives
        let _ = writeln!(doc, "## Alternatives Considered\n");
        if counts.no == 0 {
            let _ = writeln!(doc, "None considered.\n");
        } else {
            let _ = writeln!(
                doc,
                "{} voter(s) voted against this proposal, indicating that alternative approaches may merit discussion.\n",
                counts.no
            );
        }

        // References
        let _ = writeln!(doc, "## References\n");
        let _ = writeln!(doc, "- Decision ID: `{}`", decision.id);
        if let Some(origin) = &decision.origin {
            let _ = writeln!(doc, "- Channel: {}", origin.channel_id);
            if let Some(thread) = &origin.thread_ts {
                let _ = writeln!(doc, "- Thread: {}", thread);
            }
        }

        Ok(DecisionRecord {
            decision_id: decision.id.clone(),
            number,
            title,
            slug: slugify(&decision.name),
            content: doc,
        })
    }
}

/// `part / total` as a percentage with one decimal
fn share(part: usize, total: usize) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", part as f64 / total as f64 * 100.0)
}

/// Templated consequence bullets; depend only on pass/fail
fn consequences(accepted: bool, name: &str) -> [(&'static str, Vec<String>); 3] {
    if accepted {
        [
            (
                "Positive",
                vec![
                    format!("\"{}\" can proceed with the group's mandate.", name),
                    "The agreed direction is recorded and shared with everyone involved.".to_string(),
                ],
            ),
            (
                "Negative",
                vec![
                    "Concerns raised by dissenting voters should be tracked during implementation."
                        .to_string(),
                    "Time and resources must now be committed to the proposal.".to_string(),
                ],
            ),
            (
                "Neutral",
                vec!["Revisit this record if circumstances change materially.".to_string()],
            ),
        ]
    } else {
        [
            (
                "Positive",
                vec!["No resources are committed to a proposal without sufficient support.".to_string()],
            ),
            (
                "Negative",
                vec![format!(
                    "The problem \"{}\" set out to address remains open.",
                    name
                )],
            ),
            (
                "Neutral",
                vec!["The proposal may be revised and put to a new decision.".to_string()],
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::{MessageOrigin, SuccessCriteria};
    use crate::lifecycle::FinalizationStateMachine;
    use crate::quorum::OutcomeEvaluator;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn finalized(counts: &VoteCounts) -> (Decision, DecisionResult) {
        let created = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
        let mut decision = Decision::new(
            DecisionId::new("1718000000.000042"),
            "Adopt Rust",
            "Use Rust for the new ingestion service.",
            SuccessCriteria::SimpleMajority,
            NaiveDate::from_ymd_opt(2026, 10, 25).unwrap(),
            UserId::new("U1"),
            created,
        )
        .with_origin(MessageOrigin::new("C42").with_thread("1718000000.000042"));
        let result = OutcomeEvaluator::simple_majority(counts);
        FinalizationStateMachine::finalize(&mut decision, &result, created).unwrap();
        (decision, result)
    }

    fn names() -> HashMap<UserId, String> {
        HashMap::from([
            (UserId::new("U1"), "Alice".to_string()),
            (UserId::new("U2"), "Bob".to_string()),
            (UserId::new("U3"), "Carol".to_string()),
        ])
    }

    #[test]
    fn test_render_accepted_record() {
        let counts = VoteCounts::new(2, 1, 0);
        let (decision, result) = finalized(&counts);
        let record = RecordGenerator::render(&decision, &counts, &result, &names()).unwrap();

        assert_eq!(record.number, "1718000000000042");
        assert_eq!(record.title, "ADR-1718000000000042: Adopt Rust");
        assert_eq!(record.file_name(), "ADR-1718000000000042-adopt-rust.md");

        let doc = &record.content;
        for section in [
            "## Status",
            "## Context",
            "## Decision",
            "## Consequences",
            "## Alternatives Considered",
            "## References",
        ] {
            assert!(doc.contains(section), "missing {section}");
        }
        assert!(doc.contains("## Status\n\nAccepted"));
        assert!(doc.contains("Use Rust for the new ingestion service."));
        assert!(doc.contains("- Yes: 2 (66.7%)"));
        assert!(doc.contains("- No: 1 (33.3%)"));
        assert!(doc.contains("- Abstain: 0 (0.0%)"));
        assert!(doc.contains("Created: 2026-10-18 by Alice"));
        assert!(doc.contains("- Voters: Alice, Bob, Carol"));
        assert!(doc.contains("1 voter(s) voted against"));
        assert!(doc.contains("- Channel: C42"));
        assert!(doc.contains("`1718000000.000042`"));
    }

    #[test]
    fn test_render_rejected_without_dissent() {
        let counts = VoteCounts::new(0, 0, 2);
        let (decision, result) = finalized(&counts);
        let record = RecordGenerator::render(&decision, &counts, &result, &names()).unwrap();

        assert!(record.content.contains("## Status\n\nRejected"));
        assert!(record.content.contains("❌ **Rejected**"));
        assert!(record.content.contains("None considered."));
    }

    #[test]
    fn test_record_numbers_differ_across_decisions() {
        let ids = [
            "1718000000.000042",
            "1718000999.000042",
            "1718000000.000043",
            "offsite",
            "lunch",
            "d7",
            "42",
        ];
        let numbers: Vec<String> = ids
            .iter()
            .map(|id| RecordGenerator::record_number(&DecisionId::new(*id)))
            .collect();
        for (i, a) in numbers.iter().enumerate() {
            for b in &numbers[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(numbers[3], "offsite");
        assert_eq!(numbers[6], "000042");
    }

    #[test]
    fn test_record_number_is_file_name_safe() {
        let number = RecordGenerator::record_number(&DecisionId::new("../Q3 Plan"));
        assert_eq!(number, "---q3-plan");
        assert_eq!(
            RecordGenerator::record_number(&DecisionId::new("")),
            "000000"
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let counts = VoteCounts::new(2, 1, 0);
        let (decision, result) = finalized(&counts);
        let a = RecordGenerator::render(&decision, &counts, &result, &names()).unwrap();
        let b = RecordGenerator::render(&decision, &counts, &result, &names()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_render_active_decision_fails() {
        let decision = Decision::new(
            DecisionId::new("d1"),
            "Pending",
            "Still voting",
            SuccessCriteria::Unanimous,
            NaiveDate::from_ymd_opt(2026, 10, 25).unwrap(),
            UserId::new("U1"),
            Utc::now(),
        );
        let counts = VoteCounts::default();
        let result = OutcomeEvaluator::unanimity(&counts, 3, None);
        assert_eq!(
            RecordGenerator::render(&decision, &counts, &result, &HashMap::new()),
            Err(RecordError::NotFinalized(DecisionStatus::Active))
        );
    }

    #[test]
    fn test_unknown_voter_falls_back_to_id() {
        let counts = VoteCounts::new(1, 0, 0);
        let (decision, result) = finalized(&counts);
        let record = RecordGenerator::render(&decision, &counts, &result, &HashMap::new()).unwrap();
        assert!(record.content.contains("Created: 2026-10-18 by U1"));
    }
}
