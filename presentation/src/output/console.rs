//! Console output formatter

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use decision_application::{
    CastVoteOutcome, CreateDecisionOutcome, DecisionStatusView, FinalizeOutcome, RecordStatus,
    SweepReport, WithdrawOutcome,
};
use decision_domain::{DeadlockResult, DecisionResult, DecisionStatus, VoteCounts, VoteType};

/// Formats outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn label(name: &str) -> String {
        format!("{:<12}", format!("{}:", name)).cyan().bold().to_string()
    }

    fn status_badge(status: DecisionStatus) -> String {
        match status {
            DecisionStatus::Active => status.as_str().yellow().bold().to_string(),
            DecisionStatus::Approved => status.as_str().green().bold().to_string(),
            DecisionStatus::Rejected => status.as_str().red().bold().to_string(),
            DecisionStatus::Cancelled | DecisionStatus::Deleted => {
                status.as_str().dimmed().to_string()
            }
        }
    }

    fn counts_line(counts: &VoteCounts, required_voters: usize) -> String {
        format!(
            "{} yes, {} no, {} abstain ({} of {} cast)",
            counts.yes.to_string().green(),
            counts.no.to_string().red(),
            counts.abstain,
            counts.total,
            required_voters
        )
    }

    fn verdict(result: &DecisionResult) -> String {
        if result.error {
            format!("{} {}", "invalid".red().bold(), result.reason)
        } else if result.passed {
            format!("{} {}", "passes".green().bold(), result.reason)
        } else {
            format!("{} {}", "fails".red().bold(), result.reason)
        }
    }

    fn deadlock_note(deadlock: &DeadlockResult) -> Option<String> {
        deadlock
            .deadlocked
            .then(|| format!("{} {}", "Deadlocked:".yellow().bold(), deadlock.reason))
    }

    fn record_line(record: &RecordStatus) -> String {
        match record {
            RecordStatus::Published { number, location } => {
                format!("Record ADR-{} written to {}", number, location)
            }
            RecordStatus::Failed { message } => {
                format!("{} {}", "Record not written:".yellow().bold(), message)
            }
            RecordStatus::Disabled => "Records are disabled".dimmed().to_string(),
        }
    }

    fn vote_mark(vote_type: VoteType) -> String {
        match vote_type {
            VoteType::Yes => "yes".green().to_string(),
            VoteType::No => "no".red().to_string(),
            VoteType::Abstain => "abstain".to_string(),
            VoteType::Unrecognized => "?".dimmed().to_string(),
        }
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn created(&self, outcome: &CreateDecisionOutcome) -> String {
        match outcome {
            CreateDecisionOutcome::Created { decision, .. } => format!(
                "{}\n{} {}",
                outcome.message().green(),
                Self::label("ID"),
                decision.id
            ),
            _ => outcome.message().red().to_string(),
        }
    }

    fn vote(&self, outcome: &CastVoteOutcome) -> String {
        let CastVoteOutcome::Recorded(receipt) = outcome else {
            return outcome.message().red().to_string();
        };

        let mut output = outcome.message();
        if let Some(note) = Self::deadlock_note(&receipt.deadlock) {
            output.push_str(&format!("\n{}", note));
        }
        if let Some(finalization) = &receipt.finalization {
            output.push('\n');
            output.push_str(&self.finalize(finalization));
        }
        output
    }

    fn status(&self, view: &DecisionStatusView) -> String {
        let decision = &view.decision;
        let mut output = Self::header(&decision.name);
        output.push('\n');

        output.push_str(&format!("{} {}\n", Self::label("ID"), decision.id));
        output.push_str(&format!(
            "{} {}\n",
            Self::label("Status"),
            Self::status_badge(decision.status())
        ));
        output.push_str(&format!(
            "{} {}\n",
            Self::label("Rule"),
            decision.success_criteria.label()
        ));
        output.push_str(&format!("{} {}\n", Self::label("Deadline"), decision.deadline));
        if let Some(quorum) = decision.quorum {
            output.push_str(&format!("{} {}\n", Self::label("Quorum"), quorum));
        }
        output.push_str(&format!("\n{}\n", Self::indent(&decision.proposal, "  ")));

        output.push_str(&Self::section_header("Votes"));
        for vote in &view.votes {
            output.push_str(&format!(
                "  {:<16} {}\n",
                vote.user_id.as_str(),
                Self::vote_mark(vote.vote_type)
            ));
        }
        for user in &view.missing_voters {
            output.push_str(&format!("  {:<16} {}\n", user.as_str(), "-".dimmed()));
        }
        output.push_str(&format!(
            "\n{}\n",
            Self::counts_line(&view.counts, view.required_voters)
        ));

        if decision.is_active() {
            output.push_str(&Self::section_header("If finalized now"));
            output.push_str(&Self::verdict(&view.provisional));
            output.push('\n');
            if let Some(note) = Self::deadlock_note(&view.deadlock) {
                output.push_str(&note);
                output.push('\n');
            }
        }

        output
    }

    fn finalize(&self, outcome: &FinalizeOutcome) -> String {
        let FinalizeOutcome::Finalized(report) = outcome else {
            return outcome.message().yellow().to_string();
        };
        format!(
            "{} {}\n{}\n{}",
            Self::label("Outcome"),
            Self::status_badge(report.status()),
            Self::verdict(&report.result),
            Self::record_line(&report.record)
        )
    }

    fn withdraw(&self, outcome: &WithdrawOutcome) -> String {
        match outcome {
            WithdrawOutcome::Cancelled(_) | WithdrawOutcome::Deleted(_) => outcome.message(),
            _ => outcome.message().red().to_string(),
        }
    }

    fn sweep(&self, report: &SweepReport) -> String {
        if report.is_empty() {
            return "No active decisions".dimmed().to_string();
        }

        let mut output = String::new();
        if !report.finalized.is_empty() {
            output.push_str(&Self::section_header("Finalized"));
            for outcome in &report.finalized {
                output.push_str(&format!("  {}\n", outcome.message()));
            }
        }
        if !report.reminders.is_empty() {
            output.push_str(&Self::section_header("Waiting on voters"));
            for reminder in &report.reminders {
                let missing: Vec<&str> =
                    reminder.missing_voters.iter().map(|u| u.as_str()).collect();
                output.push_str(&format!(
                    "  {} ({}, due {}): {}{}\n",
                    reminder.name.bold(),
                    reminder.decision_id,
                    reminder.deadline,
                    missing.join(", "),
                    if reminder.deadlocked {
                        " [deadlocked]".yellow().to_string()
                    } else {
                        String::new()
                    }
                ));
            }
        }
        if !report.failures.is_empty() {
            output.push_str(&Self::section_header("Failed"));
            for failure in &report.failures {
                output.push_str(&format!(
                    "  {}: {}\n",
                    failure.decision_id,
                    failure.message.red()
                ));
            }
        }
        output
    }

    fn evaluation(&self, result: &DecisionResult) -> String {
        let mut output = Self::verdict(result);
        output.push_str(&format!(
            "\n{} {:.2}%",
            Self::label("Yes share"),
            result.percentage
        ));
        if let Some(missing) = result.missing_votes {
            output.push_str(&format!("\n{} {}", Self::label("Missing"), missing));
        }
        if let Some(met) = result.quorum_met {
            output.push_str(&format!(
                "\n{} {}",
                Self::label("Quorum met"),
                if met { "yes" } else { "no" }
            ));
        }
        output
    }

    fn not_found(&self, decision_id: &str) -> String {
        format!("Decision {} not found", decision_id).red().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decision_domain::OutcomeEvaluator;

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "  "), "  a\n  b");
    }

    #[test]
    fn test_evaluation_mentions_reason() {
        colored::control::set_override(false);
        let result = OutcomeEvaluator::unanimity(&VoteCounts::new(2, 1, 0), 3, None);
        let text = ConsoleFormatter.evaluation(&result);
        assert!(text.starts_with("fails"));
        assert!(text.contains("Unanimity not achieved"));
        assert!(text.contains("Quorum met"));
    }

    #[test]
    fn test_invalid_rule_is_flagged() {
        colored::control::set_override(false);
        let result = OutcomeEvaluator::evaluate("plurality", &VoteCounts::new(1, 0, 0), 1, None);
        assert!(ConsoleFormatter.evaluation(&result).starts_with("invalid"));
    }
}
