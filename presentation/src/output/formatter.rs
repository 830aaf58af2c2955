//! Output formatter trait

use crate::cli::commands::OutputFormat;
use crate::output::console::ConsoleFormatter;
use crate::output::json::JsonFormatter;
use decision_application::{
    CastVoteOutcome, CreateDecisionOutcome, DecisionStatusView, FinalizeOutcome, SweepReport,
    WithdrawOutcome,
};
use decision_domain::DecisionResult;

/// Renders use case outcomes for the terminal
pub trait OutputFormatter {
    fn created(&self, outcome: &CreateDecisionOutcome) -> String;

    fn vote(&self, outcome: &CastVoteOutcome) -> String;

    fn status(&self, view: &DecisionStatusView) -> String;

    fn finalize(&self, outcome: &FinalizeOutcome) -> String;

    fn withdraw(&self, outcome: &WithdrawOutcome) -> String;

    fn sweep(&self, report: &SweepReport) -> String;

    /// Result of a standalone evaluation
    fn evaluation(&self, result: &DecisionResult) -> String;

    /// A decision ID that matched nothing
    fn not_found(&self, decision_id: &str) -> String;
}

/// Pick the formatter for an output format
pub fn formatter_for(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(ConsoleFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
