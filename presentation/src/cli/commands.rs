//! CLI command definitions

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use decision_domain::{SuccessCriteria, VoteType};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON output
    Json,
}

impl From<decision_domain::OutputFormat> for OutputFormat {
    fn from(format: decision_domain::OutputFormat) -> Self {
        match format {
            decision_domain::OutputFormat::Text => OutputFormat::Text,
            decision_domain::OutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for decide
#[derive(Parser, Debug)]
#[command(name = "decide")]
#[command(author, version, about = "Team decisions by vote, with decision records")]
#[command(long_about = r#"
decide runs team decisions: a proposal, a roster of voters, a success rule
and a deadline. A decision is finalized once every voter has voted or the
deadline has passed, and an architecture decision record is written.

Success rules:
  simple_majority   more than half of the votes cast are yes
  super_majority    at least 66% of the roster voted yes
  unanimous         everyone (or the quorum) voted, nobody voted no

Configuration files are loaded from (in priority order):
1. DECIDE_* environment variables
2. --config <path>     Explicit config file
3. ./decide.toml       Project-level config
4. ~/.config/decision-quorum/config.toml   Global config

Example:
  decide create "Adopt Rust" --proposal "Use Rust for the new ingest service" \
      --by U1 --voter U1,U2,U3 --criteria super_majority --deadline 2026-11-01
  decide vote 1792314000.000000 --by U2 yes
  decide status 1792314000.000000
  decide evaluate --criteria unanimous --yes 3 --required 3
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (defaults to the configured format, then text)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Also write diagnostic logs to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Override the storage directory
    #[arg(long, value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open a new decision
    Create(CreateArgs),

    /// Cast or change a vote
    Vote {
        /// Decision ID
        decision_id: String,
        /// Voter user ID
        #[arg(long = "by", value_name = "USER")]
        user: String,
        /// yes, no or abstain
        vote: VoteType,
    },

    /// Show votes, provisional outcome and missing voters
    Status {
        /// Decision ID
        decision_id: String,
    },

    /// Finalize a decision if it is due
    Finalize {
        /// Decision ID
        decision_id: String,
    },

    /// Cancel an active decision (creator or voter)
    Cancel {
        /// Decision ID
        decision_id: String,
        /// Acting user ID
        #[arg(long = "by", value_name = "USER")]
        actor: String,
    },

    /// Delete an active decision (creator only)
    Delete {
        /// Decision ID
        decision_id: String,
        /// Acting user ID
        #[arg(long = "by", value_name = "USER")]
        requester: String,
    },

    /// Finalize overdue decisions and list reminders for the rest
    Sweep,

    /// Evaluate vote counts against a success rule without storing anything
    Evaluate(EvaluateArgs),
}

/// Arguments for `create`
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Short decision name
    pub name: String,

    /// What is being proposed
    #[arg(short, long)]
    pub proposal: String,

    /// Creator user ID
    #[arg(long = "by", value_name = "USER")]
    pub creator: String,

    /// Required voters (repeat or separate with commas)
    #[arg(long = "voter", value_name = "USER", value_delimiter = ',', required = true)]
    pub voters: Vec<String>,

    /// Success rule (defaults to the configured rule)
    #[arg(long, value_name = "RULE")]
    pub criteria: Option<SuccessCriteria>,

    /// Last voting day, YYYY-MM-DD (defaults to the configured offset)
    #[arg(long, value_name = "DATE")]
    pub deadline: Option<NaiveDate>,

    /// Minimum number of votes for a unanimous decision
    #[arg(long)]
    pub quorum: Option<usize>,

    /// Channel the decision was started in
    #[arg(long)]
    pub channel: Option<String>,

    /// Thread timestamp of the originating message (becomes the ID)
    #[arg(long, requires = "channel")]
    pub thread: Option<String>,

    /// Explicit decision ID
    #[arg(long)]
    pub id: Option<String>,
}

/// Arguments for `evaluate`
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Success rule; unknown values are reported as an invalid-rule result
    #[arg(long, default_value = "simple_majority")]
    pub criteria: String,

    #[arg(long, default_value_t = 0)]
    pub yes: usize,

    #[arg(long, default_value_t = 0)]
    pub no: usize,

    #[arg(long, default_value_t = 0)]
    pub abstain: usize,

    /// Roster size
    #[arg(long, default_value_t = 0)]
    pub required: usize,

    /// Quorum for unanimous decisions
    #[arg(long)]
    pub quorum: Option<usize>,
}
