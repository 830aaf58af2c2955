//! CLI entrypoint for decide
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod logging;

use anyhow::{Context, Result, anyhow};
use chrono::{Days, Utc};
use clap::Parser;
use decision_application::{
    CastVoteInput, CastVoteOutcome, CastVoteUseCase, CheckDeadlinesUseCase, CreateDecisionOutcome,
    CreateDecisionUseCase, DecisionEventLogger, DecisionServices, DecisionStatusUseCase,
    FinalizeDecisionUseCase, FinalizeOutcome, NoDecisionLogger, WithdrawDecisionUseCase,
    WithdrawOutcome,
};
use decision_domain::{
    DecisionDraft, DecisionId, MessageOrigin, OutcomeEvaluator, UserId, VoteCounts,
};
use decision_infrastructure::{
    ConfigLoader, FileConfig, FileRecordPublisher, JsonFileStore, JsonlDecisionLogger,
    StaticUserDirectory, SystemClock,
};
use decision_presentation::{
    Cli, Command, CreateArgs, EvaluateArgs, OutputFormat, OutputFormatter, formatter_for,
    set_color,
};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let _log_guard = logging::init(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(ExitCode::SUCCESS);
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    for issue in config.validate() {
        warn!("{}", issue.message);
    }

    set_color(!cli.no_color && config.output.color);
    let format = cli
        .output
        .or_else(|| config.output.format.map(OutputFormat::from))
        .unwrap_or(OutputFormat::Text);
    let formatter = formatter_for(format);

    let Some(command) = cli.command else {
        return Err(anyhow!("No command given. Run `decide --help` for usage."));
    };

    // === Dependency Injection ===
    // The store is opened per command; `evaluate` works without one.
    let data_dir = cli.data_dir.as_deref();
    info!("Starting decide");

    let succeeded = match command {
        Command::Evaluate(args) => {
            println!("{}", evaluate(&args, formatter.as_ref()));
            true
        }
        command => {
            let services = build_services(data_dir, &config).await?;
            run(command, services, formatter.as_ref()).await?
        }
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Run a command against the store; returns whether it succeeded
async fn run(
    command: Command,
    services: DecisionServices,
    formatter: &dyn OutputFormatter,
) -> Result<bool> {
    let succeeded = match command {
        Command::Create(args) => create(args, services, formatter).await?,
        Command::Vote {
            decision_id,
            user,
            vote,
        } => {
            let input = CastVoteInput::new(DecisionId::new(decision_id), UserId::new(user), vote);
            let outcome = CastVoteUseCase::new(services).execute(input).await?;
            println!("{}", formatter.vote(&outcome));
            matches!(outcome, CastVoteOutcome::Recorded(_))
        }
        Command::Status { decision_id } => {
            let view = DecisionStatusUseCase::new(services)
                .execute(&DecisionId::new(decision_id.as_str()))
                .await?;
            match view {
                Some(view) => {
                    println!("{}", formatter.status(&view));
                    true
                }
                None => {
                    println!("{}", formatter.not_found(&decision_id));
                    false
                }
            }
        }
        Command::Finalize { decision_id } => {
            let outcome = FinalizeDecisionUseCase::new(services)
                .execute(&DecisionId::new(decision_id), None)
                .await?;
            println!("{}", formatter.finalize(&outcome));
            !matches!(outcome, FinalizeOutcome::NotFound(_))
        }
        Command::Cancel { decision_id, actor } => {
            let outcome = WithdrawDecisionUseCase::new(services)
                .cancel(&DecisionId::new(decision_id), &UserId::new(actor))
                .await?;
            println!("{}", formatter.withdraw(&outcome));
            matches!(outcome, WithdrawOutcome::Cancelled(_))
        }
        Command::Delete {
            decision_id,
            requester,
        } => {
            let outcome = WithdrawDecisionUseCase::new(services)
                .delete(&DecisionId::new(decision_id), &UserId::new(requester))
                .await?;
            println!("{}", formatter.withdraw(&outcome));
            matches!(outcome, WithdrawOutcome::Deleted(_))
        }
        Command::Sweep => {
            let report = CheckDeadlinesUseCase::new(services).execute().await?;
            println!("{}", formatter.sweep(&report));
            report.failures.is_empty()
        }
        Command::Evaluate(args) => {
            println!("{}", evaluate(&args, formatter));
            true
        }
    };
    Ok(succeeded)
}

async fn build_services(data_dir: Option<&Path>, config: &FileConfig) -> Result<DecisionServices> {
    let data_dir = data_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.storage.resolve_data_dir());
    let store = JsonFileStore::open(&data_dir)
        .await
        .with_context(|| format!("opening decision store at {}", data_dir.display()))?;
    debug!("Using decision store at {}", data_dir.display());

    let logger: Arc<dyn DecisionEventLogger> = match config
        .logging
        .event_log
        .as_ref()
        .and_then(JsonlDecisionLogger::open)
    {
        Some(logger) => Arc::new(logger),
        None => Arc::new(NoDecisionLogger),
    };

    Ok(
        DecisionServices::from_store(Arc::new(store), Arc::new(SystemClock))
            .with_directory(Arc::new(StaticUserDirectory::from_config(&config.users)))
            .with_publisher(Arc::new(FileRecordPublisher::new(
                config.records.output_dir.clone(),
            )))
            .with_logger(logger)
            .with_config(config.engine.to_engine_config()),
    )
}

async fn create(
    args: CreateArgs,
    services: DecisionServices,
    formatter: &dyn OutputFormatter,
) -> Result<bool> {
    let engine = services.config.clone();
    let deadline = match args.deadline {
        Some(deadline) => deadline,
        None => Utc::now()
            .date_naive()
            .checked_add_days(Days::new(u64::from(engine.default_deadline_days)))
            .context("default deadline is out of range")?,
    };
    let origin = args.channel.map(|channel| {
        let origin = MessageOrigin::new(channel);
        match args.thread {
            Some(thread) => origin.with_thread(thread),
            None => origin,
        }
    });

    let draft = DecisionDraft {
        name: args.name,
        proposal: args.proposal,
        success_criteria: args.criteria.unwrap_or(engine.default_criteria),
        deadline,
        creator_id: UserId::new(args.creator),
        voters: args.voters.into_iter().map(UserId::new).collect(),
        quorum: args.quorum,
        origin,
    };

    let outcome = CreateDecisionUseCase::new(services)
        .execute(draft, args.id.map(DecisionId::new))
        .await?;
    println!("{}", formatter.created(&outcome));
    Ok(matches!(outcome, CreateDecisionOutcome::Created { .. }))
}

fn evaluate(args: &EvaluateArgs, formatter: &dyn OutputFormatter) -> String {
    let counts = VoteCounts::new(args.yes, args.no, args.abstain);
    let result = OutcomeEvaluator::evaluate(&args.criteria, &counts, args.required, args.quorum);
    formatter.evaluation(&result)
}
