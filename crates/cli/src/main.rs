//! iPMS CLI - validate and describe project progress updates.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use ipms_core::{
    CombinedProgressUpdateRequest, FileRef, FinancialProgressUpdateRequest, ProgressChange,
    ProgressUpdateRequest, ProjectKind, ValidationResult,
};
use ipms_progress::{
    describe_progress_change, CurrencyLocale, ProgressValidator, UpdateRejected, ValidationPolicy,
};

#[derive(Parser)]
#[command(name = "ipms")]
#[command(about = "Progress update validation for iPMS projects", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file overriding the default validation limits
    #[arg(long, global = true, env = "IPMS_POLICY")]
    policy: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a physical progress update
    Physical {
        /// Current percentage
        #[arg(long, allow_negative_numbers = true)]
        current: f64,
        /// Proposed percentage
        #[arg(long, allow_negative_numbers = true)]
        proposed: f64,
        #[command(flatten)]
        target: Target,
    },
    /// Validate a financial progress update
    Financial {
        /// Amount billed so far
        #[arg(long, allow_negative_numbers = true)]
        current: f64,
        /// Proposed cumulative bill amount
        #[arg(long, allow_negative_numbers = true)]
        proposed: f64,
        /// Total work value
        #[arg(long, allow_negative_numbers = true)]
        work_value: f64,
        #[command(flatten)]
        target: Target,
        #[command(flatten)]
        currency: Currency,
    },
    /// Validate a physical and/or financial update
    Combined {
        /// Current percentage
        #[arg(long, allow_negative_numbers = true)]
        current_physical: f64,
        /// Proposed percentage
        #[arg(long, allow_negative_numbers = true)]
        proposed_physical: Option<f64>,
        /// Amount billed so far
        #[arg(long, allow_negative_numbers = true)]
        current_amount: f64,
        /// Proposed cumulative bill amount
        #[arg(long, allow_negative_numbers = true)]
        proposed_amount: Option<f64>,
        /// Total work value
        #[arg(long, allow_negative_numbers = true)]
        work_value: f64,
        #[command(flatten)]
        target: Target,
        #[command(flatten)]
        currency: Currency,
    },
    /// Describe a physical progress change
    Describe {
        /// Percentage before
        #[arg(long, allow_negative_numbers = true)]
        from: f64,
        /// Percentage after
        #[arg(long, allow_negative_numbers = true)]
        to: f64,
    },
    /// Describe a billed-amount change
    DescribeFinancial {
        /// Amount before
        #[arg(long, allow_negative_numbers = true)]
        from: f64,
        /// Amount after
        #[arg(long, allow_negative_numbers = true)]
        to: f64,
        /// Total work value
        #[arg(long, allow_negative_numbers = true)]
        work_value: f64,
        #[command(flatten)]
        currency: Currency,
    },
}

/// What the update applies to and its evidence.
#[derive(Args)]
struct Target {
    /// Supporting document as <name>:<bytes> (repeatable)
    #[arg(long = "file")]
    files: Vec<FileRef>,

    /// Record type being updated
    #[arg(long, value_enum, default_value_t = ProjectArg::Project)]
    project: ProjectArg,
}

#[derive(Args)]
struct Currency {
    /// Numbering convention for amounts
    #[arg(long, value_enum, default_value_t = LocaleArg::Indian)]
    locale: LocaleArg,

    /// Currency symbol (defaults to the locale's)
    #[arg(long)]
    symbol: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProjectArg {
    Project,
    Archive,
}

impl From<ProjectArg> for ProjectKind {
    fn from(arg: ProjectArg) -> Self {
        match arg {
            ProjectArg::Project => ProjectKind::Project,
            ProjectArg::Archive => ProjectKind::ArchiveProject,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LocaleArg {
    Indian,
    International,
}

impl From<LocaleArg> for CurrencyLocale {
    fn from(arg: LocaleArg) -> Self {
        match arg {
            LocaleArg::Indian => CurrencyLocale::Indian,
            LocaleArg::International => CurrencyLocale::International,
        }
    }
}

impl Currency {
    fn apply(&self, validator: ProgressValidator) -> ProgressValidator {
        let locale = CurrencyLocale::from(self.locale);
        validator.with_formatter(locale.formatter(self.symbol.as_deref()))
    }
}

/// What a command prints and whether the update was accepted.
struct Report {
    output: String,
    accepted: bool,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout carries results; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let policy = match &cli.policy {
        Some(path) => ValidationPolicy::load(path)
            .with_context(|| format!("Failed to load policy from {}", path.display()))?,
        None => ValidationPolicy::default(),
    };

    let validator = ProgressValidator::new(policy);
    debug!(policy = ?validator.policy(), "Using validation policy");

    let report = run(&cli.command, validator, cli.json)?;
    println!("{}", report.output);

    Ok(if report.accepted {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run(command: &Commands, validator: ProgressValidator, json: bool) -> Result<Report> {
    match command {
        Commands::Physical { current, proposed, target } => {
            info!(current, proposed, files = target.files.len(), "Validating physical progress");
            let request =
                ProgressUpdateRequest::new(*current, *proposed).with_files(target.files.clone());
            let outcome = validator
                .accept_physical(target.project.into(), &request)
                .map(|change| vec![change]);
            render_outcome(outcome, json)
        }
        Commands::Financial { current, proposed, work_value, target, currency } => {
            info!(
                current,
                proposed,
                work_value,
                files = target.files.len(),
                "Validating financial progress"
            );
            let validator = currency.apply(validator);
            let request = FinancialProgressUpdateRequest::new(*current, *proposed, *work_value)
                .with_files(target.files.clone());
            let outcome = validator
                .accept_financial(target.project.into(), &request)
                .map(|change| vec![change]);
            render_outcome(outcome, json)
        }
        Commands::Combined {
            current_physical,
            proposed_physical,
            current_amount,
            proposed_amount,
            work_value,
            target,
            currency,
        } => {
            info!(
                ?proposed_physical,
                ?proposed_amount,
                files = target.files.len(),
                "Validating combined progress"
            );
            let validator = currency.apply(validator);
            let request = CombinedProgressUpdateRequest {
                current_physical: *current_physical,
                proposed_physical: *proposed_physical,
                current_amount: *current_amount,
                proposed_amount: *proposed_amount,
                reference_amount: *work_value,
                attached_files: target.files.clone(),
            };
            render_outcome(validator.accept_combined(target.project.into(), &request), json)
        }
        Commands::Describe { from, to } => {
            render_description(describe_progress_change(*from, *to), json)
        }
        Commands::DescribeFinancial { from, to, work_value, currency } => {
            let validator = currency.apply(validator);
            render_description(validator.describe_financial(*from, *to, *work_value), json)
        }
    }
}

fn render_outcome(
    outcome: std::result::Result<Vec<ProgressChange>, UpdateRejected>,
    json: bool,
) -> Result<Report> {
    match outcome {
        Ok(changes) => {
            debug!(count = changes.len(), "Update accepted");
            let output = if json {
                serde_json::to_string_pretty(&serde_json::json!({
                    "valid": true,
                    "changes": changes,
                }))?
            } else {
                changes
                    .iter()
                    .map(|change| format!("OK [{}] {}", change.kind.as_str(), change.description))
                    .collect::<Vec<_>>()
                    .join("\n")
            };
            Ok(Report { output, accepted: true })
        }
        Err(rejected) => {
            debug!(%rejected, "Update rejected");
            let output = if json {
                serde_json::to_string_pretty(rejected.result())?
            } else {
                render_errors(rejected.result())
            };
            Ok(Report { output, accepted: false })
        }
    }
}

fn render_errors(result: &ValidationResult) -> String {
    let mut lines = vec!["REJECTED".to_string()];
    for (field, message) in result.messages() {
        lines.push(format!("  {field}: {message}"));
    }
    lines.join("\n")
}

fn render_description(description: String, json: bool) -> Result<Report> {
    let output = if json {
        serde_json::to_string(&serde_json::json!({ "description": description }))?
    } else {
        description
    };
    Ok(Report { output, accepted: true })
}
