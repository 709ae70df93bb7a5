use crate::commands::{run_batch, run_evaluate, run_presets, run_rules};
use crate::infra;
use clap::{ArgGroup, Args, Parser, Subcommand};
use credit_sim::config::AppConfig;
use credit_sim::error::AppError;
use credit_sim::telemetry;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "credit-sim",
    about = "Evaluate loan applicants against operator-tunable business rules",
    version
)]
struct Cli {
    /// Business rules file (overrides CREDIT_RULES_PATH)
    #[arg(long, global = true)]
    rules_file: Option<PathBuf>,
    /// Keep rule changes in memory for this run only
    #[arg(long, global = true)]
    no_persist: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate one applicant from a JSON file or a named preset
    Evaluate(EvaluateArgs),
    /// Evaluate every row of an applicant CSV
    Batch(BatchArgs),
    /// Inspect or change the business rules
    Rules {
        #[command(subcommand)]
        command: RulesCommand,
    },
    /// Evaluate the built-in preset applicants (default command)
    Presets(PresetsArgs),
}

#[derive(Subcommand, Debug)]
pub(crate) enum RulesCommand {
    /// Print the current rules document
    Show,
    /// Run the consistency checks
    Validate,
    /// Merge a partial rules document onto the current rules
    Apply(ApplyArgs),
    /// Restore the default rules
    Reset,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["input", "preset"])))]
pub(crate) struct EvaluateArgs {
    /// JSON file holding a single applicant record
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
    /// Preset applicant name (AAA, AA, A, REJECT)
    #[arg(long)]
    pub(crate) preset: Option<String>,
    /// Include the month-by-month amortization schedule
    #[arg(long)]
    pub(crate) schedule: bool,
    /// Emit JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV file with a header row
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Emit JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ApplyArgs {
    /// JSON document with the rule fields to change
    #[arg(long)]
    pub(crate) file: PathBuf,
}

#[derive(Args, Debug, Default)]
pub(crate) struct PresetsArgs {
    /// Emit JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    if let Some(path) = cli.rules_file {
        config.rules.path = path;
    }
    if cli.no_persist {
        config.rules.persist = false;
    }

    telemetry::init(&config.telemetry)?;
    debug!(environment = ?config.environment, rules = %config.rules.path.display(), "starting");

    let store = infra::open_store(&config.rules);
    let command = cli
        .command
        .unwrap_or_else(|| Command::Presets(PresetsArgs::default()));

    match command {
        Command::Evaluate(args) => run_evaluate(&store, args),
        Command::Batch(args) => run_batch(&store, args),
        Command::Rules { command } => run_rules(&store, &config.rules, command),
        Command::Presets(args) => run_presets(&store, args),
    }
}
