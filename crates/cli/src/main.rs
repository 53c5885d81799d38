// jdhub CLI - bulk user import review and commit

mod exit_codes;
mod import;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};

pub const REFERENCE_ENV: &str = "JDHUB_REFERENCE";
pub const LOG_ENV: &str = "JDHUB_LOG";

#[derive(Parser)]
#[command(name = "jdhub")]
#[command(about = "Validate and import users in bulk from a spreadsheet")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the import template workbook
    #[command(after_help = "\
Examples:
  jdhub template --reference reference.json
  jdhub template -o new_hires.xlsx")]
    Template {
        /// Reference snapshot (JSON) used for sample rows and valid values
        #[arg(long, env = REFERENCE_ENV)]
        reference: Option<PathBuf>,

        /// Output workbook (default from settings: user_import_template.xlsx)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Validate an import sheet and print the per-row review
    #[command(after_help = "\
Examples:
  jdhub review users.xlsx --reference reference.json
  jdhub review users.csv --json
  jdhub review users.xlsx --csv review.csv

Exit codes:
  0  every row is valid
  3  at least one row is invalid")]
    Review {
        /// Import sheet (.xlsx, .xls, .xlsb, .ods, .csv, .tsv)
        file: PathBuf,

        #[arg(long, env = REFERENCE_ENV)]
        reference: Option<PathBuf>,

        /// Output the full report as JSON to stdout instead of the table
        #[arg(long)]
        json: bool,

        /// Also write the review as CSV
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,
    },

    /// Validate an import sheet and write the valid rows as a JSON payload
    #[command(after_help = "\
Examples:
  jdhub commit users.xlsx --reference reference.json --payload users.json

Invalid rows are skipped and counted; exit 6 when no row is valid.")]
    Commit {
        file: PathBuf,

        #[arg(long, env = REFERENCE_ENV)]
        reference: Option<PathBuf>,

        /// Destination for the resolved users
        #[arg(long, value_name = "FILE")]
        payload: PathBuf,
    },

    /// Reference snapshot utilities
    #[command(subcommand)]
    Reference(ReferenceCommands),
}

#[derive(Subcommand)]
enum ReferenceCommands {
    /// Load and index a snapshot, then print entry counts
    #[command(after_help = "\
Examples:
  jdhub reference check reference.json
  JDHUB_REFERENCE=reference.json jdhub reference check")]
    Check {
        #[arg(env = REFERENCE_ENV)]
        file: Option<PathBuf>,
    },
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nimport:  jdhub-import ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("TARGET"),
    )
}

/// Logs go to stderr so `--json` stdout stays a single value.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let settings = jdhub_config::Settings::load();

    let result = match cli.command {
        Commands::Template { reference, output } => import::cmd_template(&settings, reference, output),
        Commands::Review { file, reference, json, csv } => {
            import::cmd_review(&settings, file, reference, json, csv)
        }
        Commands::Commit { file, reference, payload } => {
            import::cmd_commit(&settings, file, reference, payload)
        }
        Commands::Reference(ReferenceCommands::Check { file }) => {
            import::cmd_reference_check(&settings, file)
        }
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn usage(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    pub fn general(msg: impl Into<String>) -> Self {
        Self::new(EXIT_ERROR, msg)
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
