// crossdoc CLI - headless document reconciliation

mod exit_codes;
mod reconcile;
mod sweep;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::{EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "xdoc")]
#[command(about = "Reconcile invoices against orders and synthesize shipment calendars")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile two product files by composite key (exit 0 = full match, exit 3 = mismatches)
    #[command(after_help = "\
Exit code 3 indicates differences: missing items or field-level mismatches.
Input format is inferred from the file extension (.csv or .json).

Examples:
  xdoc reconcile invoice.json order.json
  xdoc reconcile invoice.csv order.csv --labels invoice,order
  xdoc reconcile invoice.json order.json --strict --output result.json
  xdoc reconcile invoice.csv order.json --json | jq .summary")]
    Reconcile {
        /// Left product file (.csv or .json array of objects)
        left: std::path::PathBuf,

        /// Right product file (.csv or .json array of objects)
        right: std::path::PathBuf,

        /// Labels for the two sides, comma-separated
        #[arg(long, default_value = "doc1,doc2")]
        labels: String,

        /// Include key-collision reports in the result
        #[arg(long)]
        strict: bool,

        /// Output JSON to stdout instead of human summary
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<std::path::PathBuf>,
    },

    /// Sweep a document collection: pair invoices with orders, emit calendar events
    #[command(after_help = "\
The documents file is a JSON array of documents with id, kind, brand, season
and products. Pairs at or above the confirmation threshold produce shipment
calendar events.

Examples:
  xdoc sweep documents.json
  xdoc sweep documents.json --config sweep.toml
  xdoc sweep documents.json --threshold 90 --json
  xdoc sweep documents.json --output outcome.json")]
    Sweep {
        /// Document collection file (JSON array)
        documents: std::path::PathBuf,

        /// Path to a sweep TOML config file
        #[arg(long)]
        config: Option<std::path::PathBuf>,

        /// Confirmation threshold override (0-100)
        #[arg(long)]
        threshold: Option<u8>,

        /// Output JSON to stdout instead of human summary
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<std::path::PathBuf>,
    },

    /// Validate a sweep config without running
    #[command(after_help = "\
Examples:
  xdoc validate sweep.toml")]
    Validate {
        /// Path to the sweep TOML config file
        config: std::path::PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Reconcile { left, right, labels, strict, json, output } => {
            reconcile::cmd_reconcile(left, right, labels, strict, json, output)
        }
        Commands::Sweep { documents, config, threshold, json, output } => {
            sweep::cmd_sweep(documents, config, threshold, json, output)
        }
        Commands::Validate { config } => sweep::cmd_validate(config),
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
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
