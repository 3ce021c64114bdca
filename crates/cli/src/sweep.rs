//! `xdoc sweep` — pair invoices with orders across a document collection.

use std::path::PathBuf;

use crossdoc_recon::model::Document;
use crossdoc_recon::sweep::{partition_by_kind, sweep};
use crossdoc_recon::SweepConfig;

use crate::exit_codes::{EXIT_RECON_INVALID_CONFIG, EXIT_RECON_RUNTIME};
use crate::CliError;

fn runtime_err(msg: impl Into<String>) -> CliError {
    CliError { code: EXIT_RECON_RUNTIME, message: msg.into(), hint: None }
}

fn config_err(msg: impl Into<String>) -> CliError {
    CliError { code: EXIT_RECON_INVALID_CONFIG, message: msg.into(), hint: None }
}

fn load_config(path: Option<&PathBuf>) -> Result<SweepConfig, CliError> {
    let Some(path) = path else {
        return Ok(SweepConfig::default());
    };
    let config_str = std::fs::read_to_string(path)
        .map_err(|e| runtime_err(format!("cannot read config: {e}")))?;
    SweepConfig::from_toml(&config_str).map_err(|e| config_err(e.to_string()))
}

fn load_documents(path: &PathBuf) -> Result<Vec<Document>, CliError> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| runtime_err(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&data).map_err(|e| runtime_err(format!("{}: {e}", path.display())))
}

pub fn cmd_sweep(
    documents_path: PathBuf,
    config_path: Option<PathBuf>,
    threshold: Option<u8>,
    json_output: bool,
    output_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let mut config = load_config(config_path.as_ref())?;
    if let Some(threshold) = threshold {
        if threshold > 100 {
            return Err(CliError::args(format!("--threshold {threshold} is out of range"))
                .with_hint("confirmation threshold is a percentage, 0-100"));
        }
        config.confirmation_threshold = threshold;
    }

    let documents = load_documents(&documents_path)?;
    let (invoices, orders) = partition_by_kind(documents);

    let outcome = sweep(&invoices, &orders, &config);

    let json_str = serde_json::to_string_pretty(&outcome)
        .map_err(|e| runtime_err(format!("JSON serialization error: {e}")))?;

    if let Some(ref path) = output_file {
        std::fs::write(path, &json_str)
            .map_err(|e| runtime_err(format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    }

    // Human summary to stderr
    eprintln!(
        "swept {} invoices × {} orders: {} confirmed pairs, {} calendar events",
        invoices.len(),
        orders.len(),
        outcome.matched_pairs.len(),
        outcome.events.len(),
    );
    for pair in &outcome.matched_pairs {
        eprintln!(
            "  {} × {} [{}]: {}%",
            pair.invoice_id,
            pair.order_id,
            pair.brand,
            pair.result.summary.match_percentage,
        );
    }
    for error in &outcome.pair_errors {
        eprintln!("warning: {} × {}: {}", error.invoice_id, error.order_id, error.error);
    }

    Ok(())
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| runtime_err(format!("cannot read config: {e}")))?;

    let config = SweepConfig::from_toml(&config_str).map_err(|e| config_err(e.to_string()))?;

    eprintln!(
        "{}: valid (threshold {}%, {} brand code overrides, {} token overrides)",
        config_path.display(),
        config.confirmation_threshold,
        config.brand.codes.len(),
        config.brand.tokens.len(),
    );
    Ok(())
}
