//! `xdoc reconcile` — pairwise product file reconciliation.

use std::path::{Path, PathBuf};

use crossdoc_recon::engine::{load_csv_products, load_json_products};
use crossdoc_recon::{reconcile, ProductLine, ReconOptions};

use crate::exit_codes::{EXIT_RECON_MISMATCH, EXIT_RECON_RUNTIME};
use crate::CliError;

fn runtime_err(msg: impl Into<String>) -> CliError {
    CliError { code: EXIT_RECON_RUNTIME, message: msg.into(), hint: None }
}

/// Split a `--labels doc1,doc2` argument into the two side labels.
fn parse_labels(labels: &str) -> Result<(String, String), CliError> {
    let Some((left, right)) = labels.split_once(',') else {
        return Err(CliError::args(format!("invalid --labels {:?}", labels))
            .with_hint("expected two comma-separated labels, e.g. --labels invoice,order"));
    };
    let left = left.trim();
    let right = right.trim();
    if left.is_empty() || right.is_empty() {
        return Err(CliError::args(format!("empty label in --labels {:?}", labels)));
    }
    Ok((left.to_string(), right.to_string()))
}

/// Load a product file, choosing the parser by extension.
fn load_products(path: &Path) -> Result<Vec<ProductLine>, CliError> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| runtime_err(format!("cannot read {}: {e}", path.display())))?;

    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    let result = if is_csv {
        load_csv_products(&data)
    } else {
        load_json_products(&data)
    };
    result.map_err(|e| runtime_err(format!("{}: {e}", path.display())))
}

pub fn cmd_reconcile(
    left: PathBuf,
    right: PathBuf,
    labels: String,
    strict: bool,
    json_output: bool,
    output_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let (doc1_label, doc2_label) = parse_labels(&labels)?;

    let left_products = load_products(&left)?;
    let right_products = load_products(&right)?;

    let options = ReconOptions { doc1_label, doc2_label, strict_index: strict };
    let result = reconcile(&left_products, &right_products, &options);

    let json_str = serde_json::to_string_pretty(&result)
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
    let s = &result.summary;
    eprintln!(
        "{} × {} on {}: {} items — {} matched, {} mismatched ({}%)",
        result.doc1_type,
        result.doc2_type,
        result.key_field,
        s.total_items,
        s.matched,
        s.mismatched,
        s.match_percentage,
    );
    if strict && (!result.doc1_collisions.is_empty() || !result.doc2_collisions.is_empty()) {
        eprintln!(
            "key collisions: {} in {}, {} in {}",
            result.doc1_collisions.len(),
            result.doc1_type,
            result.doc2_collisions.len(),
            result.doc2_type,
        );
    }

    if s.mismatched > 0 {
        return Err(CliError {
            code: EXIT_RECON_MISMATCH,
            message: String::new(),
            hint: None,
        });
    }

    Ok(())
}
