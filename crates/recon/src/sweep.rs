//! Pairwise sweep — tries every invoice×order combination within brand
//! constraints and keeps pairs above the confirmation threshold.

use std::collections::{BTreeMap, HashSet};

use crate::config::SweepConfig;
use crate::engine::reconcile;
use crate::error::ReconError;
use crate::events::synthesize;
use crate::model::{
    Document, DocumentKind, MatchedPair, PairError, ProductLine, ReconOptions, SweepOutcome,
};

/// Split a document set into invoices and orders. Contracts take no part
/// in the sweep.
pub fn partition_by_kind(documents: Vec<Document>) -> (Vec<Document>, Vec<Document>) {
    let mut invoices = Vec::new();
    let mut orders = Vec::new();
    for doc in documents {
        match doc.kind {
            DocumentKind::Invoice => invoices.push(doc),
            DocumentKind::Order => orders.push(doc),
            DocumentKind::Contract => {}
        }
    }
    (invoices, orders)
}

/// Two documents may be paired when their brands agree, or when either
/// side's brand is the auto-detect sentinel.
fn brands_compatible(invoice_brand: &str, order_brand: &str, sentinel: &str) -> bool {
    invoice_brand == order_brand || invoice_brand == sentinel || order_brand == sentinel
}

/// The confidently-extracted brand of the pair; the sentinel only survives
/// when neither side knows better.
fn effective_brand<'a>(invoice_brand: &'a str, order_brand: &'a str, sentinel: &str) -> &'a str {
    if invoice_brand == sentinel {
        order_brand
    } else {
        invoice_brand
    }
}

/// Run the full sweep. Sequential by design: the processed-pair set is
/// shared mutable state local to this call. A failing pair is recorded and
/// skipped; it never aborts the sweep.
pub fn sweep(invoices: &[Document], orders: &[Document], config: &SweepConfig) -> SweepOutcome {
    let rules = config.brand_rules();

    // Convert each document's rows once; a malformed document fails every
    // pair it appears in, not the sweep.
    let invoice_lines: Vec<Result<Vec<ProductLine>, ReconError>> =
        invoices.iter().map(|d| d.product_lines()).collect();
    let order_lines: Vec<Result<Vec<ProductLine>, ReconError>> =
        orders.iter().map(|d| d.product_lines()).collect();

    let mut processed: HashSet<(String, String)> = HashSet::new();
    let mut matched_pairs = Vec::new();
    let mut events = Vec::new();
    let mut pair_errors = Vec::new();
    let mut match_rates: BTreeMap<String, u8> = BTreeMap::new();

    for (i, invoice) in invoices.iter().enumerate() {
        for (j, order) in orders.iter().enumerate() {
            if !brands_compatible(&invoice.brand, &order.brand, &config.auto_detect_brand) {
                continue;
            }
            if !processed.insert((invoice.id.clone(), order.id.clone())) {
                continue;
            }

            let (inv_products, ord_products) = match (&invoice_lines[i], &order_lines[j]) {
                (Ok(inv), Ok(ord)) => (inv, ord),
                (Err(e), _) | (_, Err(e)) => {
                    pair_errors.push(PairError {
                        invoice_id: invoice.id.clone(),
                        order_id: order.id.clone(),
                        error: e.to_string(),
                    });
                    continue;
                }
            };

            let options = ReconOptions {
                doc1_label: "invoice".into(),
                doc2_label: "order".into(),
                strict_index: config.strict_index,
            };
            let result = reconcile(inv_products, ord_products, &options);

            let percentage = result.summary.match_percentage;
            for id in [&invoice.id, &order.id] {
                let rate = match_rates.entry(id.clone()).or_insert(0);
                if percentage > *rate {
                    *rate = percentage;
                }
            }

            if percentage >= config.confirmation_threshold {
                let brand = effective_brand(
                    &invoice.brand,
                    &order.brand,
                    &config.auto_detect_brand,
                );
                let pair = MatchedPair {
                    invoice_id: invoice.id.clone(),
                    order_id: order.id.clone(),
                    brand: brand.to_string(),
                    result,
                };
                events.extend(synthesize(&pair, ord_products, &rules));
                matched_pairs.push(pair);
            }
        }
    }

    SweepOutcome { matched_pairs, events, pair_errors, match_rates }
}
