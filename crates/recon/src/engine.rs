use crate::compare::compare_fields;
use crate::error::ReconError;
use crate::fields::{field_value, resolve_key_field, PRICE_FIELDS, QUANTITY_FIELDS, SIZE_FIELDS};
use crate::index::index_products;
use crate::model::{
    MatchEntry, MismatchEntry, ProductLine, ReconOptions, ReconResult, ReconSummary,
};
use crate::normalize::display_string;

/// Reconcile two product-line collections.
///
/// Resolves the join key field, indexes both sides, walks the key union
/// (side 1's keys in original order, then side-2-only keys in theirs), and
/// classifies each key as a match, a field-level mismatch, or a one-sided
/// entry. Pure function: no side effects, no errors — absent or malformed
/// fields degrade into mismatches or skipped comparisons.
pub fn reconcile(
    products_a: &[ProductLine],
    products_b: &[ProductLine],
    options: &ReconOptions,
) -> ReconResult {
    let key_field = resolve_key_field(products_a, products_b);
    let index_a = index_products(products_a, &key_field);
    let index_b = index_products(products_b, &key_field);

    let mut all_keys: Vec<&String> = index_a.keys().iter().collect();
    for key in index_b.keys() {
        if !index_a.contains(key) {
            all_keys.push(key);
        }
    }

    let mut matches = Vec::new();
    let mut mismatches = Vec::new();

    for key in &all_keys {
        match (index_a.get(key), index_b.get(key)) {
            (Some(a), Some(b)) => {
                let cmp = compare_fields(a, b);
                if cmp.is_clean() {
                    matches.push(MatchEntry {
                        key: (*key).clone(),
                        display_name: field_value(a, &[&key_field])
                            .map(display_string)
                            .unwrap_or_else(|| (*key).clone()),
                        size: field_value(a, &SIZE_FIELDS).map(display_string),
                        quantity: field_value(a, &QUANTITY_FIELDS).map(display_string),
                        price: field_value(a, &PRICE_FIELDS).map(display_string),
                    });
                } else {
                    mismatches.push(MismatchEntry {
                        key: (*key).clone(),
                        doc1_exists: true,
                        doc2_exists: true,
                        mismatched_fields: cmp.mismatched_fields,
                    });
                }
            }
            (a, b) => {
                mismatches.push(MismatchEntry {
                    key: (*key).clone(),
                    doc1_exists: a.is_some(),
                    doc2_exists: b.is_some(),
                    mismatched_fields: Vec::new(),
                });
            }
        }
    }

    let total_items = all_keys.len();
    let matched = matches.len();
    let mismatched = mismatches.len();
    let match_percentage = if total_items == 0 {
        0
    } else {
        ((matched as f64 / total_items as f64) * 100.0).round() as u8
    };

    ReconResult {
        doc1_type: options.doc1_label.clone(),
        doc2_type: options.doc2_label.clone(),
        key_field,
        matches,
        mismatches,
        summary: ReconSummary { total_items, matched, mismatched, match_percentage },
        doc1_collisions: if options.strict_index {
            index_a.collisions().to_vec()
        } else {
            Vec::new()
        },
        doc2_collisions: if options.strict_index {
            index_b.collisions().to_vec()
        } else {
            Vec::new()
        },
    }
}

/// Load product lines from a JSON array of flat objects.
pub fn load_json_products(data: &str) -> Result<Vec<ProductLine>, ReconError> {
    serde_json::from_str(data).map_err(|e| ReconError::Json(e.to_string()))
}

/// Load product lines from CSV text. The header row supplies field names;
/// every cell stays a string (the normalizer handles numeric forms later).
pub fn load_csv_products(data: &str) -> Result<Vec<ProductLine>, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ReconError::Io(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut products = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ReconError::Io(e.to_string()))?;
        let mut line = ProductLine::new();
        for (i, header) in headers.iter().enumerate() {
            if let Some(cell) = record.get(i) {
                line.insert(header.clone(), serde_json::Value::String(cell.to_string()));
            }
        }
        products.push(line);
    }

    Ok(products)
}
