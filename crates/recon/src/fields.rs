//! Field alias lists.
//!
//! OCR-extracted documents name the same semantic field inconsistently
//! (`Product_Code` vs `product_code` vs `Style`). Every lookup goes through
//! an explicit ordered candidate list resolved once per reconciliation,
//! never through scattered inline checks.

use serde_json::Value;

use crate::model::ProductLine;

/// Join-key synonyms, in resolution priority order. Case-sensitive variants
/// as seen in real documents.
pub const KEY_FIELD_CANDIDATES: [&str; 6] = [
    "Product_Code",
    "product_code",
    "item_code",
    "Style",
    "style",
    "custom_code",
];

/// Secondary candidates the indexer falls through when a line lacks the
/// resolved key field.
pub const KEY_FIELD_FALLBACKS: [&str; 6] = [
    "Product_Code",
    "product_code",
    "Style",
    "style",
    "Size",
    "size",
];

pub const SIZE_FIELDS: [&str; 2] = ["Size", "size"];
pub const QUANTITY_FIELDS: [&str; 2] = ["Quantity", "quantity"];
pub const PRICE_FIELDS: [&str; 2] = ["Wholesale_Price", "wholesale_price"];
pub const SHIPPING_START_FIELDS: [&str; 2] = ["Shipping_Start", "shipping_start"];
pub const SHIPPING_END_FIELDS: [&str; 2] = ["Shipping_End", "shipping_end"];
pub const MODEL_NAME_FIELDS: [&str; 4] = ["Model", "model", "Model_Name", "model_name"];

/// Degraded-but-defined default when either collection is empty.
pub const DEFAULT_KEY_FIELD: &str = "Product_Code";

/// One entry of the fixed comparison set: primary field name, lowercase
/// synonym, and the display label the UI shows for a disagreement.
pub struct ComparisonField {
    pub primary: &'static str,
    pub synonym: &'static str,
    pub label: &'static str,
}

pub const COMPARISON_FIELDS: [ComparisonField; 4] = [
    ComparisonField { primary: "Quantity", synonym: "quantity", label: "수량" },
    ComparisonField { primary: "Wholesale_Price", synonym: "wholesale_price", label: "단가" },
    ComparisonField { primary: "Size", synonym: "size", label: "사이즈" },
    ComparisonField { primary: "Color", synonym: "color", label: "컬러" },
];

/// First non-null value among the candidate field names. Absence and JSON
/// null both count as "no value".
pub fn field_value<'a>(product: &'a ProductLine, names: &[&str]) -> Option<&'a Value> {
    for name in names {
        match product.get(*name) {
            Some(Value::Null) | None => continue,
            Some(v) => return Some(v),
        }
    }
    None
}

/// Determine which field name acts as the join key for this pair of
/// collections. Deterministic: same inputs always resolve the same field.
pub fn resolve_key_field(products_a: &[ProductLine], products_b: &[ProductLine]) -> String {
    let (Some(first_a), Some(first_b)) = (products_a.first(), products_b.first()) else {
        return DEFAULT_KEY_FIELD.to_string();
    };

    for candidate in KEY_FIELD_CANDIDATES {
        if first_a.contains_key(candidate) && first_b.contains_key(candidate) {
            return candidate.to_string();
        }
    }

    // Arbitrary but stable: first field of side A's first line
    // (extraction order is preserved by the map).
    first_a
        .keys()
        .next()
        .cloned()
        .unwrap_or_else(|| DEFAULT_KEY_FIELD.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn line(fields: Value) -> ProductLine {
        fields.as_object().unwrap().clone()
    }

    #[test]
    fn empty_side_gives_default() {
        let a = vec![line(json!({"Product_Code": "AJ101"}))];
        assert_eq!(resolve_key_field(&a, &[]), DEFAULT_KEY_FIELD);
        assert_eq!(resolve_key_field(&[], &a), DEFAULT_KEY_FIELD);
        assert_eq!(resolve_key_field(&[], &[]), DEFAULT_KEY_FIELD);
    }

    #[test]
    fn first_candidate_on_both_sides_wins() {
        let a = vec![line(json!({"Style": "AJ101", "product_code": "X"}))];
        let b = vec![line(json!({"Style": "AJ101"}))];
        assert_eq!(resolve_key_field(&a, &b), "Style");

        // product_code outranks Style when both sides have it
        let b2 = vec![line(json!({"Style": "AJ101", "product_code": "X"}))];
        assert_eq!(resolve_key_field(&a, &b2), "product_code");
    }

    #[test]
    fn candidates_are_case_sensitive() {
        let a = vec![line(json!({"product_code": "x"}))];
        let b = vec![line(json!({"Product_Code": "x", "custom_code": "y"}))];
        // no shared candidate → falls back to side A's first field
        assert_eq!(resolve_key_field(&a, &b), "product_code");
    }

    #[test]
    fn fallback_is_first_field_of_side_a() {
        let a = vec![line(json!({"sku": "1", "name": "shoe"}))];
        let b = vec![line(json!({"article": "1"}))];
        assert_eq!(resolve_key_field(&a, &b), "sku");
    }

    #[test]
    fn field_value_skips_null_and_missing() {
        let p = line(json!({"Quantity": null, "quantity": "5"}));
        let v = field_value(&p, &QUANTITY_FIELDS).unwrap();
        assert_eq!(v, &json!("5"));
        assert!(field_value(&p, &PRICE_FIELDS).is_none());
    }
}
