use crate::fields::{field_value, COMPARISON_FIELDS};
use crate::model::{FieldDiff, ProductLine};
use crate::normalize::{display_string, normalize};

/// Outcome of comparing one matched pair of lines across the fixed
/// comparison set.
#[derive(Debug)]
pub struct FieldComparison {
    pub matched_fields: Vec<String>,
    pub mismatched_fields: Vec<FieldDiff>,
}

impl FieldComparison {
    pub fn is_clean(&self) -> bool {
        self.mismatched_fields.is_empty()
    }
}

/// Compare quantity, wholesale price, size, and color between two matched
/// lines. A field is compared only when both sides expose a value for it —
/// absence is not evidence of disagreement. Diffs keep the raw values for
/// display; equality is tested on normalized forms.
pub fn compare_fields(a: &ProductLine, b: &ProductLine) -> FieldComparison {
    let mut matched_fields = Vec::new();
    let mut mismatched_fields = Vec::new();

    for field in &COMPARISON_FIELDS {
        let names = [field.primary, field.synonym];
        let (Some(va), Some(vb)) = (field_value(a, &names), field_value(b, &names)) else {
            continue;
        };

        if normalize(va) == normalize(vb) {
            matched_fields.push(field.label.to_string());
        } else {
            mismatched_fields.push(FieldDiff {
                field: field.label.to_string(),
                value1: display_string(va),
                value2: display_string(vb),
            });
        }
    }

    FieldComparison { matched_fields, mismatched_fields }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn line(fields: serde_json::Value) -> ProductLine {
        fields.as_object().unwrap().clone()
    }

    #[test]
    fn identical_lines_match_all_exposed_fields() {
        let a = line(json!({
            "Quantity": "5", "Wholesale_Price": "150000", "Size": "39", "Color": "Black"
        }));
        let cmp = compare_fields(&a, &a.clone());
        assert!(cmp.is_clean());
        assert_eq!(cmp.matched_fields, vec!["수량", "단가", "사이즈", "컬러"]);
    }

    #[test]
    fn quantity_diff_keeps_raw_values() {
        let a = line(json!({"Quantity": "5"}));
        let b = line(json!({"Quantity": "6"}));
        let cmp = compare_fields(&a, &b);
        assert_eq!(
            cmp.mismatched_fields,
            vec![FieldDiff { field: "수량".into(), value1: "5".into(), value2: "6".into() }]
        );
    }

    #[test]
    fn synonym_names_compare_against_primary() {
        let a = line(json!({"Quantity": "5", "Wholesale_Price": "₩150,000"}));
        let b = line(json!({"quantity": 5, "wholesale_price": "150000"}));
        let cmp = compare_fields(&a, &b);
        assert!(cmp.is_clean());
        assert_eq!(cmp.matched_fields.len(), 2);
    }

    #[test]
    fn field_missing_on_one_side_is_skipped() {
        let a = line(json!({"Quantity": "5", "Color": "Black"}));
        let b = line(json!({"Quantity": "5"}));
        let cmp = compare_fields(&a, &b);
        assert_eq!(cmp.matched_fields, vec!["수량"]);
        assert!(cmp.mismatched_fields.is_empty());
    }

    #[test]
    fn color_compared_case_insensitively() {
        let a = line(json!({"Color": "BLACK"}));
        let b = line(json!({"color": "black"}));
        let cmp = compare_fields(&a, &b);
        assert_eq!(cmp.matched_fields, vec!["컬러"]);
    }

    #[test]
    fn price_diff_reported_with_currency_intact() {
        let a = line(json!({"Wholesale_Price": "₩150,000"}));
        let b = line(json!({"Wholesale_Price": "₩160,000"}));
        let cmp = compare_fields(&a, &b);
        assert_eq!(cmp.mismatched_fields[0].value1, "₩150,000");
        assert_eq!(cmp.mismatched_fields[0].value2, "₩160,000");
    }
}
