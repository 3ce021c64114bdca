use std::collections::HashMap;

use crate::fields::{field_value, KEY_FIELD_FALLBACKS, SIZE_FIELDS};
use crate::model::{KeyCollision, ProductLine};
use crate::normalize::display_string;

/// Insertion-ordered composite-key index over one side's product lines.
///
/// The composite key is the join-key value, suffixed `_<size>` when a size
/// field is present, so the same style in two sizes indexes as two items.
/// Last write wins on collision; collisions are recorded so strict callers
/// can report duplicate SKUs instead of silently losing lines.
pub struct ProductIndex<'a> {
    keys: Vec<String>,
    by_key: HashMap<String, &'a ProductLine>,
    collisions: Vec<KeyCollision>,
}

impl<'a> ProductIndex<'a> {
    pub fn get(&self, key: &str) -> Option<&'a ProductLine> {
        self.by_key.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// Keys in first-insertion order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn collisions(&self) -> &[KeyCollision] {
        &self.collisions
    }
}

/// Composite key for one line: resolved key field, falling through the
/// secondary candidates, finally a synthesized positional key.
pub fn composite_key(product: &ProductLine, key_field: &str, position: usize) -> String {
    let base = field_value(product, &[key_field])
        .or_else(|| field_value(product, &KEY_FIELD_FALLBACKS))
        .map(|v| display_string(v));

    let mut key = match base {
        Some(ref s) if !s.is_empty() => s.clone(),
        _ => format!("item_{position}"),
    };

    if let Some(size) = field_value(product, &SIZE_FIELDS) {
        let size = display_string(size);
        if !size.is_empty() {
            key.push('_');
            key.push_str(&size);
        }
    }

    key
}

/// Build the index for one side. Pure over its input; the borrow keeps
/// product lines read-only.
pub fn index_products<'a>(products: &'a [ProductLine], key_field: &str) -> ProductIndex<'a> {
    let mut keys: Vec<String> = Vec::with_capacity(products.len());
    let mut by_key: HashMap<String, &'a ProductLine> = HashMap::with_capacity(products.len());
    let mut first_seen: HashMap<String, usize> = HashMap::new();
    let mut collisions = Vec::new();

    for (position, product) in products.iter().enumerate() {
        let key = composite_key(product, key_field, position);

        match first_seen.get(&key) {
            Some(&first_index) => {
                collisions.push(KeyCollision {
                    key: key.clone(),
                    first_index,
                    second_index: position,
                });
                // overwrite, keep the key's original position
                by_key.insert(key, product);
            }
            None => {
                first_seen.insert(key.clone(), position);
                keys.push(key.clone());
                by_key.insert(key, product);
            }
        }
    }

    ProductIndex { keys, by_key, collisions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn line(fields: serde_json::Value) -> ProductLine {
        fields.as_object().unwrap().clone()
    }

    #[test]
    fn key_includes_size_suffix() {
        let p = line(json!({"Product_Code": "AJ101", "Size": "39"}));
        assert_eq!(composite_key(&p, "Product_Code", 0), "AJ101_39");
    }

    #[test]
    fn key_without_size() {
        let p = line(json!({"Product_Code": "AJ101"}));
        assert_eq!(composite_key(&p, "Product_Code", 0), "AJ101");
    }

    #[test]
    fn empty_size_ignored() {
        let p = line(json!({"Product_Code": "AJ101", "Size": ""}));
        assert_eq!(composite_key(&p, "Product_Code", 0), "AJ101");
    }

    #[test]
    fn missing_key_field_falls_through_candidates() {
        let p = line(json!({"Style": "AJ200"}));
        assert_eq!(composite_key(&p, "Product_Code", 3), "AJ200");
    }

    #[test]
    fn positional_key_when_nothing_usable() {
        let p = line(json!({"Color": "black"}));
        assert_eq!(composite_key(&p, "Product_Code", 7), "item_7");
    }

    #[test]
    fn numeric_key_values_stringified() {
        let p = line(json!({"Product_Code": 1101, "Size": 39}));
        assert_eq!(composite_key(&p, "Product_Code", 0), "1101_39");
    }

    #[test]
    fn index_preserves_insertion_order() {
        let products = vec![
            line(json!({"Product_Code": "B2"})),
            line(json!({"Product_Code": "A1"})),
            line(json!({"Product_Code": "C3"})),
        ];
        let index = index_products(&products, "Product_Code");
        assert_eq!(index.keys(), &["B2", "A1", "C3"]);
    }

    #[test]
    fn last_write_wins_and_collision_recorded() {
        let products = vec![
            line(json!({"Product_Code": "AJ101", "Size": "39", "Quantity": "5"})),
            line(json!({"Product_Code": "AJ101", "Size": "39", "Quantity": "9"})),
        ];
        let index = index_products(&products, "Product_Code");
        assert_eq!(index.len(), 1);
        let kept = index.get("AJ101_39").unwrap();
        assert_eq!(kept.get("Quantity"), Some(&json!("9")));
        assert_eq!(
            index.collisions(),
            &[KeyCollision { key: "AJ101_39".into(), first_index: 0, second_index: 1 }]
        );
    }

    #[test]
    fn same_style_distinct_sizes_do_not_collide() {
        let products = vec![
            line(json!({"Product_Code": "AJ101", "Size": "39"})),
            line(json!({"Product_Code": "AJ101", "Size": "40"})),
        ];
        let index = index_products(&products, "Product_Code");
        assert_eq!(index.len(), 2);
        assert!(index.collisions().is_empty());
    }
}
