//! Shipment event synthesis — calendar records derived from confirmed pairs.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::brand::BrandRules;
use crate::dates::parse_date;
use crate::fields::{
    field_value, MODEL_NAME_FIELDS, SHIPPING_END_FIELDS, SHIPPING_START_FIELDS,
};
use crate::index::index_products;
use crate::model::{CalendarEvent, MatchedPair, ProductLine, ScheduleType};
use crate::normalize::display_string;

/// One matched line with its parsed shipping window.
struct ShipmentItem {
    key: String,
    model_code: Option<String>,
    model_name: Option<String>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

/// Synthesize shipment-start / shipment-end events for a confirmed pair.
///
/// Each match entry is correlated back to its order line via the pair's
/// key field; unparseable or absent dates contribute no event. Items
/// sharing a start date collapse into one start event; likewise for end
/// dates, except an item whose end equals its own start is excluded from
/// end grouping (no duplicate same-day start+end).
pub fn synthesize(
    pair: &MatchedPair,
    order_products: &[ProductLine],
    rules: &BrandRules,
) -> Vec<CalendarEvent> {
    let order_index = index_products(order_products, &pair.result.key_field);

    let mut items: Vec<ShipmentItem> = Vec::new();
    for entry in &pair.result.matches {
        let Some(line) = order_index.get(&entry.key) else {
            continue;
        };

        let start = field_value(line, &SHIPPING_START_FIELDS)
            .map(|v| display_string(v))
            .and_then(|raw| parse_date(&raw));
        let end = field_value(line, &SHIPPING_END_FIELDS)
            .map(|v| display_string(v))
            .and_then(|raw| parse_date(&raw));

        items.push(ShipmentItem {
            key: entry.key.clone(),
            model_code: Some(entry.display_name.clone()),
            model_name: field_value(line, &MODEL_NAME_FIELDS).map(|v| display_string(v)),
            start,
            end,
        });
    }

    let mut start_groups: BTreeMap<NaiveDate, Vec<&ShipmentItem>> = BTreeMap::new();
    let mut end_groups: BTreeMap<NaiveDate, Vec<&ShipmentItem>> = BTreeMap::new();

    for item in &items {
        if let Some(start) = item.start {
            start_groups.entry(start).or_default().push(item);
        }
        if let Some(end) = item.end {
            if item.start != Some(end) {
                end_groups.entry(end).or_default().push(item);
            }
        }
    }

    let mut events = Vec::new();
    for (date, group) in &start_groups {
        events.push(build_event(pair, rules, *date, group, ScheduleType::Start));
    }
    for (date, group) in &end_groups {
        events.push(build_event(pair, rules, *date, group, ScheduleType::End));
    }

    events
}

fn build_event(
    pair: &MatchedPair,
    rules: &BrandRules,
    date: NaiveDate,
    group: &[&ShipmentItem],
    schedule_type: ScheduleType,
) -> CalendarEvent {
    let lead = group[0];
    let code = rules.code_for(&pair.brand, lead.model_name.as_deref());
    let name = short_item_name(lead);
    let count_suffix = if group.len() > 1 {
        format!(" 외{}", group.len() - 1)
    } else {
        String::new()
    };
    let marker = match schedule_type {
        ScheduleType::Start => "시작",
        ScheduleType::End => "마감",
    };

    CalendarEvent {
        id: uuid::Uuid::new_v4().to_string(),
        date: date.format("%Y-%m-%d").to_string(),
        title: format!("{code} {name}{count_suffix} {marker}"),
        schedule_type,
        brand: pair.brand.clone(),
        model_code: lead.model_code.clone(),
        model_name: lead.model_name.clone(),
        source_invoice_id: pair.invoice_id.clone(),
        source_order_id: pair.order_id.clone(),
        confirmed: true,
    }
}

/// Short display name for an item: model name up to the first hyphen, else
/// the first 10 chars with an ellipsis, else the model code.
fn short_item_name(item: &ShipmentItem) -> String {
    if let Some(name) = &item.model_name {
        if let Some((head, _)) = name.split_once('-') {
            return head.trim().to_string();
        }
        if name.chars().count() > 10 {
            let head: String = name.chars().take(10).collect();
            return format!("{head}…");
        }
        return name.clone();
    }
    item.model_code.clone().unwrap_or_else(|| item.key.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MatchEntry, ReconResult, ReconSummary};
    use serde_json::json;

    fn lines(rows: serde_json::Value) -> Vec<ProductLine> {
        rows.as_array()
            .unwrap()
            .iter()
            .map(|r| r.as_object().unwrap().clone())
            .collect()
    }

    fn pair_with_matches(brand: &str, matches: Vec<MatchEntry>) -> MatchedPair {
        let matched = matches.len();
        MatchedPair {
            invoice_id: "inv_1".into(),
            order_id: "ord_1".into(),
            brand: brand.into(),
            result: ReconResult {
                doc1_type: "invoice".into(),
                doc2_type: "order".into(),
                key_field: "Product_Code".into(),
                matches,
                mismatches: vec![],
                summary: ReconSummary {
                    total_items: matched,
                    matched,
                    mismatched: 0,
                    match_percentage: 100,
                },
                doc1_collisions: vec![],
                doc2_collisions: vec![],
            },
        }
    }

    fn entry(key: &str, name: &str) -> MatchEntry {
        MatchEntry {
            key: key.into(),
            display_name: name.into(),
            size: None,
            quantity: None,
            price: None,
        }
    }

    #[test]
    fn start_and_end_events_for_distinct_dates() {
        let pair = pair_with_matches("TOGA VIRILIS", vec![entry("AJ101", "AJ101")]);
        let order = lines(json!([
            {"Product_Code": "AJ101", "Shipping_Start": "2025-05-13", "Shipping_End": "2025-06-01"}
        ]));
        let events = synthesize(&pair, &order, &BrandRules::default());

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].schedule_type, ScheduleType::Start);
        assert_eq!(events[0].date, "2025-05-13");
        assert_eq!(events[0].title, "TOGA AJ101 시작");
        assert!(events[0].confirmed);
        assert_eq!(events[1].schedule_type, ScheduleType::End);
        assert_eq!(events[1].date, "2025-06-01");
        assert_eq!(events[1].title, "TOGA AJ101 마감");
        assert_eq!(events[1].source_invoice_id, "inv_1");
        assert_eq!(events[1].source_order_id, "ord_1");
    }

    #[test]
    fn same_day_start_end_emits_start_only() {
        let pair = pair_with_matches("TOGA VIRILIS", vec![entry("AJ101", "AJ101")]);
        let order = lines(json!([
            {"Product_Code": "AJ101", "Shipping_Start": "2025-05-13", "Shipping_End": "2025-05-13"}
        ]));
        let events = synthesize(&pair, &order, &BrandRules::default());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].schedule_type, ScheduleType::Start);
    }

    #[test]
    fn items_sharing_start_date_grouped_with_count_suffix() {
        let pair = pair_with_matches(
            "TOGA VIRILIS",
            vec![entry("AJ101", "AJ101"), entry("AJ102", "AJ102"), entry("AJ103", "AJ103")],
        );
        let order = lines(json!([
            {"Product_Code": "AJ101", "Shipping_Start": "2025-05-13"},
            {"Product_Code": "AJ102", "Shipping_Start": "2025-05-13"},
            {"Product_Code": "AJ103", "Shipping_Start": "2025-05-20"}
        ]));
        let events = synthesize(&pair, &order, &BrandRules::default());
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].title, "TOGA AJ101 외2 시작");
        assert_eq!(events[1].title, "TOGA AJ103 시작");
    }

    #[test]
    fn unparseable_date_contributes_no_event() {
        let pair = pair_with_matches("TOGA VIRILIS", vec![entry("AJ101", "AJ101")]);
        let order = lines(json!([
            {"Product_Code": "AJ101", "Shipping_Start": "13 May 25"}
        ]));
        let events = synthesize(&pair, &order, &BrandRules::default());
        assert!(events.is_empty());
    }

    #[test]
    fn model_name_truncated_or_split_for_title() {
        let pair = pair_with_matches("BASERANGE", vec![entry("B1", "B1"), entry("B2", "B2")]);
        let order = lines(json!([
            {"Product_Code": "B1", "Model": "Metal Boot - Leather", "Shipping_Start": "2025-05-13"},
            {"Product_Code": "B2", "Model": "Longsleeve Turtleneck", "Shipping_Start": "2025-05-20"}
        ]));
        let events = synthesize(&pair, &order, &BrandRules::default());
        assert_eq!(events[0].title, "BASE Metal Boot 시작");
        assert_eq!(events[1].title, "BASE Longsleeve… 시작");
    }

    #[test]
    fn unmatched_key_in_order_skipped() {
        // match entry whose composite key is missing from the order side
        let pair = pair_with_matches("TOGA VIRILIS", vec![entry("GHOST", "GHOST")]);
        let order = lines(json!([
            {"Product_Code": "AJ101", "Shipping_Start": "2025-05-13"}
        ]));
        let events = synthesize(&pair, &order, &BrandRules::default());
        assert!(events.is_empty());
    }
}
