use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single extracted line item: flat field name → value mapping, exactly as
/// the upstream extraction produced it. Field order is preserved because the
/// key-field fallback is positional.
pub type ProductLine = serde_json::Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Invoice,
    Order,
    Contract,
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invoice => write!(f, "invoice"),
            Self::Order => write!(f, "order"),
            Self::Contract => write!(f, "contract"),
        }
    }
}

/// A commercial document as the document store hands it over. The engine
/// only reads `products`; `match_rate` is written back by the caller from
/// the sweep outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub kind: DocumentKind,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    /// Raw rows; shape is validated per pair, not on load, so one malformed
    /// document cannot take down an entire sweep.
    pub products: Vec<Value>,
    #[serde(default)]
    pub match_rate: Option<u8>,
}

impl Document {
    /// Validate that every product row is a flat object and clone them out.
    pub fn product_lines(&self) -> Result<Vec<ProductLine>, ReconError> {
        self.products
            .iter()
            .enumerate()
            .map(|(index, row)| match row {
                Value::Object(map) => Ok(map.clone()),
                _ => Err(ReconError::MalformedProduct {
                    doc_id: self.id.clone(),
                    index,
                }),
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Reconciliation result
// ---------------------------------------------------------------------------

/// Options for a single reconcile call. The labels name the two sides in
/// the result (the sweep passes `invoice`/`order`).
#[derive(Debug, Clone)]
pub struct ReconOptions {
    pub doc1_label: String,
    pub doc2_label: String,
    /// Report composite-key collisions instead of silently keeping the
    /// last line. The key → line mapping is unchanged either way.
    pub strict_index: bool,
}

impl Default for ReconOptions {
    fn default() -> Self {
        Self {
            doc1_label: "doc1".into(),
            doc2_label: "doc2".into(),
            strict_index: false,
        }
    }
}

/// A line item that agreed on every compared field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEntry {
    pub key: String,
    /// Value of the key field on side 1, for display.
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

/// One field disagreement. Values are raw (non-normalized) for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDiff {
    pub field: String,
    pub value1: String,
    pub value2: String,
}

/// A key that failed to reconcile: either present on one side only, or
/// present on both with field-level disagreements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MismatchEntry {
    pub key: String,
    pub doc1_exists: bool,
    pub doc2_exists: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mismatched_fields: Vec<FieldDiff>,
}

/// Two lines of the same document collided on a composite key; the later
/// line replaced the earlier one in the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyCollision {
    pub key: String,
    pub first_index: usize,
    pub second_index: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconSummary {
    pub total_items: usize,
    pub matched: usize,
    pub mismatched: usize,
    /// round(matched / total × 100); 0 when there is nothing to compare.
    pub match_percentage: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconResult {
    pub doc1_type: String,
    pub doc2_type: String,
    /// Join key field resolved for this pair.
    pub key_field: String,
    pub matches: Vec<MatchEntry>,
    pub mismatches: Vec<MismatchEntry>,
    pub summary: ReconSummary,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub doc1_collisions: Vec<KeyCollision>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub doc2_collisions: Vec<KeyCollision>,
}

// ---------------------------------------------------------------------------
// Sweep output
// ---------------------------------------------------------------------------

/// An invoice/order pair whose match percentage reached the confirmation
/// threshold. Transient — rebuilt on every sweep.
#[derive(Debug, Clone, Serialize)]
pub struct MatchedPair {
    pub invoice_id: String,
    pub order_id: String,
    pub brand: String,
    pub result: ReconResult,
}

/// A pair whose reconciliation failed; the sweep continued without it.
#[derive(Debug, Clone, Serialize)]
pub struct PairError {
    pub invoice_id: String,
    pub order_id: String,
    pub error: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleType {
    Start,
    End,
}

impl std::fmt::Display for ScheduleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::End => write!(f, "end"),
        }
    }
}

/// Synthesized shipment event. Never mutated after creation; reruns of the
/// sweep regenerate the whole set.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarEvent {
    pub id: String,
    /// ISO `YYYY-MM-DD`.
    pub date: String,
    pub title: String,
    pub schedule_type: ScheduleType,
    pub brand: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    pub source_invoice_id: String,
    pub source_order_id: String,
    /// Always true for synthesized events; manually entered calendar
    /// entries are never auto-confirmed and never pass through here.
    pub confirmed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SweepOutcome {
    pub matched_pairs: Vec<MatchedPair>,
    pub events: Vec<CalendarEvent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pair_errors: Vec<PairError>,
    /// Best match percentage seen per document id; the caller writes these
    /// back as `match_rate`.
    pub match_rates: std::collections::BTreeMap<String, u8>,
}
