use chrono::NaiveDate;

/// Formats seen in extracted shipping-date fields, in priority order.
const DATE_FORMATS: [&str; 4] = ["%m/%d/%Y", "%d-%m-%Y", "%Y-%m-%d", "%Y%m%d"];

/// Generic fallback formats tried after the priority list.
const FALLBACK_FORMATS: [&str; 3] = ["%Y/%m/%d", "%m/%d/%y", "%Y.%m.%d"];

/// Parse a raw shipping-date string. Returns `None` on total failure —
/// an unparseable date means no event, never an error.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS.iter().chain(FALLBACK_FORMATS.iter()) {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }

    // Timestamp exports keep their date part ("2025-05-13T00:00:00Z")
    if let Some(prefix) = trimmed.get(..10) {
        if let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return Some(date);
        }
    }

    None
}
