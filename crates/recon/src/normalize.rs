use serde_json::Value;

/// Currency symbols seen in real invoices/orders; stripped before comparison.
const CURRENCY_SYMBOLS: [char; 4] = ['$', '€', '₩', '£'];

/// Canonicalize a single field value for equality testing.
///
/// Stringifies, trims, lowercases, strips currency symbols and
/// thousands-separator commas, then — if what remains parses as a number —
/// renders it canonically (integral values without a decimal point).
/// `"₩1,000.00"`, `1000`, and `"1000"` all normalize to `"1000"`.
/// Infallible: always returns a string, possibly empty.
pub fn normalize(value: &Value) -> String {
    let text = match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    let mut cleaned = text.trim().to_lowercase();
    cleaned.retain(|c| !CURRENCY_SYMBOLS.contains(&c) && c != ',');

    match cleaned.parse::<f64>() {
        // "inf"/"nan" parse as floats but are not numeric field values
        Ok(n) if n.is_finite() => {
            if n.fract() == 0.0 && n.abs() < 9e15 {
                format!("{}", n as i64)
            } else {
                format!("{n}")
            }
        }
        _ => cleaned,
    }
}

/// Raw display form of a value: strings verbatim, everything else via its
/// JSON rendering. Used where the UI needs the value as extracted.
pub fn display_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
