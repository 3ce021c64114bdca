//! Brand abbreviation rules.
//!
//! Event titles are prefixed with a short brand code. Resolution order:
//! explicit full-name map, then heuristic substring tokens against the
//! brand and the model name (some documents carry the brand only inside
//! model strings), then the generic fallback. Kept as an enumerated rule
//! table so new labels are a data change, not a code change.

use crate::config::BrandOverrides;

/// Fallback code when no rule applies.
pub const GENERIC_CODE: &str = "ITEM";

/// Known label names → short codes. Matched case-insensitively on the
/// whole brand string.
const DEFAULT_CODES: [(&str, &str); 7] = [
    ("TOGA VIRILIS", "TOGA"),
    ("TOGA PULLA", "PULLA"),
    ("BASERANGE", "BASE"),
    ("OUR LEGACY", "OL"),
    ("KIKO KOSTADINOV", "KIKO"),
    ("STUDIO NICHOLSON", "SN"),
    ("MARGARET HOWELL", "MHL"),
];

/// Heuristic tokens, tried in order against brand then model name.
const DEFAULT_TOKENS: [(&str, &str); 5] = [
    ("VIRILIS", "TOGA"),
    ("PULLA", "PULLA"),
    ("BASERANGE", "BASE"),
    ("LEGACY", "OL"),
    ("KOSTADINOV", "KIKO"),
];

#[derive(Debug, Clone)]
pub struct BrandRules {
    codes: Vec<(String, String)>,
    tokens: Vec<(String, String)>,
}

impl Default for BrandRules {
    fn default() -> Self {
        Self {
            codes: DEFAULT_CODES
                .iter()
                .map(|(name, code)| (name.to_string(), code.to_string()))
                .collect(),
            tokens: DEFAULT_TOKENS
                .iter()
                .map(|(token, code)| (token.to_string(), code.to_string()))
                .collect(),
        }
    }
}

impl BrandRules {
    /// Built-in rules extended by config overrides. Overrides are tried
    /// first so they win over the defaults.
    pub fn with_overrides(overrides: &BrandOverrides) -> Self {
        let defaults = Self::default();
        let mut codes: Vec<(String, String)> = overrides
            .codes
            .iter()
            .map(|(name, code)| (name.clone(), code.clone()))
            .collect();
        codes.extend(defaults.codes);

        let mut tokens: Vec<(String, String)> = overrides
            .tokens
            .iter()
            .map(|t| (t.token.clone(), t.code.clone()))
            .collect();
        tokens.extend(defaults.tokens);

        Self { codes, tokens }
    }

    /// Short code for a brand, consulting the model name as a hint when the
    /// brand itself resolves nothing.
    pub fn code_for(&self, brand: &str, model_name: Option<&str>) -> String {
        let brand_upper = brand.trim().to_uppercase();

        for (name, code) in &self.codes {
            if brand_upper == name.to_uppercase() {
                return code.clone();
            }
        }

        for (token, code) in &self.tokens {
            if brand_upper.contains(&token.to_uppercase()) {
                return code.clone();
            }
        }

        if let Some(model) = model_name {
            let model_upper = model.to_uppercase();
            for (token, code) in &self.tokens {
                if model_upper.contains(&token.to_uppercase()) {
                    return code.clone();
                }
            }
        }

        GENERIC_CODE.to_string()
    }
}
