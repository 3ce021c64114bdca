use std::collections::BTreeMap;

use serde::Deserialize;

use crate::brand::BrandRules;
use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Sweep config
// ---------------------------------------------------------------------------

/// Documents whose brand was not confidently extracted carry this sentinel
/// and are eligible to match any brand.
pub const AUTO_DETECT_BRAND: &str = "auto-detect";

pub const DEFAULT_CONFIRMATION_THRESHOLD: u8 = 80;

#[derive(Debug, Clone, Deserialize)]
pub struct SweepConfig {
    /// Minimum match percentage (inclusive) for a pair to be confirmed.
    #[serde(default = "default_threshold")]
    pub confirmation_threshold: u8,
    #[serde(default = "default_auto_detect")]
    pub auto_detect_brand: String,
    /// Report composite-key collisions in pair results.
    #[serde(default)]
    pub strict_index: bool,
    #[serde(default)]
    pub brand: BrandOverrides,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrandOverrides {
    /// Full brand name → short code, tried before the built-in map.
    #[serde(default)]
    pub codes: BTreeMap<String, String>,
    /// Heuristic substring tokens, tried before the built-in tokens.
    #[serde(default)]
    pub tokens: Vec<BrandToken>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrandToken {
    pub token: String,
    pub code: String,
}

fn default_threshold() -> u8 {
    DEFAULT_CONFIRMATION_THRESHOLD
}

fn default_auto_detect() -> String {
    AUTO_DETECT_BRAND.to_string()
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            confirmation_threshold: DEFAULT_CONFIRMATION_THRESHOLD,
            auto_detect_brand: AUTO_DETECT_BRAND.to_string(),
            strict_index: false,
            brand: BrandOverrides::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl SweepConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: SweepConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.confirmation_threshold > 100 {
            return Err(ReconError::ConfigValidation(format!(
                "confirmation_threshold must be 0-100, got {}",
                self.confirmation_threshold
            )));
        }

        if self.auto_detect_brand.trim().is_empty() {
            return Err(ReconError::ConfigValidation(
                "auto_detect_brand must not be empty".into(),
            ));
        }

        for token in &self.brand.tokens {
            if token.token.trim().is_empty() {
                return Err(ReconError::ConfigValidation(
                    "brand token must not be empty".into(),
                ));
            }
        }

        Ok(())
    }

    pub fn brand_rules(&self) -> BrandRules {
        BrandRules::with_overrides(&self.brand)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SweepConfig::default();
        assert_eq!(config.confirmation_threshold, 80);
        assert_eq!(config.auto_detect_brand, "auto-detect");
        assert!(!config.strict_index);
    }

    #[test]
    fn parse_empty_toml_uses_defaults() {
        let config = SweepConfig::from_toml("").unwrap();
        assert_eq!(config.confirmation_threshold, 80);
    }

    #[test]
    fn parse_full_config() {
        let input = r#"
confirmation_threshold = 90
auto_detect_brand = "unknown"
strict_index = true

[brand.codes]
"TOGA VIRILIS" = "TV"

[[brand.tokens]]
token = "ACME"
code = "AC"
"#;
        let config = SweepConfig::from_toml(input).unwrap();
        assert_eq!(config.confirmation_threshold, 90);
        assert_eq!(config.auto_detect_brand, "unknown");
        assert!(config.strict_index);
        assert_eq!(config.brand.codes["TOGA VIRILIS"], "TV");
        assert_eq!(config.brand.tokens[0].token, "ACME");
    }

    #[test]
    fn reject_threshold_over_100() {
        let err = SweepConfig::from_toml("confirmation_threshold = 101").unwrap_err();
        assert!(err.to_string().contains("0-100"));
    }

    #[test]
    fn reject_empty_sentinel() {
        let err = SweepConfig::from_toml(r#"auto_detect_brand = "  ""#).unwrap_err();
        assert!(err.to_string().contains("auto_detect_brand"));
    }

    #[test]
    fn reject_empty_brand_token() {
        let input = r#"
[[brand.tokens]]
token = ""
code = "X"
"#;
        assert!(SweepConfig::from_toml(input).is_err());
    }
}
