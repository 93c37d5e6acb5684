//! # Ledger Configuration
//!
//! Limits and display settings for a cart.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`LEDGER_*`)
//! 2. Defaults (this file)
//!
//! Configuration is read once and copied into each cart; nothing here is
//! shared or mutated afterwards.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{MAX_CART_ITEMS, MAX_DISCOUNT_RULES};

/// Cart limits and currency formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LedgerConfig {
    /// Maximum number of line items in one cart.
    pub max_items: usize,

    /// Maximum number of discount rules in one cart.
    pub max_discounts: usize,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,
}

impl Default for LedgerConfig {
    /// ## Default Values
    /// - 100 items, 20 discount rules
    /// - Currency: `$` with 2 decimals
    fn default() -> Self {
        LedgerConfig {
            max_items: MAX_CART_ITEMS,
            max_discounts: MAX_DISCOUNT_RULES,
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
        }
    }
}

impl LedgerConfig {
    /// Creates a config from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `LEDGER_MAX_ITEMS`: Override the item limit
    /// - `LEDGER_MAX_DISCOUNTS`: Override the discount rule limit
    /// - `LEDGER_CURRENCY_SYMBOL`: Override the currency symbol
    /// - `LEDGER_CURRENCY_DECIMALS`: Override the number of decimals
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates a config from an arbitrary key lookup.
    ///
    /// Unparsable values are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = LedgerConfig::default();

        if let Some(value) = lookup("LEDGER_MAX_ITEMS") {
            match value.trim().parse() {
                Ok(max) => config.max_items = max,
                Err(_) => warn!(%value, "Ignoring invalid LEDGER_MAX_ITEMS"),
            }
        }

        if let Some(value) = lookup("LEDGER_MAX_DISCOUNTS") {
            match value.trim().parse() {
                Ok(max) => config.max_discounts = max,
                Err(_) => warn!(%value, "Ignoring invalid LEDGER_MAX_DISCOUNTS"),
            }
        }

        if let Some(symbol) = lookup("LEDGER_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(value) = lookup("LEDGER_CURRENCY_DECIMALS") {
            match value.trim().parse::<u8>() {
                Ok(decimals) if decimals <= 4 => config.currency_decimals = decimals,
                _ => warn!(%value, "Ignoring invalid LEDGER_CURRENCY_DECIMALS"),
            }
        }

        config
    }

    /// Formats an amount in cents as a currency string.
    ///
    /// Amounts are always held in cents. With more than 2 decimals the
    /// fraction is padded with zeros; with fewer it is rounded half-up.
    ///
    /// ## Example
    /// ```rust
    /// use ledger_core::config::LedgerConfig;
    ///
    /// let config = LedgerConfig::default();
    /// assert_eq!(config.format_currency(1234), "$12.34");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let decimals = u32::from(self.currency_decimals);
        let magnitude = i128::from(cents).abs();

        // Rescale from cents to the configured number of decimals
        let scaled = if decimals >= 2 {
            magnitude * 10_i128.pow(decimals - 2)
        } else {
            let divisor = 10_i128.pow(2 - decimals);
            (magnitude + divisor / 2) / divisor
        };

        let divisor = 10_i128.pow(decimals);
        let whole = scaled / divisor;
        let frac = scaled % divisor;

        format!(
            "{}{}{}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            if decimals > 0 {
                format!("{whole}.{frac:0width$}", width = decimals as usize)
            } else {
                whole.to_string()
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_format_currency_positive() {
        let config = LedgerConfig::default();
        assert_eq!(config.format_currency(1234), "$12.34");
        assert_eq!(config.format_currency(100), "$1.00");
        assert_eq!(config.format_currency(1), "$0.01");
        assert_eq!(config.format_currency(0), "$0.00");
    }

    #[test]
    fn test_format_currency_negative() {
        let config = LedgerConfig::default();
        assert_eq!(config.format_currency(-1234), "-$12.34");
    }

    #[test]
    fn test_format_currency_custom_symbol() {
        let config = LedgerConfig {
            currency_symbol: "€".to_string(),
            ..LedgerConfig::default()
        };
        assert_eq!(config.format_currency(5000), "€50.00");
    }

    #[test]
    fn test_format_currency_other_decimals() {
        let whole = LedgerConfig {
            currency_decimals: 0,
            ..LedgerConfig::default()
        };
        assert_eq!(whole.format_currency(10000), "$100");
        assert_eq!(whole.format_currency(1049), "$10");
        assert_eq!(whole.format_currency(1050), "$11");
        assert_eq!(whole.format_currency(-1050), "-$11");

        let one = LedgerConfig {
            currency_decimals: 1,
            ..LedgerConfig::default()
        };
        assert_eq!(one.format_currency(1234), "$12.3");

        let four = LedgerConfig {
            currency_decimals: 4,
            ..LedgerConfig::default()
        };
        assert_eq!(four.format_currency(1234), "$12.3400");
        assert_eq!(four.format_currency(i64::MIN), "-$92233720368547758.0800");
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = LedgerConfig::from_lookup(lookup_from(&[
            ("LEDGER_MAX_ITEMS", "3"),
            ("LEDGER_MAX_DISCOUNTS", " 1 "),
            ("LEDGER_CURRENCY_SYMBOL", "£"),
        ]));
        assert_eq!(config.max_items, 3);
        assert_eq!(config.max_discounts, 1);
        assert_eq!(config.currency_symbol, "£");
        assert_eq!(config.currency_decimals, 2);
    }

    #[test]
    fn test_from_lookup_ignores_garbage() {
        let config = LedgerConfig::from_lookup(lookup_from(&[
            ("LEDGER_MAX_ITEMS", "lots"),
            ("LEDGER_CURRENCY_DECIMALS", "9"),
        ]));
        assert_eq!(config, LedgerConfig::default());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: LedgerConfig = serde_json::from_str(r#"{"maxItems": 5}"#).unwrap();
        assert_eq!(config.max_items, 5);
        assert_eq!(config.max_discounts, MAX_DISCOUNT_RULES);
    }
}
