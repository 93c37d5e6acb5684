//! # Cart Summary
//!
//! A read-only projection of a cart, ready to print or serialize.
//!
//! ## Rendered Invoice
//! ```text
//! === Invoice ===
//! Items: 3
//! Total Price: $100.00
//! Discounted Price: $0.00
//! Discounts Applied: 1
//!   - $10.00 off per $10.00 spent
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::config::LedgerConfig;
use crate::money::Money;

/// Snapshot of a cart's totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSummary {
    /// Number of line items.
    pub item_count: usize,
    /// Sum of item prices.
    pub total: Money,
    /// Total after all discount rules.
    pub discounted: Money,
    /// `total - discounted`.
    pub savings: Money,
    /// Number of discount rules applied.
    pub discount_count: usize,
    /// Rule labels in application order.
    pub discounts: Vec<String>,
}

impl CartSummary {
    /// Renders the invoice using the configured currency format.
    pub fn render(&self, config: &LedgerConfig) -> String {
        Invoice {
            summary: self,
            config: Some(config),
        }
        .to_string()
    }
}

impl fmt::Display for CartSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let invoice = Invoice {
            summary: self,
            config: None,
        };
        fmt::Display::fmt(&invoice, f)
    }
}

/// Invoice text for a summary. Without a config, amounts use `Money`'s own
/// `Display`.
struct Invoice<'a> {
    summary: &'a CartSummary,
    config: Option<&'a LedgerConfig>,
}

impl Invoice<'_> {
    fn money(&self, amount: Money) -> String {
        match self.config {
            Some(config) => config.format_currency(amount.cents()),
            None => amount.to_string(),
        }
    }
}

impl fmt::Display for Invoice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.summary;
        writeln!(f, "=== Invoice ===")?;
        writeln!(f, "Items: {}", summary.item_count)?;
        writeln!(f, "Total Price: {}", self.money(summary.total))?;
        writeln!(f, "Discounted Price: {}", self.money(summary.discounted))?;
        writeln!(f, "Discounts Applied: {}", summary.discount_count)?;
        for label in &summary.discounts {
            writeln!(f, "  - {label}")?;
        }
        Ok(())
    }
}
