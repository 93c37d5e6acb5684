//! # Domain Types
//!
//! Value types shared by the cart, the discount rules and the catalog.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    NewItem      │   │    LineItem     │   │  DiscountRate   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name?          │──►│  id (ItemId)    │   │  bps (u32)      │       │
//! │  │  price?         │   │  name           │   │  1000 = 10%     │       │
//! │  │  (caller draft) │   │  price          │   └─────────────────┘       │
//! │  └─────────────────┘   │  added_at       │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Handle Identity
//! A `LineItem` is identified by the `ItemId` minted when it enters the cart.
//! Two items with the same name and price are still distinct entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

use crate::catalog::Product;
use crate::money::Money;

// =============================================================================
// Discount Rate
// =============================================================================

/// Percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000, so 1250 bps = 12.5% stays an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Basis points in 100%.
    pub const FULL_BPS: u32 = 10_000;

    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a rate from a whole percentage. Saturates at `u32::MAX` bps.
    #[inline]
    pub const fn from_percent(percent: u32) -> Self {
        DiscountRate(percent.saturating_mul(100))
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "{whole}%")
        } else {
            write!(f, "{whole}.{frac:02}%")
        }
    }
}

// =============================================================================
// Item Handle
// =============================================================================

/// Stable handle for a line item in a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemId(#[ts(type = "string")] Uuid);

impl ItemId {
    /// Mints a fresh handle (UUID v4).
    pub fn new() -> Self {
        ItemId(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// =============================================================================
// New Item (caller draft)
// =============================================================================

/// An item as supplied by a caller, before validation.
///
/// Both fields are optional so that payloads with a missing name or price
/// deserialize and are then rejected by [`Cart::add_item`](crate::cart::Cart::add_item)
/// with a proper validation error instead of a parse failure.
///
/// ## Example
/// ```rust
/// use ledger_core::{Money, NewItem};
///
/// let item = NewItem::new("Widget 1", Money::from_dollars(50));
/// assert_eq!(item.name.as_deref(), Some("Widget 1"));
///
/// let partial: NewItem = serde_json::from_str(r#"{"name":"Widget"}"#).unwrap();
/// assert!(partial.price.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<Money>,
}

impl NewItem {
    /// Creates a complete draft.
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        NewItem {
            name: Some(name.into()),
            price: Some(price),
        }
    }
}

/// Snapshots a catalog product into a cart draft.
///
/// The price is frozen at this moment; later catalog edits do not
/// reach items already in a cart.
impl From<&Product> for NewItem {
    fn from(product: &Product) -> Self {
        NewItem::new(product.name.clone(), product.price)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A priced entry held by a cart. Immutable once added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct LineItem {
    id: ItemId,
    name: String,
    price: Money,
    #[ts(as = "String")]
    added_at: DateTime<Utc>,
}

impl LineItem {
    /// Builds an item from already-validated parts.
    pub(crate) fn new(name: String, price: Money) -> Self {
        LineItem {
            id: ItemId::new(),
            name,
            price,
            added_at: Utc::now(),
        }
    }

    /// Handle assigned when the item entered the cart.
    #[inline]
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price (never negative).
    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    /// When the item was added.
    #[inline]
    pub fn added_at(&self) -> DateTime<Utc> {
        self.added_at
    }

    /// Value equality on name and price, ignoring the handle.
    pub fn matches(&self, name: &str, price: Money) -> bool {
        self.name == name && self.price == price
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
