//! # Cart Ledger
//!
//! Owns line items and discount rules and computes totals from them.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Caller                     Cart                     State Change       │
//! │  ──────                     ────                     ────────────       │
//! │                                                                         │
//! │  NewItem ─────────────────► add_item() ────────────► items.push()      │
//! │                                                                         │
//! │  ItemId ──────────────────► remove_item() ─────────► items.remove(pos) │
//! │                                                                         │
//! │  impl DiscountRule ───────► apply_discount() ──────► discounts.push()  │
//! │                                                                         │
//! │  (read) ──────────────────► total_price()          (none)              │
//! │                             discounted_price()                          │
//! │                             generate_summary()                          │
//! │                                                                         │
//! │  Every check runs before the push/remove: a failed call changes nothing│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Removal Policy
//! Removal is exact: by the `ItemId` handle returned from `add_item`, or by
//! the first item equal in name and price. Either way a missing target is a
//! `NotFound` error, never a silent no-op.
//!
//! ## Thread Safety
//! A cart has no internal locking. It is `Send + Sync`, so a host serving
//! several sessions keeps one cart per session behind its own lock.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::config::LedgerConfig;
use crate::discount::{DiscountRule, DiscountSpec};
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::summary::CartSummary;
use crate::types::{ItemId, LineItem, NewItem};
use crate::validation::validate_new_item;

/// A shopping cart ledger.
///
/// ## Invariants
/// - `total_price()` is recomputed from the items on every call
/// - Items keep insertion order; duplicates by value are allowed
/// - Discount rules apply in insertion order, each on the previous output
/// - `0 <= discounted_price() <= total_price()`
#[derive(Debug)]
pub struct Cart {
    items: Vec<LineItem>,
    discounts: Vec<Box<dyn DiscountRule>>,
    config: LedgerConfig,
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart with default limits.
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    /// Creates a new empty cart with the given limits.
    pub fn with_config(config: LedgerConfig) -> Self {
        Cart {
            items: Vec::new(),
            discounts: Vec::new(),
            config,
            created_at: Utc::now(),
        }
    }

    // -------------------------------------------------------------------------
    // Items
    // -------------------------------------------------------------------------

    /// Adds an item and returns its handle.
    ///
    /// ## Errors
    /// - `Validation` if the name or price is missing, the name is blank
    ///   or too long, or the price is negative
    /// - `CartTooLarge` if the cart already holds `max_items`
    /// - `Validation(OutOfRange)` if the price would push the total past
    ///   what `Money` can hold
    ///
    /// ## Example
    /// ```rust
    /// use ledger_core::{Cart, Money, NewItem};
    ///
    /// let mut cart = Cart::new();
    /// let id = cart.add_item(NewItem::new("Widget 1", Money::from_dollars(50))).unwrap();
    /// assert_eq!(cart.len(), 1);
    /// assert_eq!(cart.get_item(id).unwrap().name(), "Widget 1");
    /// ```
    pub fn add_item(&mut self, item: NewItem) -> CoreResult<ItemId> {
        let (name, price) = validate_new_item(&item).map_err(|err| {
            warn!(error = %err, "Rejected cart item");
            err
        })?;

        if self.items.len() >= self.config.max_items {
            return Err(CoreError::CartTooLarge {
                max: self.config.max_items,
            });
        }

        let current = self.total_price();
        if current.checked_add(price).is_none() {
            warn!(total = %current, price = %price, "Rejected cart item: total would overflow");
            return Err(ValidationError::OutOfRange {
                field: "price".to_string(),
                min: 0,
                max: i64::MAX - current.cents(),
            }
            .into());
        }

        let line = LineItem::new(name, price);
        let id = line.id();
        debug!(id = %id, name = %line.name(), price = %price, "Adding cart item");
        self.items.push(line);

        Ok(id)
    }

    /// Removes the item with this handle and returns it.
    ///
    /// ## Errors
    /// `ItemNotFound` if no item has this handle (including one already removed).
    pub fn remove_item(&mut self, id: ItemId) -> CoreResult<LineItem> {
        let pos = self
            .items
            .iter()
            .position(|item| item.id() == id)
            .ok_or(CoreError::ItemNotFound(id))?;

        let removed = self.items.remove(pos);
        debug!(id = %id, price = %removed.price(), "Removed cart item");
        Ok(removed)
    }

    /// Removes the first item with this name and price and returns it.
    ///
    /// The name is trimmed first, the same way `add_item` stores it.
    ///
    /// ## Errors
    /// `NoMatchingItem` if nothing in the cart matches.
    pub fn remove_matching(&mut self, name: &str, price: Money) -> CoreResult<LineItem> {
        let name = name.trim();
        let pos = self
            .items
            .iter()
            .position(|item| item.matches(name, price))
            .ok_or_else(|| CoreError::NoMatchingItem {
                name: name.to_string(),
                price,
            })?;

        let removed = self.items.remove(pos);
        debug!(id = %removed.id(), name = %name, price = %price, "Removed matching cart item");
        Ok(removed)
    }

    /// Looks up an item by handle.
    pub fn get_item(&self, id: ItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes all items. Discount rules stay registered.
    pub fn clear(&mut self) {
        debug!(count = self.items.len(), "Clearing cart items");
        self.items.clear();
    }

    // -------------------------------------------------------------------------
    // Discounts
    // -------------------------------------------------------------------------

    /// Registers a discount rule after its structural check.
    ///
    /// ## Errors
    /// - `Validation` if `rule.validate()` fails
    /// - `TooManyDiscounts` if the cart already holds `max_discounts` rules
    pub fn apply_discount<R>(&mut self, rule: R) -> CoreResult<()>
    where
        R: DiscountRule + 'static,
    {
        self.apply_boxed_discount(Box::new(rule))
    }

    /// Registers the rule described by `spec`.
    pub fn apply_spec(&mut self, spec: DiscountSpec) -> CoreResult<()> {
        self.apply_boxed_discount(spec.into_rule())
    }

    /// Registers an already-boxed rule.
    pub fn apply_boxed_discount(&mut self, rule: Box<dyn DiscountRule>) -> CoreResult<()> {
        rule.validate().map_err(|err| {
            warn!(rule = %rule.label(), error = %err, "Rejected discount rule");
            err
        })?;

        if self.discounts.len() >= self.config.max_discounts {
            return Err(CoreError::TooManyDiscounts {
                max: self.config.max_discounts,
            });
        }

        debug!(rule = %rule.label(), position = self.discounts.len(), "Applying discount rule");
        self.discounts.push(rule);
        Ok(())
    }

    /// Number of registered discount rules.
    pub fn discount_count(&self) -> usize {
        self.discounts.len()
    }

    /// Labels of the registered rules, in application order.
    pub fn discount_labels(&self) -> Vec<String> {
        self.discounts.iter().map(|rule| rule.label()).collect()
    }

    /// Removes all discount rules.
    pub fn clear_discounts(&mut self) {
        debug!(count = self.discounts.len(), "Clearing discount rules");
        self.discounts.clear();
    }

    // -------------------------------------------------------------------------
    // Totals
    // -------------------------------------------------------------------------

    /// Sum of all current item prices. Zero for an empty cart.
    ///
    /// `add_item` refuses any price that would overflow this sum.
    pub fn total_price(&self) -> Money {
        self.items.iter().map(LineItem::price).sum()
    }

    /// Total after folding through every discount rule.
    ///
    /// ## Algorithm
    /// ```text
    /// running = total_price()
    /// for rule in discounts (insertion order):
    ///     next = rule.apply(running)
    ///     next > running?  ──► Err(InvalidRule)
    ///     running = max(next, 0)
    /// return running
    /// ```
    ///
    /// ## Errors
    /// `InvalidRule` if a rule returns more than it was given.
    pub fn discounted_price(&self) -> CoreResult<Money> {
        self.discounts
            .iter()
            .try_fold(self.total_price(), |running, rule| {
                let next = rule.apply(running);
                if next > running {
                    return Err(CoreError::InvalidRule {
                        rule: rule.label(),
                        input: running,
                        output: next,
                    });
                }
                Ok(next.clamp_non_negative())
            })
    }

    /// Builds a summary of the current state.
    ///
    /// ## Errors
    /// Propagates `InvalidRule` from [`Cart::discounted_price`].
    pub fn generate_summary(&self) -> CoreResult<CartSummary> {
        let total = self.total_price();
        let discounted = self.discounted_price()?;

        Ok(CartSummary {
            item_count: self.items.len(),
            total,
            discounted,
            savings: total - discounted,
            discount_count: self.discounts.len(),
            discounts: self.discount_labels(),
        })
    }

    // -------------------------------------------------------------------------
    // Metadata
    // -------------------------------------------------------------------------

    /// When the cart was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Limits and formatting this cart was built with.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discount::{FixedAmountOff, FnRule, PercentageOff, SpendBand};
    use crate::error::ErrorKind;
    use crate::types::DiscountRate;

    fn widget_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(NewItem::new("Widget 1", Money::from_dollars(50)))
            .unwrap();
        cart.add_item(NewItem::new("Widget 2", Money::from_dollars(30)))
            .unwrap();
        cart.add_item(NewItem::new("Widget 3", Money::from_dollars(20)))
            .unwrap();
        cart
    }

    #[test]
    fn test_cart_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Cart>();
    }

    #[test]
    fn test_empty_cart() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), Money::zero());
        assert_eq!(cart.discounted_price().unwrap(), Money::zero());
    }

    #[test]
    fn test_add_items_totals() {
        let cart = widget_cart();
        assert_eq!(cart.len(), 3);
        assert_eq!(cart.total_price(), Money::from_dollars(100));
        assert_eq!(cart.discounted_price().unwrap(), Money::from_dollars(100));
    }

    #[test]
    fn test_items_keep_insertion_order_and_duplicates() {
        let mut cart = Cart::new();
        cart.add_item(NewItem::new("B", Money::from_dollars(2))).unwrap();
        cart.add_item(NewItem::new("A", Money::from_dollars(1))).unwrap();
        cart.add_item(NewItem::new("B", Money::from_dollars(2))).unwrap();

        let names: Vec<&str> = cart.items().iter().map(LineItem::name).collect();
        assert_eq!(names, vec!["B", "A", "B"]);
        assert_eq!(cart.total_price(), Money::from_dollars(5));
    }

    #[test]
    fn test_add_invalid_item_leaves_cart_unchanged() {
        let mut cart = widget_cart();

        let missing_price = NewItem {
            name: Some("Widget 4".to_string()),
            price: None,
        };
        let err = cart.add_item(missing_price).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        let negative = NewItem::new("Refund", Money::from_cents(-100));
        assert_eq!(cart.add_item(negative).unwrap_err().kind(), ErrorKind::InvalidInput);

        let blank = NewItem::new("   ", Money::from_dollars(1));
        assert_eq!(cart.add_item(blank).unwrap_err().kind(), ErrorKind::InvalidInput);

        assert_eq!(cart.len(), 3);
        assert_eq!(cart.total_price(), Money::from_dollars(100));
    }

    #[test]
    fn test_cart_item_limit() {
        let mut cart = Cart::with_config(LedgerConfig {
            max_items: 1,
            ..LedgerConfig::default()
        });
        cart.add_item(NewItem::new("One", Money::from_dollars(1))).unwrap();

        let err = cart
            .add_item(NewItem::new("Two", Money::from_dollars(1)))
            .unwrap_err();
        assert!(matches!(err, CoreError::CartTooLarge { max: 1 }));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_remove_item_by_handle() {
        let mut cart = widget_cart();
        let id = cart
            .add_item(NewItem::new("Gadget", Money::from_cents(1234)))
            .unwrap();
        assert_eq!(cart.total_price(), Money::from_cents(11234));

        let removed = cart.remove_item(id).unwrap();
        assert_eq!(removed.name(), "Gadget");
        assert_eq!(cart.total_price(), Money::from_dollars(100));

        let err = cart.remove_item(id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(cart.len(), 3);
    }

    #[test]
    fn test_remove_matching_removes_first_only() {
        let mut cart = Cart::new();
        let first = cart.add_item(NewItem::new("Pen", Money::from_dollars(2))).unwrap();
        let second = cart.add_item(NewItem::new("Pen", Money::from_dollars(2))).unwrap();

        let removed = cart.remove_matching("Pen", Money::from_dollars(2)).unwrap();
        assert_eq!(removed.id(), first);
        assert_eq!(cart.items()[0].id(), second);

        cart.remove_matching("Pen", Money::from_dollars(2)).unwrap();
        let err = cart
            .remove_matching("Pen", Money::from_dollars(2))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_total_overflow_rejected() {
        let mut cart = Cart::new();
        let half = Money::from_cents(i64::MAX / 2 + 1);
        cart.add_item(NewItem::new("Big 1", half)).unwrap();

        let err = cart.add_item(NewItem::new("Big 2", half)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_price(), half);
        assert_eq!(cart.discounted_price().unwrap(), half);
        assert!(cart.generate_summary().is_ok());

        let rest = Money::from_cents(i64::MAX - half.cents());
        cart.add_item(NewItem::new("Fits", rest)).unwrap();
        assert_eq!(cart.total_price(), Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_remove_matching_trims_name() {
        let mut cart = widget_cart();
        cart.add_item(NewItem::new(" Widget ", Money::from_dollars(1)))
            .unwrap();
        assert_eq!(cart.items()[3].name(), "Widget");

        let removed = cart
            .remove_matching(" Widget ", Money::from_dollars(1))
            .unwrap();
        assert_eq!(removed.name(), "Widget");
        assert_eq!(cart.total_price(), Money::from_dollars(100));
    }

    #[test]
    fn test_banding_discount_clamps_to_zero() {
        let mut cart = widget_cart();
        cart.apply_discount(SpendBand::new(Money::from_dollars(10), Money::from_dollars(10)))
            .unwrap();

        assert_eq!(cart.total_price(), Money::from_dollars(100));
        assert_eq!(cart.discounted_price().unwrap(), Money::zero());
    }

    #[test]
    fn test_over_subtraction_is_clamped() {
        let mut cart = widget_cart();
        cart.apply_discount(FixedAmountOff::new(Money::from_dollars(250)))
            .unwrap();
        assert_eq!(cart.discounted_price().unwrap(), Money::zero());
    }

    #[test]
    fn test_discounts_compose_sequentially() {
        let mut cart = widget_cart();
        cart.apply_discount(PercentageOff::new(DiscountRate::from_percent(10)))
            .unwrap();
        cart.apply_discount(FixedAmountOff::new(Money::from_dollars(5)))
            .unwrap();
        // $100 → $90 → $85
        assert_eq!(cart.discounted_price().unwrap(), Money::from_dollars(85));

        let mut reversed = widget_cart();
        reversed
            .apply_discount(FixedAmountOff::new(Money::from_dollars(5)))
            .unwrap();
        reversed
            .apply_discount(PercentageOff::new(DiscountRate::from_percent(10)))
            .unwrap();
        // $100 → $95 → $85.50
        assert_eq!(reversed.discounted_price().unwrap(), Money::from_cents(8550));
    }

    #[test]
    fn test_invalid_rule_rejected_at_registration() {
        let mut cart = widget_cart();
        let err = cart
            .apply_discount(PercentageOff::new(DiscountRate::from_bps(15_000)))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(cart.discount_count(), 0);
    }

    #[test]
    fn test_price_raising_rule_fails_at_use() {
        let mut cart = widget_cart();
        cart.apply_discount(FnRule::new("surcharge", |amount: Money| {
            amount + Money::from_dollars(1)
        }))
        .unwrap();

        let err = cart.discounted_price().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRule);
        assert!(cart.generate_summary().is_err());
    }

    #[test]
    fn test_discount_limit() {
        let mut cart = Cart::with_config(LedgerConfig {
            max_discounts: 1,
            ..LedgerConfig::default()
        });
        cart.apply_spec(DiscountSpec::PercentageOff { bps: 500 }).unwrap();
        let err = cart
            .apply_spec(DiscountSpec::PercentageOff { bps: 500 })
            .unwrap_err();
        assert!(matches!(err, CoreError::TooManyDiscounts { max: 1 }));
        assert_eq!(cart.discount_count(), 1);
    }

    #[test]
    fn test_clear_keeps_discounts() {
        let mut cart = widget_cart();
        cart.apply_discount(FixedAmountOff::new(Money::from_dollars(1)))
            .unwrap();

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.discount_count(), 1);
        assert_eq!(cart.discounted_price().unwrap(), Money::zero());

        cart.clear_discounts();
        assert_eq!(cart.discount_count(), 0);
    }

    #[test]
    fn test_generate_summary() {
        let mut cart = widget_cart();
        cart.apply_discount(FixedAmountOff::new(Money::from_dollars(15)))
            .unwrap();

        let summary = cart.generate_summary().unwrap();
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.total, Money::from_dollars(100));
        assert_eq!(summary.discounted, Money::from_dollars(85));
        assert_eq!(summary.savings, Money::from_dollars(15));
        assert_eq!(summary.discount_count, 1);
        assert_eq!(summary.discounts, vec!["$15.00 off".to_string()]);
    }
}
