//! # ledger-core: Pure Cart Ledger Logic
//!
//! A shopping-cart ledger: priced line items, an ordered list of discount
//! rules, and totals computed from both. No I/O of any kind.
//!
//! ## Module Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ledger-core                                      │
//! │                                                                         │
//! │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐          │
//! │   │   money   │  │   types   │  │ discount  │  │validation │          │
//! │   │   Money   │  │  LineItem │  │ Discount- │  │   rules   │          │
//! │   │           │  │  NewItem  │  │   Rule    │  │  checks   │          │
//! │   └───────────┘  └───────────┘  └───────────┘  └───────────┘          │
//! │         │              │              │              │                  │
//! │         └──────────────┴──────┬───────┴──────────────┘                  │
//! │                               ▼                                         │
//! │   ┌───────────┐        ┌─────────────┐        ┌───────────┐            │
//! │   │  catalog  │──────► │    cart     │──────► │  summary  │            │
//! │   │  search   │NewItem │    Cart     │        │  invoice  │            │
//! │   └───────────┘        └─────────────┘        └───────────┘            │
//! │                               ▲                                         │
//! │                        ┌──────┴──────┐                                  │
//! │                        │   config    │                                  │
//! │                        └─────────────┘                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//!
//! 1. **Integer Money**: all amounts are cents (i64)
//! 2. **Validate at the boundary**: items and rules are checked when they
//!    enter the cart, so a rejected call changes nothing
//! 3. **Never stale**: totals are recomputed from the items on every call
//! 4. **Never negative**: the discounted price is clamped at zero
//!
//! ## Example Usage
//!
//! ```rust
//! use ledger_core::{Cart, Money, NewItem, SpendBand};
//!
//! let mut cart = Cart::new();
//! cart.add_item(NewItem::new("Widget 1", Money::from_dollars(50))).unwrap();
//! cart.add_item(NewItem::new("Widget 2", Money::from_dollars(30))).unwrap();
//! cart.add_item(NewItem::new("Widget 3", Money::from_dollars(20))).unwrap();
//!
//! // "$10 off per $10 spent"
//! cart.apply_discount(SpendBand::new(Money::from_dollars(10), Money::from_dollars(10)))
//!     .unwrap();
//!
//! let summary = cart.generate_summary().unwrap();
//! assert_eq!(summary.total, Money::from_dollars(100));
//! assert_eq!(summary.discounted, Money::zero());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod config;
pub mod discount;
pub mod error;
pub mod money;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use catalog::{Catalog, Product};
pub use config::LedgerConfig;
pub use discount::{DiscountRule, DiscountSpec, FixedAmountOff, FnRule, PercentageOff, SpendBand};
pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use money::Money;
pub use summary::CartSummary;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default maximum number of line items in a cart.
///
/// ## Business Reason
/// Prevents runaway carts. Override per cart through [`LedgerConfig`].
pub const MAX_CART_ITEMS: usize = 100;

/// Default maximum number of discount rules in a cart.
pub const MAX_DISCOUNT_RULES: usize = 20;
