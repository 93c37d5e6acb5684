//! # Discount Rules
//!
//! A discount rule maps a running amount to a smaller (or equal) amount.
//! The cart folds its total through every registered rule in order.
//!
//! ## Rule Composition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  total ──► rule[0].apply ──► clamp ≥ 0 ──► rule[1].apply ──► clamp ...  │
//! │                                                                         │
//! │  Each rule consumes the PREVIOUS rule's output, not the original total: │
//! │    $100 ─► 10% off ─► $90 ─► $5 off ─► $85                              │
//! │    $100 ─► $5 off  ─► $95 ─► 10% off ─► $85.50                          │
//! │  Order matters.                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Built-in Rules
//! | Rule              | apply(amount)                                 |
//! |-------------------|-----------------------------------------------|
//! | `FixedAmountOff`  | `amount - off`                                |
//! | `PercentageOff`   | `amount - round(amount × bps / 10000)`        |
//! | `SpendBand`       | `amount - floor(amount / step) × off_per_step`|
//! | `FnRule`          | caller closure                                |

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::types::DiscountRate;
use crate::validation::{
    validate_amount, validate_label, validate_positive_amount, validate_rate, ValidationResult,
};

// =============================================================================
// Rule Trait
// =============================================================================

/// A rule transforming a running price total.
///
/// `apply` is the only required operation. `validate` is the structural
/// check the cart runs once, when the rule is registered; a rule that fails
/// it never enters the cart.
///
/// ## Implementing a custom rule
/// ```rust
/// use ledger_core::{DiscountRule, Money};
///
/// #[derive(Debug)]
/// struct HalfOffOverFifty;
///
/// impl DiscountRule for HalfOffOverFifty {
///     fn label(&self) -> String {
///         "half off over $50".to_string()
///     }
///
///     fn apply(&self, amount: Money) -> Money {
///         if amount > Money::from_dollars(50) {
///             Money::from_cents(amount.cents() / 2)
///         } else {
///             amount
///         }
///     }
/// }
///
/// assert_eq!(HalfOffOverFifty.apply(Money::from_dollars(80)), Money::from_dollars(40));
/// ```
pub trait DiscountRule: fmt::Debug + Send + Sync {
    /// Human-readable description shown in summaries and logs.
    fn label(&self) -> String;

    /// Maps a pre-discount amount to a post-discount amount.
    fn apply(&self, amount: Money) -> Money;

    /// Checks the rule's parameters.
    fn validate(&self) -> ValidationResult<()> {
        Ok(())
    }
}

// =============================================================================
// Fixed Amount Off
// =============================================================================

/// Subtracts a fixed amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedAmountOff {
    off: Money,
}

impl FixedAmountOff {
    /// Creates a rule subtracting `off`.
    pub const fn new(off: Money) -> Self {
        FixedAmountOff { off }
    }
}

impl DiscountRule for FixedAmountOff {
    fn label(&self) -> String {
        format!("{} off", self.off)
    }

    fn apply(&self, amount: Money) -> Money {
        amount.saturating_sub(self.off)
    }

    fn validate(&self) -> ValidationResult<()> {
        validate_amount("amount_off", self.off)
    }
}

// =============================================================================
// Percentage Off
// =============================================================================

/// Subtracts a percentage of the running amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentageOff {
    rate: DiscountRate,
}

impl PercentageOff {
    /// Creates a rule subtracting `rate` of the running amount.
    pub const fn new(rate: DiscountRate) -> Self {
        PercentageOff { rate }
    }
}

impl DiscountRule for PercentageOff {
    fn label(&self) -> String {
        format!("{} off", self.rate)
    }

    fn apply(&self, amount: Money) -> Money {
        amount.apply_percentage_discount(self.rate)
    }

    fn validate(&self) -> ValidationResult<()> {
        validate_rate(self.rate)
    }
}

// =============================================================================
// Spend Band
// =============================================================================

/// Grants `off_per_step` for every whole `step` of spend.
///
/// With `step == off_per_step` the rule removes every whole step, so it can
/// take the amount all the way down to the sub-step remainder (or below zero
/// when `off_per_step > step`; the cart clamps that).
///
/// ## Example
/// ```rust
/// use ledger_core::{DiscountRule, Money, SpendBand};
///
/// // "$10 off per $10 spent"
/// let band = SpendBand::new(Money::from_dollars(10), Money::from_dollars(10));
/// assert_eq!(band.apply(Money::from_dollars(100)), Money::zero());
/// assert_eq!(band.apply(Money::from_cents(10550)), Money::from_cents(550));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpendBand {
    step: Money,
    off_per_step: Money,
}

impl SpendBand {
    /// Creates a banding rule.
    pub const fn new(step: Money, off_per_step: Money) -> Self {
        SpendBand { step, off_per_step }
    }
}

impl DiscountRule for SpendBand {
    fn label(&self) -> String {
        format!("{} off per {} spent", self.off_per_step, self.step)
    }

    fn apply(&self, amount: Money) -> Money {
        let bands = amount.whole_steps(self.step);
        amount.saturating_sub(self.off_per_step.saturating_mul(bands))
    }

    fn validate(&self) -> ValidationResult<()> {
        validate_positive_amount("step", self.step)?;
        validate_amount("off_per_step", self.off_per_step)
    }
}

// =============================================================================
// Closure Rule
// =============================================================================

/// A labelled closure acting as a rule.
///
/// ## Example
/// ```rust
/// use ledger_core::{DiscountRule, FnRule, Money};
///
/// let round_down = FnRule::new("round down to dollar", |amount: Money| {
///     Money::from_dollars(amount.dollars())
/// });
/// assert_eq!(round_down.apply(Money::from_cents(1099)), Money::from_dollars(10));
/// ```
pub struct FnRule<F> {
    label: String,
    f: F,
}

impl<F> FnRule<F>
where
    F: Fn(Money) -> Money + Send + Sync,
{
    /// Wraps `f` under `label`.
    pub fn new(label: impl Into<String>, f: F) -> Self {
        FnRule {
            label: label.into(),
            f,
        }
    }
}

impl<F> fmt::Debug for FnRule<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRule").field("label", &self.label).finish()
    }
}

impl<F> DiscountRule for FnRule<F>
where
    F: Fn(Money) -> Money + Send + Sync,
{
    fn label(&self) -> String {
        self.label.clone()
    }

    fn apply(&self, amount: Money) -> Money {
        (self.f)(amount)
    }

    fn validate(&self) -> ValidationResult<()> {
        validate_label(&self.label)
    }
}

// =============================================================================
// Serializable Spec
// =============================================================================

/// Data form of the built-in rules, for loading rule sets from JSON.
///
/// ## Format
/// ```json
/// [
///   { "kind": "fixed_amount_off", "amount": 500 },
///   { "kind": "percentage_off", "bps": 1000 },
///   { "kind": "spend_band", "step": 1000, "off_per_step": 1000 }
/// ]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum DiscountSpec {
    /// See [`FixedAmountOff`].
    FixedAmountOff { amount: Money },
    /// See [`PercentageOff`].
    PercentageOff { bps: u32 },
    /// See [`SpendBand`].
    SpendBand { step: Money, off_per_step: Money },
}

impl DiscountSpec {
    /// Builds the rule this spec describes.
    pub fn into_rule(self) -> Box<dyn DiscountRule> {
        match self {
            DiscountSpec::FixedAmountOff { amount } => Box::new(FixedAmountOff::new(amount)),
            DiscountSpec::PercentageOff { bps } => {
                Box::new(PercentageOff::new(DiscountRate::from_bps(bps)))
            }
            DiscountSpec::SpendBand { step, off_per_step } => {
                Box::new(SpendBand::new(step, off_per_step))
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
