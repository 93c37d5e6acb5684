//! # Error Types
//!
//! Domain-specific error types for ledger-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ValidationError  - Field-level input failures (name, price, rule)     │
//! │        │                                                                │
//! │        ▼ (#[from])                                                      │
//! │  CoreError        - Ledger operation failures                          │
//! │        │                                                                │
//! │        ▼ kind()                                                         │
//! │  ErrorKind        - InvalidInput | NotFound | InvalidRule              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, handle, rule label)
//! 3. A rejected mutation never leaves the cart half-modified

use thiserror::Error;

use crate::money::Money;
use crate::types::ItemId;

// =============================================================================
// Error Kind
// =============================================================================

/// Coarse classification of ledger failures.
///
/// Callers that only need to branch on the category (e.g. to map onto an
/// HTTP status or a UI message) match on this instead of every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed item or discount rule passed to a mutating operation.
    InvalidInput,
    /// Removal target is not in the cart.
    NotFound,
    /// A registered rule misbehaved while computing the discounted price.
    InvalidRule,
}

// =============================================================================
// Core Error
// =============================================================================

/// Cart ledger errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No item with this handle is in the cart.
    #[error("Item not found in cart: {0}")]
    ItemNotFound(ItemId),

    /// No item equal to the given name and price is in the cart.
    #[error("No item '{name}' priced {price} in cart")]
    NoMatchingItem { name: String, price: Money },

    /// Cart has reached its configured item limit.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Cart has reached its configured discount rule limit.
    #[error("Cart cannot have more than {max} discount rules")]
    TooManyDiscounts { max: usize },

    /// A discount rule raised the running amount.
    ///
    /// ## When This Occurs
    /// ```text
    /// running: $40.00
    ///      │
    ///      ▼
    /// rule.apply($40.00) = $45.00   ← larger than its input
    ///      │
    ///      ▼
    /// InvalidRule { rule: "...", input: $40.00, output: $45.00 }
    /// ```
    #[error("Discount rule '{rule}' returned {output} for input {input}")]
    InvalidRule {
        rule: String,
        input: Money,
        output: Money,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns the coarse category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::ItemNotFound(_) | CoreError::NoMatchingItem { .. } => ErrorKind::NotFound,
            CoreError::InvalidRule { .. } => ErrorKind::InvalidRule,
            CoreError::CartTooLarge { .. }
            | CoreError::TooManyDiscounts { .. }
            | CoreError::Validation(_) => ErrorKind::InvalidInput,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised at the boundary, before the cart or catalog is touched.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., SKU with spaces).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate SKU).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
