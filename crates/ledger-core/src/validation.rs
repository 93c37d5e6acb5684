//! # Validation Module
//!
//! Input validation for everything that crosses into the ledger.
//!
//! ## Where Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Points                                  │
//! │                                                                         │
//! │  Cart::add_item(NewItem) ──────► validate_new_item()                   │
//! │                                                                         │
//! │  Cart::apply_discount(rule) ───► DiscountRule::validate()              │
//! │                                   └── validate_rate(), validate_amount()│
//! │                                                                         │
//! │  Product::new(..) ─────────────► validate_sku(), validate_item_name()  │
//! │                                                                         │
//! │  Catalog::search(query) ───────► validate_search_query()               │
//! │                                                                         │
//! │  Every check runs BEFORE state changes, so a rejected call leaves the  │
//! │  cart exactly as it was.                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{DiscountRate, NewItem};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of an item or product name.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length of a SKU.
pub const MAX_SKU_LEN: usize = 50;

/// Maximum length of a catalog search query.
pub const MAX_QUERY_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item or product name.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - Must be at most 200 characters
///
/// ## Returns
/// The trimmed name.
///
/// ## Example
/// ```rust
/// use ledger_core::validation::validate_item_name;
///
/// assert_eq!(validate_item_name("  Widget 1 ").unwrap(), "Widget 1");
/// assert!(validate_item_name("").is_err());
/// ```
pub fn validate_item_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
/// - Only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use ledger_core::validation::validate_sku;
///
/// assert!(validate_sku("NIKE-SHOES").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("has space").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.len() > MAX_SKU_LEN {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: MAX_SKU_LEN,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (matches everything)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

/// Validates a rule label.
pub fn validate_label(label: &str) -> ValidationResult<()> {
    if label.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "label".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use ledger_core::money::Money;
/// use ledger_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_cents(-100)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    validate_amount("price", price)
}

/// Validates that a named monetary parameter is not negative.
pub fn validate_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates that a named monetary parameter is strictly positive.
pub fn validate_positive_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a discount rate.
///
/// ## Rules
/// - Must be between 0 and 10000 bps (0% to 100%)
pub fn validate_rate(rate: DiscountRate) -> ValidationResult<()> {
    if rate.bps() > DiscountRate::FULL_BPS {
        return Err(ValidationError::OutOfRange {
            field: "rate".to_string(),
            min: 0,
            max: i64::from(DiscountRate::FULL_BPS),
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates a caller draft and returns its parts.
///
/// ## Rules
/// ```text
/// NewItem { name, price }
///      │
///      ├── name missing/blank? ─► Required { field: "name" }
///      ├── name > 200 chars?  ──► TooLong  { field: "name" }
///      ├── price missing? ──────► Required { field: "price" }
///      ├── price < 0? ──────────► MustNotBeNegative { field: "price" }
///      │
///      └── OK ─► (trimmed name, price)
/// ```
pub fn validate_new_item(item: &NewItem) -> ValidationResult<(String, Money)> {
    let name = validate_item_name(item.name.as_deref().unwrap_or_default())?;

    let price = item.price.ok_or_else(|| ValidationError::Required {
        field: "price".to_string(),
    })?;
    validate_price(price)?;

    Ok((name, price))
}

// =============================================================================
// Unit Tests
// =============================================================================
