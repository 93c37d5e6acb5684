//! # Product Catalog
//!
//! An in-memory product list with name search, used to pick what goes into
//! a cart.
//!
//! ## Search Flow
//! ```text
//! query "  NIKE "
//!      │
//!      ▼
//! validate_search_query() ──► "NIKE" (trimmed, ≤ 100 chars)
//!      │
//!      ▼
//! lowercase, substring match on product name
//!      │
//!      ▼
//! [Nike Shoes]  (insertion order)
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::{validate_item_name, validate_price, validate_search_query, validate_sku};

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Stock Keeping Unit - business identifier.
    pub sku: String,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Money,
}

impl Product {
    /// Creates a validated product.
    ///
    /// ## Errors
    /// `Validation` if the SKU, name or price is invalid.
    pub fn new(sku: &str, name: &str, price: Money) -> CoreResult<Self> {
        validate_sku(sku)?;
        let name = validate_item_name(name)?;
        validate_price(price)?;

        Ok(Product {
            sku: sku.trim().to_string(),
            name,
            price,
        })
    }
}

/// Products in insertion order, unique by SKU.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a product.
    ///
    /// ## Errors
    /// `Validation(Duplicate)` if a product with the same SKU exists.
    pub fn insert(&mut self, product: Product) -> CoreResult<()> {
        if self.get_by_sku(&product.sku).is_some() {
            return Err(ValidationError::Duplicate {
                field: "sku".to_string(),
                value: product.sku,
            }
            .into());
        }

        debug!(sku = %product.sku, "Inserting product");
        self.products.push(product);
        Ok(())
    }

    /// Finds a product by SKU (exact match).
    pub fn get_by_sku(&self, sku: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.sku == sku)
    }

    /// Returns products whose name contains `query`, ignoring case.
    ///
    /// An empty query matches everything.
    ///
    /// ## Errors
    /// `Validation(TooLong)` if the query exceeds 100 characters.
    pub fn search(&self, query: &str) -> CoreResult<Vec<&Product>> {
        let needle = validate_search_query(query)?.to_lowercase();

        let results: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect();

        debug!(query = %needle, count = results.len(), "Search returned products");
        Ok(results)
    }

    /// All products in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Checks if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
