//! # Ledger Demo Entry Point
//!
//! Runs the cart ledger through two scenarios and prints the result.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize tracing (RUST_LOG, default info,ledger=debug)            │
//! │  2. LedgerConfig::from_env()                                            │
//! │  3. Catalog scenario: list products, search "nike"                      │
//! │  4. Invoice scenario: Widget 1/2/3, discount rules from                 │
//! │     LEDGER_DISCOUNTS (JSON) or the "$10 off per $10" band               │
//! │  5. Print summary as text or JSON (LEDGER_OUTPUT)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ledger_core::{
    Cart, CartSummary, Catalog, DiscountSpec, LedgerConfig, Money, NewItem, Product,
};

/// How the final summary is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn parse(value: Option<&str>) -> Result<Self> {
        match value.map(str::trim) {
            None | Some("") | Some("text") => Ok(OutputFormat::Text),
            Some("json") => Ok(OutputFormat::Json),
            Some(other) => bail!("LEDGER_OUTPUT must be 'text' or 'json', got '{other}'"),
        }
    }
}

fn main() -> Result<()> {
    init_tracing();

    info!("Starting cart ledger demo");

    let config = LedgerConfig::from_env();
    let format = OutputFormat::parse(std::env::var("LEDGER_OUTPUT").ok().as_deref())?;
    let specs = parse_discounts(std::env::var("LEDGER_DISCOUNTS").ok().as_deref())?;

    run_catalog_scenario()?;
    let summary = run_invoice_scenario(&config, specs)?;

    match format {
        OutputFormat::Text => print!("{}", summary.render(&config)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=ledger_core=trace` - Trace the core crate only
/// - Default: INFO, DEBUG for ledger crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,ledger_core=debug,ledger_demo=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Reads discount specs from JSON, defaulting to "$10 off per $10 spent".
fn parse_discounts(raw: Option<&str>) -> Result<Vec<DiscountSpec>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(vec![DiscountSpec::SpendBand {
            step: Money::from_dollars(10),
            off_per_step: Money::from_dollars(10),
        }]),
        Some(json) => serde_json::from_str(json).context("LEDGER_DISCOUNTS is not a valid rule list"),
    }
}

/// Lists a small marketplace catalog and logs a name search.
fn run_catalog_scenario() -> Result<()> {
    let mut catalog = Catalog::new();
    for (sku, name, cents) in [
        ("NIKE-SHOES", "Nike Shoes", 9999),
        ("APPLE-IPHONE", "Apple iPhone", 79999),
        ("SAMSUNG-TV", "Samsung TV", 59999),
    ] {
        catalog.insert(Product::new(sku, name, Money::from_cents(cents))?)?;
    }

    let mut cart = Cart::new();
    for sku in ["NIKE-SHOES", "APPLE-IPHONE"] {
        let product = catalog
            .get_by_sku(sku)
            .with_context(|| format!("product {sku} missing from catalog"))?;
        cart.add_item(NewItem::from(product))?;
    }
    info!(items = cart.len(), total = %cart.total_price(), "Marketplace cart");

    for product in catalog.search("nike")? {
        info!(sku = %product.sku, name = %product.name, price = %product.price, "Search hit");
    }

    Ok(())
}

/// Builds the widget cart, applies the rules and summarizes it.
fn run_invoice_scenario(config: &LedgerConfig, specs: Vec<DiscountSpec>) -> Result<CartSummary> {
    let mut cart = Cart::with_config(config.clone());

    for (name, dollars) in [("Widget 1", 50), ("Widget 2", 30), ("Widget 3", 20)] {
        cart.add_item(NewItem::new(name, Money::from_dollars(dollars)))?;
    }

    for spec in specs {
        cart.apply_spec(spec)?;
    }

    let summary = cart.generate_summary()?;
    info!(
        total = %summary.total,
        discounted = %summary.discounted,
        discounts = summary.discount_count,
        "Invoice ready"
    );

    Ok(summary)
}
