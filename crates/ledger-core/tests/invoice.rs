//! End-to-end ledger scenarios.

use ledger_core::{
    Cart, Catalog, DiscountSpec, ErrorKind, LedgerConfig, Money, NewItem, Product, SpendBand,
};

#[test]
fn widget_invoice_with_banding_discount() {
    let mut cart = Cart::new();
    cart.add_item(NewItem::new("Widget 1", Money::from_dollars(50)))
        .unwrap();
    cart.add_item(NewItem::new("Widget 2", Money::from_dollars(30)))
        .unwrap();
    cart.add_item(NewItem::new("Widget 3", Money::from_dollars(20)))
        .unwrap();
    assert_eq!(cart.total_price(), Money::from_dollars(100));

    cart.apply_discount(SpendBand::new(Money::from_dollars(10), Money::from_dollars(10)))
        .unwrap();

    let summary = cart.generate_summary().unwrap();
    assert_eq!(summary.item_count, 3);
    assert_eq!(summary.total, Money::from_dollars(100));
    assert_eq!(summary.discounted, Money::zero());
    assert_eq!(summary.discount_count, 1);

    let invoice = summary.to_string();
    assert!(invoice.starts_with("=== Invoice ===\nItems: 3\n"));
    assert!(invoice.contains("Total Price: $100.00"));
    assert!(invoice.contains("Discounted Price: $0.00"));
    assert!(invoice.contains("Discounts Applied: 1"));
}

#[test]
fn empty_cart_summary() {
    let cart = Cart::new();
    let summary = cart.generate_summary().unwrap();

    assert_eq!(summary.item_count, 0);
    assert_eq!(summary.total, Money::zero());
    assert_eq!(summary.discounted, Money::zero());
    assert_eq!(summary.discount_count, 0);
}

#[test]
fn item_missing_price_is_rejected() {
    let mut cart = Cart::new();
    cart.add_item(NewItem::new("Widget 1", Money::from_dollars(50)))
        .unwrap();

    let draft: NewItem = serde_json::from_str(r#"{"name": "Widget 2"}"#).unwrap();
    let err = cart.add_item(draft).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(cart.len(), 1);
}

#[test]
fn rules_loaded_from_json() {
    let specs: Vec<DiscountSpec> = serde_json::from_str(
        r#"[{"kind": "percentage_off", "bps": 2000}, {"kind": "fixed_amount_off", "amount": 1000}]"#,
    )
    .unwrap();

    let mut cart = Cart::with_config(LedgerConfig::default());
    cart.add_item(NewItem::new("Jacket", Money::from_dollars(150)))
        .unwrap();
    for spec in specs {
        cart.apply_spec(spec).unwrap();
    }

    // $150 → 20% off → $120 → $10 off → $110
    assert_eq!(cart.discounted_price().unwrap(), Money::from_dollars(110));
    assert_eq!(
        cart.discount_labels(),
        vec!["20% off".to_string(), "$10.00 off".to_string()]
    );
}

#[test]
fn catalog_search_feeds_cart() {
    let mut catalog = Catalog::new();
    catalog
        .insert(Product::new("NIKE-SHOES", "Nike Shoes", Money::from_cents(9999)).unwrap())
        .unwrap();
    catalog
        .insert(Product::new("IPHONE", "Apple iPhone", Money::from_cents(79999)).unwrap())
        .unwrap();

    let mut cart = Cart::new();
    for product in catalog.search("").unwrap() {
        cart.add_item(NewItem::from(product)).unwrap();
    }
    assert_eq!(cart.total_price(), Money::from_cents(89998));

    let hits = catalog.search("nike").unwrap();
    assert_eq!(hits.len(), 1);
    let removed = cart.remove_matching(&hits[0].name, hits[0].price).unwrap();
    assert_eq!(removed.name(), "Nike Shoes");
    assert_eq!(cart.total_price(), Money::from_cents(79999));
}
