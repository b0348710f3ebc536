//! Integration tests for cart optimization

use rust_decimal::Decimal;
use testresult::TestResult;

use pricewise::{
    cart::{Cart, CartLineItem},
    catalogue::{Catalogue, CatalogueRecord},
    offers::Offer,
    optimizer::optimize,
    pricing::{PricingError, infer_price},
    stores::{Store, StoreRegistry},
};

fn stores() -> TestResult<StoreRegistry> {
    Ok(StoreRegistry::new([
        Store::new("greenfield", "Greenfield Market", Decimal::ONE),
        Store::new("valuemart", "ValueMart", Decimal::new(94, 2)),
        Store::new("corner-grocer", "Corner Grocer", Decimal::new(108, 2)),
        Store::new("freshco", "FreshCo", Decimal::new(103, 2)),
    ])?)
}

fn catalogue() -> TestResult<Catalogue> {
    Ok(Catalogue::new([
        CatalogueRecord::new("Rice", "ValueMart", Decimal::new(235, 2))
            .with_promotion(Decimal::new(199, 2)),
        CatalogueRecord::new("Milk", "Corner Grocer", Decimal::new(160, 2)),
        CatalogueRecord {
            product_name: "Eggs".to_string(),
            store_name: "FreshCo".to_string(),
            normal_price: Decimal::new(220, 2),
            promo_price: Some(Decimal::new(150, 2)),
            is_on_promotion: false,
        },
    ])?)
}

fn cart() -> TestResult<Cart> {
    let mut cart = Cart::new();

    cart.add_item(Offer::new("rice", "Rice", "greenfield", Decimal::new(250, 2)))?;
    cart.add_item(Offer::new("rice", "Rice", "greenfield", Decimal::new(250, 2)))?;
    cart.add_item(Offer::new("milk", "Milk", "valuemart", Decimal::new(141, 2)))?;
    cart.add_item(Offer::new("eggs", "Eggs", "freshco", Decimal::new(206, 2)))?;
    cart.add_item(Offer::new("tea", "Tea", "nowhere", Decimal::new(300, 2)))?;

    Ok(cart)
}

#[test]
fn totals_are_sums_of_line_totals() -> TestResult {
    let summaries = optimize(cart()?.lines(), &stores()?, &catalogue()?)?;

    for summary in &summaries {
        let mut total = Decimal::ZERO;
        let mut confirmed = Decimal::ZERO;

        for line in &summary.lines {
            let line_total = line.resolved_unit_price * Decimal::from(line.quantity);

            total += line_total;

            if line.is_confirmed {
                confirmed += line_total;
            }
        }

        assert_eq!(summary.total_estimated_cost, total);
        assert_eq!(summary.confirmed_cost, confirmed);
    }

    Ok(())
}

#[test]
fn every_summary_has_every_line_in_cart_order() -> TestResult {
    let cart = cart()?;
    let summaries = optimize(cart.lines(), &stores()?, &catalogue()?)?;

    assert_eq!(summaries.len(), 4);

    for summary in &summaries {
        let ids: Vec<&str> = summary
            .lines
            .iter()
            .map(|line| line.line_item_id.as_str())
            .collect();

        assert_eq!(ids, vec!["rice", "milk", "eggs", "tea"]);
    }

    Ok(())
}

#[test]
fn summaries_are_ranked_cheapest_first() -> TestResult {
    let summaries = optimize(cart()?.lines(), &stores()?, &catalogue()?)?;

    assert!(
        summaries
            .windows(2)
            .all(|pair| matches!(pair, [a, b] if a.total_estimated_cost <= b.total_estimated_cost))
    );

    Ok(())
}

#[test]
fn equal_totals_keep_registry_order() -> TestResult {
    let stores = StoreRegistry::new([
        Store::new("first", "First", Decimal::ONE),
        Store::new("cheap", "Cheap", Decimal::new(90, 2)),
        Store::new("second", "Second", Decimal::ONE),
        Store::new("third", "Third", Decimal::ONE),
    ])?;

    let cart = Cart::with_lines([CartLineItem::from_offer(Offer::new(
        "bread",
        "Bread",
        "first",
        Decimal::new(100, 2),
    ))])?;

    let summaries = optimize(cart.lines(), &stores, &Catalogue::default())?;
    let order: Vec<&str> = summaries.iter().map(|s| s.store_id.as_str()).collect();

    assert_eq!(order, vec!["cheap", "first", "second", "third"]);

    Ok(())
}

#[test]
fn catalogue_prices_resolve_promotions() -> TestResult {
    let summaries = optimize(cart()?.lines(), &stores()?, &catalogue()?)?;

    let valuemart = summaries
        .iter()
        .find(|s| s.store_id == "valuemart")
        .ok_or("missing valuemart")?;
    let rice = valuemart.lines.first().ok_or("missing rice line")?;

    assert!(rice.is_confirmed);
    assert_eq!(rice.resolved_unit_price, Decimal::new(199, 2));
    assert_eq!(rice.quantity, 2);

    let freshco = summaries
        .iter()
        .find(|s| s.store_id == "freshco")
        .ok_or("missing freshco")?;
    let eggs = freshco.lines.get(2).ok_or("missing eggs line")?;

    // Promo price is ignored while the promotion isn't running
    assert!(eggs.is_confirmed);
    assert_eq!(eggs.resolved_unit_price, Decimal::new(220, 2));

    Ok(())
}

#[test]
fn missing_records_fall_back_to_inference() -> TestResult {
    let stores = stores()?;
    let summaries = optimize(cart()?.lines(), &stores, &catalogue()?)?;

    let corner = summaries
        .iter()
        .find(|s| s.store_id == "corner-grocer")
        .ok_or("missing corner grocer")?;

    let milk = corner.lines.get(1).ok_or("missing milk line")?;
    let eggs = corner.lines.get(2).ok_or("missing eggs line")?;
    let tea = corner.lines.get(3).ok_or("missing tea line")?;

    assert!(milk.is_confirmed);
    assert!(!eggs.is_confirmed);
    assert_eq!(
        eggs.resolved_unit_price,
        infer_price(&stores, "freshco", Decimal::new(206, 2), "corner-grocer")?
    );

    // Unknown origin store counts as factor 1.0
    assert!(!tea.is_confirmed);
    assert_eq!(tea.resolved_unit_price, Decimal::new(324, 2));
    assert_eq!(corner.unconfirmed_line_count, 3);

    Ok(())
}

#[test]
fn empty_cart_produces_no_summaries() -> TestResult {
    let summaries = optimize(&[], &stores()?, &catalogue()?)?;

    assert!(summaries.is_empty());

    Ok(())
}

#[test]
fn degenerate_factor_fails_inference() -> TestResult {
    let stores = StoreRegistry::new([
        Store::new("a", "A", Decimal::ONE),
        Store::new("broken", "Broken", Decimal::ZERO),
    ])?;

    let cart = Cart::with_lines([CartLineItem::from_offer(Offer::new(
        "rice",
        "Rice",
        "a",
        Decimal::new(1000, 2),
    ))])?;

    let result = optimize(cart.lines(), &stores, &Catalogue::default());

    assert!(matches!(
        result,
        Err(PricingError::InvalidConfiguration { store_id, .. }) if store_id == "broken"
    ));

    Ok(())
}

#[test]
fn cart_mutations_are_reflected_in_the_next_optimization() -> TestResult {
    let stores = stores()?;
    let catalogue = catalogue()?;
    let mut cart = cart()?;

    let before = optimize(cart.lines(), &stores, &catalogue)?;

    cart.decrement_item("rice")?;
    cart.remove_item("tea")?;

    let after = optimize(cart.lines(), &stores, &catalogue)?;

    assert!(after.iter().all(|summary| summary.lines.len() == 3));

    for summary in &after {
        let previous = before
            .iter()
            .find(|s| s.store_id == summary.store_id)
            .ok_or("store missing from previous run")?;

        assert!(summary.total_estimated_cost < previous.total_estimated_cost);
    }

    cart.clear();

    assert!(optimize(cart.lines(), &stores, &catalogue)?.is_empty());

    Ok(())
}
