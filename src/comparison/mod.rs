//! Comparison
//!
//! Ranked per-store summaries for a cart, plus the questions a shopper asks of
//! them: where is cheapest, and how much does going there save.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::iso::Currency;

use crate::{
    cart::Cart,
    catalogue::Catalogue,
    optimizer::{StoreCostSummary, optimize},
    pricing::PricingError,
    stores::StoreRegistry,
};

pub mod table;

pub use table::ReportError;

/// Stores ranked by what the cart would cost at each, cheapest first.
#[derive(Debug, Clone)]
pub struct Comparison {
    summaries: Vec<StoreCostSummary>,
    currency: &'static Currency,
}

impl Comparison {
    /// Wrap already-ranked summaries.
    pub fn new(summaries: Vec<StoreCostSummary>, currency: &'static Currency) -> Self {
        Self {
            summaries,
            currency,
        }
    }

    /// Price the cart at every store and rank the results.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if a price could not be inferred.
    pub fn compute(
        cart: &Cart,
        stores: &StoreRegistry,
        catalogue: &Catalogue,
        currency: &'static Currency,
    ) -> Result<Self, PricingError> {
        let summaries = optimize(cart.lines(), stores, catalogue)?;

        Ok(Self::new(summaries, currency))
    }

    /// The store where the cart is cheapest.
    pub fn cheapest(&self) -> Option<&StoreCostSummary> {
        self.summaries.first()
    }

    /// The store where the cart is most expensive.
    pub fn most_expensive(&self) -> Option<&StoreCostSummary> {
        self.summaries.last()
    }

    /// How much is saved by shopping at the cheapest store instead of the
    /// most expensive one.
    #[must_use]
    pub fn savings(&self) -> Decimal {
        match (self.cheapest(), self.most_expensive()) {
            (Some(cheapest), Some(priciest)) => {
                priciest.total_estimated_cost - cheapest.total_estimated_cost
            }
            _ => Decimal::ZERO,
        }
    }

    /// Savings as a fraction of the most expensive total.
    #[must_use]
    pub fn savings_percent(&self) -> Percentage {
        let priciest = self
            .most_expensive()
            .map_or(Decimal::ZERO, |summary| summary.total_estimated_cost);

        if priciest.is_zero() {
            return Percentage::from(0.0);
        }

        Percentage::from(self.savings() / priciest)
    }

    /// The summary for a given store id.
    pub fn summary_for(&self, store_id: &str) -> Option<&StoreCostSummary> {
        self.summaries
            .iter()
            .find(|summary| summary.store_id == store_id)
    }

    /// Ranked summaries, cheapest first.
    #[must_use]
    pub fn summaries(&self) -> &[StoreCostSummary] {
        &self.summaries
    }

    /// Iterate over the ranked summaries, cheapest first.
    pub fn iter(&self) -> impl Iterator<Item = &StoreCostSummary> {
        self.summaries.iter()
    }

    /// Number of stores compared.
    #[must_use]
    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    /// Check if nothing was compared, e.g. because the cart was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    /// Currency all amounts are expressed in.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
