//! Cart optimizer
//!
//! Prices every cart line at every store and ranks the stores by what the
//! whole cart would cost there.

use rust_decimal::Decimal;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::{
    cart::CartLineItem,
    catalogue::Catalogue,
    pricing::{PricingError, infer_price},
    stores::{Store, StoreRegistry},
};

/// A cart line priced at one particular store.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedLine {
    /// Id of the cart line
    pub line_item_id: String,

    /// Product name
    pub product_name: String,

    /// Units in the cart
    pub quantity: u32,

    /// Unit price at this store
    pub resolved_unit_price: Decimal,

    /// `true` when the price came from the catalogue, `false` when inferred
    pub is_confirmed: bool,
}

impl PricedLine {
    /// Unit price multiplied by quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the multiplication overflows.
    pub fn line_total(&self) -> Result<Decimal, PricingError> {
        self.resolved_unit_price
            .checked_mul(Decimal::from(self.quantity))
            .ok_or(PricingError::Overflow)
    }
}

/// What the whole cart is estimated to cost at one store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreCostSummary {
    /// Store id
    pub store_id: String,

    /// Store name
    pub store_name: String,

    /// Sum of every line total, confirmed or inferred
    pub total_estimated_cost: Decimal,

    /// Sum of the line totals backed by catalogue records
    pub confirmed_cost: Decimal,

    /// Number of lines (not units) without a catalogue record at this store
    pub unconfirmed_line_count: usize,

    /// Priced lines, in cart order
    pub lines: SmallVec<[PricedLine; 8]>,
}

impl StoreCostSummary {
    fn empty(store: &Store, capacity: usize) -> Self {
        Self {
            store_id: store.id.clone(),
            store_name: store.name.clone(),
            total_estimated_cost: Decimal::ZERO,
            confirmed_cost: Decimal::ZERO,
            unconfirmed_line_count: 0,
            lines: SmallVec::with_capacity(capacity),
        }
    }

    fn push(&mut self, line: PricedLine) -> Result<(), PricingError> {
        let line_total = line.line_total()?;

        self.total_estimated_cost = self
            .total_estimated_cost
            .checked_add(line_total)
            .ok_or(PricingError::Overflow)?;

        if line.is_confirmed {
            self.confirmed_cost = self
                .confirmed_cost
                .checked_add(line_total)
                .ok_or(PricingError::Overflow)?;
        } else {
            self.unconfirmed_line_count += 1;
        }

        self.lines.push(line);

        Ok(())
    }

    /// Lines whose price came from the catalogue.
    pub fn confirmed_lines(&self) -> impl Iterator<Item = &PricedLine> {
        self.lines.iter().filter(|line| line.is_confirmed)
    }

    /// Number of lines priced from the catalogue.
    #[must_use]
    pub fn confirmed_line_count(&self) -> usize {
        self.lines.len().saturating_sub(self.unconfirmed_line_count)
    }

    /// Number of lines in the summary, equal to the number of cart lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Whether every line has a catalogue price at this store.
    #[must_use]
    pub fn is_fully_confirmed(&self) -> bool {
        self.unconfirmed_line_count == 0
    }
}

/// Price the cart at every store and rank the stores by total cost.
///
/// Each line is priced from the catalogue record for its product at the store
/// when one exists, otherwise by inferring from the price it was added at.
/// Summaries are sorted ascending by estimated total; stores with equal totals
/// keep their registry order. An empty cart produces no summaries.
///
/// # Errors
///
/// - [`PricingError::InvalidConfiguration`]: a price had to be inferred with a
///   zero or negative store factor.
/// - [`PricingError::Overflow`]: a price or total did not fit in a decimal.
#[tracing::instrument(skip_all, fields(stores = stores.len(), lines = cart.len()))]
pub fn optimize(
    cart: &[CartLineItem],
    stores: &StoreRegistry,
    catalogue: &Catalogue,
) -> Result<Vec<StoreCostSummary>, PricingError> {
    if cart.is_empty() {
        return Ok(Vec::new());
    }

    let mut summaries = stores
        .iter()
        .map(|store| price_cart_at(cart, store, stores, catalogue))
        .collect::<Result<Vec<_>, _>>()?;

    // Stable: equal totals keep registry order.
    summaries.sort_by(|a, b| a.total_estimated_cost.cmp(&b.total_estimated_cost));

    Ok(summaries)
}

fn price_cart_at(
    cart: &[CartLineItem],
    store: &Store,
    stores: &StoreRegistry,
    catalogue: &Catalogue,
) -> Result<StoreCostSummary, PricingError> {
    let mut summary = StoreCostSummary::empty(store, cart.len());

    for item in cart {
        let (resolved_unit_price, is_confirmed) =
            match catalogue.lookup(&item.product_name, &store.name) {
                Some(record) => (record.resolved_price(), true),
                None => {
                    let estimate = infer_price(
                        stores,
                        &item.origin_store_id,
                        item.origin_unit_price,
                        &store.id,
                    )?;

                    trace!(
                        store = %store.id,
                        product = %item.product_name,
                        %estimate,
                        "inferred price"
                    );

                    (estimate, false)
                }
            };

        summary.push(PricedLine {
            line_item_id: item.id.clone(),
            product_name: item.product_name.clone(),
            quantity: item.quantity,
            resolved_unit_price,
            is_confirmed,
        })?;
    }

    debug!(
        store = %summary.store_id,
        total = %summary.total_estimated_cost,
        confirmed = %summary.confirmed_cost,
        unconfirmed_lines = summary.unconfirmed_line_count,
        "priced cart at store"
    );

    Ok(summary)
}
