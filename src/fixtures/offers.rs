//! Offer Fixtures

use rusty_money::iso::Currency;
use serde::Deserialize;

use crate::{
    fixtures::{FixtureError, prices::parse_price},
    offers::Offer,
};

/// Wrapper for offers in YAML
#[derive(Debug, Deserialize)]
pub struct OffersFixture {
    /// Offers, in search result order
    pub offers: Vec<OfferFixture>,
}

/// Offer Fixture
#[derive(Debug, Deserialize)]
pub struct OfferFixture {
    /// Offer id
    pub id: String,

    /// Product name
    pub product: String,

    /// Id of the store the offer is from
    pub store: String,

    /// Unit price (e.g., "2.50 GBP")
    pub price: String,
}

impl OfferFixture {
    /// Convert into an offer, returning the currency of its price.
    ///
    /// # Errors
    ///
    /// Returns an error if the price can't be parsed.
    pub fn try_into_offer(self) -> Result<(Offer, &'static Currency), FixtureError> {
        let (unit_price, currency) = parse_price(&self.price)?;

        Ok((
            Offer::new(self.id, self.product, self.store, unit_price),
            currency,
        ))
    }
}
