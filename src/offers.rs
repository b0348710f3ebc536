//! Offers
//!
//! An offer is a priced product at one store, as returned by a product search.
//! Searching is delegated to an [`OfferSource`]; the engine only consumes the
//! offers it returns.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors reported by an offer source.
#[derive(Debug, Error)]
pub enum OfferSourceError {
    /// The source could not be reached or did not answer in time.
    #[error("offer source unavailable: {0}")]
    Unavailable(String),

    /// The source answered with something that could not be understood.
    #[error("malformed offer response: {0}")]
    Malformed(String),
}

/// A priced instance of a product at a specific store.
#[derive(Debug, Clone, PartialEq)]
pub struct Offer {
    /// Offer id, the identity of a cart line
    pub id: String,

    /// Product name
    pub product_name: String,

    /// Id of the store the price was seen at
    pub store_id: String,

    /// Price of a single unit at that store
    pub unit_price: Decimal,
}

impl Offer {
    /// Create a new offer.
    pub fn new(
        id: impl Into<String>,
        product_name: impl Into<String>,
        store_id: impl Into<String>,
        unit_price: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            product_name: product_name.into(),
            store_id: store_id.into(),
            unit_price,
        }
    }
}

/// Something that can turn a search query into offers.
pub trait OfferSource {
    /// Search for offers matching the query.
    ///
    /// # Errors
    ///
    /// Returns an [`OfferSourceError`] if the search could not be completed.
    fn search(&self, query: &str) -> Result<Vec<Offer>, OfferSourceError>;
}

/// Search the given source, treating any failure as "no offers".
///
/// A failed search must never stop a comparison of the cart the shopper
/// already has, so the error is logged and swallowed here.
pub fn search_or_empty(source: &impl OfferSource, query: &str) -> Vec<Offer> {
    match source.search(query) {
        Ok(offers) => {
            debug!(query, count = offers.len(), "offer search completed");
            offers
        }
        Err(err) => {
            warn!(query, error = %err, "offer search failed, continuing without offers");
            Vec::new()
        }
    }
}

/// In-memory offer source backed by a fixed list of offers.
#[derive(Debug, Clone, Default)]
pub struct StaticOfferSource {
    offers: Vec<Offer>,
}

impl StaticOfferSource {
    /// Create a source from a list of offers.
    pub fn new(offers: impl Into<Vec<Offer>>) -> Self {
        Self {
            offers: offers.into(),
        }
    }

    /// Find an offer by its id.
    pub fn get(&self, id: &str) -> Option<&Offer> {
        self.offers.iter().find(|offer| offer.id == id)
    }

    /// Iterate over all offers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Offer> {
        self.offers.iter()
    }
}

impl OfferSource for StaticOfferSource {
    /// Offers whose product name contains the query, ignoring case.
    ///
    /// A blank query matches nothing.
    fn search(&self, query: &str) -> Result<Vec<Offer>, OfferSourceError> {
        let needle = query.trim().to_lowercase();

        if needle.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self
            .offers
            .iter()
            .filter(|offer| offer.product_name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn test_source() -> StaticOfferSource {
        StaticOfferSource::new([
            Offer::new("rice-gf", "Basmati Rice 1kg", "greenfield", Decimal::new(250, 2)),
            Offer::new("milk-vm", "Whole Milk 2L", "valuemart", Decimal::new(145, 2)),
            Offer::new("rice-vm", "Long Grain Rice 1kg", "valuemart", Decimal::new(199, 2)),
        ])
    }

    struct FailingSource;

    impl OfferSource for FailingSource {
        fn search(&self, _query: &str) -> Result<Vec<Offer>, OfferSourceError> {
            Err(OfferSourceError::Unavailable("timed out".to_string()))
        }
    }

    #[test]
    fn search_matches_product_names_case_insensitively() -> TestResult {
        let offers = test_source().search("RICE")?;

        let ids: Vec<&str> = offers.iter().map(|offer| offer.id.as_str()).collect();

        assert_eq!(ids, vec!["rice-gf", "rice-vm"]);

        Ok(())
    }

    #[test]
    fn search_with_blank_query_returns_nothing() -> TestResult {
        assert!(test_source().search("   ")?.is_empty());

        Ok(())
    }

    #[test]
    fn search_without_matches_returns_nothing() -> TestResult {
        assert!(test_source().search("caviar")?.is_empty());

        Ok(())
    }

    #[test]
    fn search_or_empty_passes_offers_through() {
        let offers = search_or_empty(&test_source(), "milk");

        assert_eq!(offers.len(), 1);
    }

    #[test]
    fn search_or_empty_swallows_failures() {
        let offers = search_or_empty(&FailingSource, "milk");

        assert!(offers.is_empty());
    }

    #[test]
    fn get_finds_offer_by_id() {
        let source = test_source();

        assert_eq!(
            source.get("milk-vm").map(|offer| offer.store_id.as_str()),
            Some("valuemart")
        );
        assert!(source.get("missing").is_none());
    }
}
