//! Catalogue
//!
//! Known shelf prices for products at specific stores. A record found here is
//! a *confirmed* price; anything else has to be inferred.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Errors raised while building a catalogue.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogueError {
    /// More than one record exists for the same product at the same store.
    #[error("duplicate catalogue record for {product} at {store}")]
    DuplicateRecord {
        /// Product name of the duplicated record
        product: String,

        /// Store name of the duplicated record
        store: String,
    },

    /// A normal or promotional price is below zero.
    #[error("negative price for {product} at {store}")]
    NegativePrice {
        /// Product name of the offending record
        product: String,

        /// Store name of the offending record
        store: String,
    },
}

/// A known price for a product at a store.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogueRecord {
    /// Product name
    pub product_name: String,

    /// Store name
    pub store_name: String,

    /// Regular shelf price
    pub normal_price: Decimal,

    /// Promotional price, if one has been published
    pub promo_price: Option<Decimal>,

    /// Whether the promotion is currently running
    pub is_on_promotion: bool,
}

impl CatalogueRecord {
    /// Create a record with a normal price and no promotion.
    pub fn new(
        product_name: impl Into<String>,
        store_name: impl Into<String>,
        normal_price: Decimal,
    ) -> Self {
        Self {
            product_name: product_name.into(),
            store_name: store_name.into(),
            normal_price,
            promo_price: None,
            is_on_promotion: false,
        }
    }

    /// Attach a running promotion at the given price.
    #[must_use]
    pub fn with_promotion(mut self, promo_price: Decimal) -> Self {
        self.promo_price = Some(promo_price);
        self.is_on_promotion = true;
        self
    }

    /// The price a shopper pays today.
    ///
    /// A record flagged as on promotion without a promotional price falls back
    /// to the normal price.
    #[must_use]
    pub fn resolved_price(&self) -> Decimal {
        match (self.is_on_promotion, self.promo_price) {
            (true, Some(promo)) => promo,
            _ => self.normal_price,
        }
    }
}

/// Immutable collection of catalogue records indexed by (product, store).
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    records: Vec<CatalogueRecord>,
    /// product name -> store name -> record position
    index: FxHashMap<String, FxHashMap<String, usize>>,
}

impl Catalogue {
    /// Build a catalogue from the given records.
    ///
    /// # Errors
    ///
    /// - [`CatalogueError::DuplicateRecord`]: two records share a product and store name.
    /// - [`CatalogueError::NegativePrice`]: a normal or promotional price is negative.
    pub fn new(records: impl Into<Vec<CatalogueRecord>>) -> Result<Self, CatalogueError> {
        let records = records.into();
        let mut index = FxHashMap::default();

        for (idx, record) in records.iter().enumerate() {
            let negative_promo = record.promo_price.is_some_and(|p| p < Decimal::ZERO);

            if record.normal_price < Decimal::ZERO || negative_promo {
                return Err(CatalogueError::NegativePrice {
                    product: record.product_name.clone(),
                    store: record.store_name.clone(),
                });
            }

            let by_store: &mut FxHashMap<String, usize> =
                index.entry(record.product_name.clone()).or_default();

            if by_store.insert(record.store_name.clone(), idx).is_some() {
                return Err(CatalogueError::DuplicateRecord {
                    product: record.product_name.clone(),
                    store: record.store_name.clone(),
                });
            }
        }

        Ok(Self { records, index })
    }

    /// Find the record for a product at a store.
    ///
    /// Matching is exact and case-sensitive on both names.
    pub fn lookup(&self, product_name: &str, store_name: &str) -> Option<&CatalogueRecord> {
        self.index
            .get(product_name)
            .and_then(|stores| stores.get(store_name))
            .and_then(|&idx| self.records.get(idx))
    }

    /// Iterate over records in the order they were supplied.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogueRecord> {
        self.records.iter()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the catalogue has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
