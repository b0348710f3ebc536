//! Stores

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use thiserror::Error;

/// Errors related to store registry construction.
#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    /// Two stores were registered with the same id.
    #[error("store id {0} is registered more than once")]
    DuplicateStore(String),
}

/// A store that offers can be priced at.
#[derive(Debug, Clone, PartialEq)]
pub struct Store {
    /// Unique store id
    pub id: String,

    /// Display name, also used to match catalogue records
    pub name: String,

    /// General price level relative to a baseline store priced at 1.0
    pub price_factor: Decimal,
}

impl Store {
    /// Create a new store.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price_factor: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price_factor,
        }
    }

    /// Whether the price factor can be used to scale prices.
    #[must_use]
    pub fn has_valid_factor(&self) -> bool {
        self.price_factor > Decimal::ZERO
    }
}

/// Ordered, immutable set of stores.
///
/// Registration order is significant: the optimizer uses it to break ties
/// between stores with equal totals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreRegistry {
    stores: Vec<Store>,
}

impl StoreRegistry {
    /// Create a registry from the given stores, keeping their order.
    ///
    /// Price factors are not validated here; a non-positive factor is only
    /// reported when a price has to be inferred with it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateStore`] if two stores share an id.
    pub fn new(stores: impl Into<Vec<Store>>) -> Result<Self, StoreError> {
        let stores = stores.into();
        let mut seen = FxHashSet::default();

        for store in &stores {
            if !seen.insert(store.id.as_str()) {
                return Err(StoreError::DuplicateStore(store.id.clone()));
            }
        }

        Ok(Self { stores })
    }

    /// Find a store by id.
    pub fn get(&self, id: &str) -> Option<&Store> {
        self.stores.iter().find(|store| store.id == id)
    }

    /// Price factor for the given store id, if the store is registered.
    pub fn price_factor(&self, id: &str) -> Option<Decimal> {
        self.get(id).map(|store| store.price_factor)
    }

    /// Iterate over the stores in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Store> {
        self.stores.iter()
    }

    /// Number of registered stores.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// Check if the registry has no stores.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}
