//! Fixtures
//!
//! YAML configuration for stores, catalogue records, searchable offers and
//! saved carts. Each kind lives in its own directory under the base path, one
//! file per fixture set: `stores/<set>.yml`, `catalogue/<set>.yml`,
//! `offers/<set>.yml` and `carts/<set>.yml`.

use std::{fs, path::PathBuf};

use rusty_money::iso::{self, Currency};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::{
    cart::{Cart, CartError, CartLineItem},
    catalogue::{Catalogue, CatalogueError},
    comparison::Comparison,
    fixtures::{
        carts::CartFixture, catalogue::CatalogueFixture, offers::OffersFixture,
        stores::StoresFixture,
    },
    offers::StaticOfferSource,
    pricing::PricingError,
    stores::{Store, StoreError, StoreRegistry},
};

pub mod carts;
pub mod catalogue;
pub mod offers;
pub mod prices;
pub mod stores;

/// Currency reported for an empty cart when the set has no prices
const EMPTY_SET_CURRENCY: &Currency = iso::GBP;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid price factor
    #[error("Invalid price factor: {0}")]
    InvalidFactor(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between prices in the set
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No prices loaded yet
    #[error("No prices loaded yet; currency unknown")]
    NoCurrency,

    /// A cart line references an offer that wasn't loaded
    #[error("Offer not found: {0}")]
    OfferNotFound(String),

    /// Store registry error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Catalogue error
    #[error(transparent)]
    Catalogue(#[from] CatalogueError),

    /// Cart error
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Pricing error while comparing the fixture cart
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// A loaded fixture set.
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    stores: StoreRegistry,
    catalogue: Catalogue,
    offers: StaticOfferSource,
    cart: Cart,

    /// Currency shared by every price in the set
    currency: Option<&'static Currency>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            stores: StoreRegistry::default(),
            catalogue: Catalogue::default(),
            offers: StaticOfferSource::default(),
            cart: Cart::new(),
            currency: None,
        }
    }

    /// Load a complete fixture set (stores, catalogue, offers and cart with the same name)
    /// from the default base path
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_set_in("./fixtures", name)
    }

    /// Load a complete fixture set from a custom base path
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set_in(base_path: impl Into<PathBuf>, name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::with_base_path(base_path);

        fixture
            .load_stores(name)?
            .load_catalogue(name)?
            .load_offers(name)?
            .load_cart(name)?;

        Ok(fixture)
    }

    /// Load the store registry from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, a factor is
    /// malformed, or two stores share an id.
    pub fn load_stores(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: StoresFixture = self.read("stores", name)?;

        let stores = fixture
            .stores
            .into_iter()
            .map(Store::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        self.stores = StoreRegistry::new(stores)?;

        debug!(set = name, stores = self.stores.len(), "loaded stores");

        Ok(self)
    }

    /// Load catalogue records from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, a price is
    /// malformed or in another currency, or the catalogue rejects the records.
    pub fn load_catalogue(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: CatalogueFixture = self.read("catalogue", name)?;
        let mut records = Vec::with_capacity(fixture.records.len());

        for record_fixture in fixture.records {
            let (record, currency) = record_fixture.try_into_record()?;

            self.check_currency(currency)?;
            records.push(record);
        }

        self.catalogue = Catalogue::new(records)?;

        debug!(set = name, records = self.catalogue.len(), "loaded catalogue");

        Ok(self)
    }

    /// Load searchable offers from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a price is
    /// malformed or in another currency.
    pub fn load_offers(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: OffersFixture = self.read("offers", name)?;
        let mut offers = Vec::with_capacity(fixture.offers.len());

        for offer_fixture in fixture.offers {
            let (offer, currency) = offer_fixture.try_into_offer()?;

            self.check_currency(currency)?;
            offers.push(offer);
        }

        debug!(set = name, offers = offers.len(), "loaded offers");

        self.offers = StaticOfferSource::new(offers);

        Ok(self)
    }

    /// Load a saved cart from a YAML fixture file
    ///
    /// Lines reference offers by id, so offers must be loaded first.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, a line references
    /// an unknown offer, or the cart rejects the lines.
    pub fn load_cart(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: CartFixture = self.read("carts", name)?;
        let mut lines = Vec::with_capacity(fixture.lines.len());

        for line in fixture.lines {
            let offer = self
                .offers
                .get(&line.offer)
                .ok_or_else(|| FixtureError::OfferNotFound(line.offer.clone()))?;

            lines.push(CartLineItem::from_offer(offer.clone()).with_quantity(line.quantity));
        }

        self.cart = Cart::with_lines(lines)?;

        debug!(set = name, lines = self.cart.len(), "loaded cart");

        Ok(self)
    }

    /// Compare the loaded cart across the loaded stores.
    ///
    /// An empty cart compares to nothing, even when the set has no prices.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart has lines but no prices were loaded, or a
    /// price can't be inferred.
    pub fn comparison(&self) -> Result<Comparison, FixtureError> {
        if self.cart.is_empty() {
            return Ok(Comparison::new(
                Vec::new(),
                self.currency.unwrap_or(EMPTY_SET_CURRENCY),
            ));
        }

        let currency = self.currency()?;

        Ok(Comparison::compute(
            &self.cart,
            &self.stores,
            &self.catalogue,
            currency,
        )?)
    }

    /// Get the store registry
    pub fn stores(&self) -> &StoreRegistry {
        &self.stores
    }

    /// Get the catalogue
    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    /// Get the searchable offers
    pub fn offers(&self) -> &StaticOfferSource {
        &self.offers
    }

    /// Get the saved cart
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Get the saved cart, mutably
    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no prices have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }

    fn read<T: DeserializeOwned>(&self, category: &str, name: &str) -> Result<T, FixtureError> {
        let file_path = self.base_path.join(category).join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        Ok(serde_norway::from_str(&contents)?)
    }

    fn check_currency(&mut self, currency: &'static Currency) -> Result<(), FixtureError> {
        match self.currency {
            Some(existing) if existing != currency => Err(FixtureError::CurrencyMismatch(
                existing.iso_alpha_code.to_string(),
                currency.iso_alpha_code.to_string(),
            )),
            Some(_) => Ok(()),
            None => {
                self.currency = Some(currency);
                Ok(())
            }
        }
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
