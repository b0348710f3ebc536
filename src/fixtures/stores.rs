//! Store Fixtures

use serde::Deserialize;

use crate::{
    fixtures::{FixtureError, prices::parse_factor},
    stores::Store,
};

/// Wrapper for stores in YAML
#[derive(Debug, Deserialize)]
pub struct StoresFixture {
    /// Stores, in registry order
    pub stores: Vec<StoreFixture>,
}

/// Store Fixture
#[derive(Debug, Deserialize)]
pub struct StoreFixture {
    /// Store id
    pub id: String,

    /// Store name
    pub name: String,

    /// Price factor as a decimal string (e.g., "0.94")
    pub price_factor: String,
}

impl TryFrom<StoreFixture> for Store {
    type Error = FixtureError;

    fn try_from(fixture: StoreFixture) -> Result<Self, Self::Error> {
        let price_factor = parse_factor(&fixture.price_factor)?;

        Ok(Store::new(fixture.id, fixture.name, price_factor))
    }
}
