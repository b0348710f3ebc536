//! Cart Fixtures

use serde::Deserialize;

/// Wrapper for a saved cart in YAML
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Cart lines, in the order they were added
    pub lines: Vec<CartLineFixture>,
}

/// Cart Line Fixture
#[derive(Debug, Deserialize)]
pub struct CartLineFixture {
    /// Id of an offer from the offers fixture
    pub offer: String,

    /// Units of the offer
    #[serde(default = "one")]
    pub quantity: u32,
}

fn one() -> u32 {
    1
}
