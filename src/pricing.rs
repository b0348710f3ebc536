//! Pricing
//!
//! Cross-store price inference. When the catalogue has no price for a product
//! at a store, the price seen at the origin store is scaled by the ratio of the
//! two stores' price factors.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::stores::StoreRegistry;

/// Errors that can occur while inferring a price.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// A store's price factor is zero or negative, so prices can't be scaled.
    #[error("store {store_id} has invalid price factor {price_factor}")]
    InvalidConfiguration {
        /// Id of the misconfigured store
        store_id: String,

        /// The offending factor
        price_factor: Decimal,
    },

    /// The scaled price does not fit in a decimal.
    #[error("price inference overflowed")]
    Overflow,
}

/// Estimate what a unit priced at `origin_store_id` would cost at `target_store_id`.
///
/// `estimate = origin_unit_price / factor(origin) * factor(target)`. Stores
/// missing from the registry are priced at the baseline factor of 1.0.
///
/// # Errors
///
/// - [`PricingError::InvalidConfiguration`]: either factor is zero or negative.
/// - [`PricingError::Overflow`]: the division or multiplication overflowed.
pub fn infer_price(
    stores: &StoreRegistry,
    origin_store_id: &str,
    origin_unit_price: Decimal,
    target_store_id: &str,
) -> Result<Decimal, PricingError> {
    let origin_factor = price_factor(stores, origin_store_id)?;
    let target_factor = price_factor(stores, target_store_id)?;

    if origin_unit_price.is_zero() {
        return Ok(Decimal::ZERO);
    }

    origin_unit_price
        .checked_div(origin_factor)
        .and_then(|base| base.checked_mul(target_factor))
        .ok_or(PricingError::Overflow)
}

/// Look up a store's factor, defaulting to 1.0 and refusing non-positive values.
fn price_factor(stores: &StoreRegistry, store_id: &str) -> Result<Decimal, PricingError> {
    let factor = stores.price_factor(store_id).unwrap_or(Decimal::ONE);

    if factor <= Decimal::ZERO {
        return Err(PricingError::InvalidConfiguration {
            store_id: store_id.to_string(),
            price_factor: factor,
        });
    }

    Ok(factor)
}
