//! Catalogue Fixtures

use rusty_money::iso::Currency;
use serde::Deserialize;

use crate::{
    catalogue::CatalogueRecord,
    fixtures::{FixtureError, prices::parse_price},
};

/// Wrapper for catalogue records in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogueFixture {
    /// Catalogue records
    pub records: Vec<CatalogueRecordFixture>,
}

/// Catalogue Record Fixture
#[derive(Debug, Deserialize)]
pub struct CatalogueRecordFixture {
    /// Product name
    pub product: String,

    /// Store name
    pub store: String,

    /// Normal price (e.g., "2.35 GBP")
    pub price: String,

    /// Promotional price (e.g., "1.99 GBP")
    #[serde(default)]
    pub promo_price: Option<String>,

    /// Whether the promotion is running
    #[serde(default)]
    pub on_promotion: bool,
}

impl CatalogueRecordFixture {
    /// Convert into a record, returning the currency every price was given in.
    ///
    /// # Errors
    ///
    /// Returns an error if a price can't be parsed or the normal and
    /// promotional prices use different currencies.
    pub fn try_into_record(self) -> Result<(CatalogueRecord, &'static Currency), FixtureError> {
        let (normal_price, currency) = parse_price(&self.price)?;

        let promo_price = match self.promo_price.as_deref() {
            Some(promo) => {
                let (amount, promo_currency) = parse_price(promo)?;

                if promo_currency != currency {
                    return Err(FixtureError::CurrencyMismatch(
                        currency.iso_alpha_code.to_string(),
                        promo_currency.iso_alpha_code.to_string(),
                    ));
                }

                Some(amount)
            }
            None => None,
        };

        let record = CatalogueRecord {
            product_name: self.product,
            store_name: self.store,
            normal_price,
            promo_price,
            is_on_promotion: self.on_promotion,
        };

        Ok((record, currency))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn record_fixture_parses_promotion() -> TestResult {
        let fixture: CatalogueRecordFixture = serde_norway::from_str(
            "product: Rice\nstore: ValueMart\nprice: 2.35 GBP\npromo_price: 1.99 GBP\non_promotion: true\n",
        )?;

        let (record, currency) = fixture.try_into_record()?;

        assert_eq!(currency, GBP);
        assert_eq!(record.resolved_price(), Decimal::new(199, 2));

        Ok(())
    }

    #[test]
    fn record_fixture_defaults_to_no_promotion() -> TestResult {
        let fixture: CatalogueRecordFixture =
            serde_norway::from_str("product: Rice\nstore: ValueMart\nprice: 2.35 GBP\n")?;

        let (record, _currency) = fixture.try_into_record()?;

        assert!(!record.is_on_promotion);
        assert_eq!(record.promo_price, None);

        Ok(())
    }

    #[test]
    fn record_fixture_rejects_mixed_currencies() -> TestResult {
        let fixture: CatalogueRecordFixture = serde_norway::from_str(
            "product: Rice\nstore: ValueMart\nprice: 2.35 GBP\npromo_price: 1.99 USD\n",
        )?;

        let result = fixture.try_into_record();

        assert!(matches!(
            result,
            Err(FixtureError::CurrencyMismatch(expected, found))
                if expected == GBP.iso_alpha_code && found == USD.iso_alpha_code
        ));

        Ok(())
    }
}
