//! Pricewise prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLineItem},
    catalogue::{Catalogue, CatalogueError, CatalogueRecord},
    comparison::{Comparison, ReportError},
    fixtures::{Fixture, FixtureError},
    offers::{Offer, OfferSource, OfferSourceError, StaticOfferSource, search_or_empty},
    optimizer::{PricedLine, StoreCostSummary, optimize},
    pricing::{PricingError, infer_price},
    stores::{Store, StoreError, StoreRegistry},
};
