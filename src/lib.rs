//! Pricewise
//!
//! Pricewise compares the cost of a grocery cart across a registry of stores, using confirmed
//! catalogue prices where a store lists the product and inferring the rest from relative store
//! price levels.

pub mod cart;
pub mod catalogue;
pub mod comparison;
pub mod fixtures;
pub mod offers;
pub mod optimizer;
pub mod prelude;
pub mod pricing;
pub mod stores;
pub mod utils;
