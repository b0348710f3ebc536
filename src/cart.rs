//! Cart

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::offers::Offer;

/// Errors related to cart construction or mutation.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// No line with the given id is in the cart.
    #[error("Item {0} not found")]
    ItemNotFound(String),

    /// A line or offer was priced below zero.
    #[error("Item {0} has a negative price")]
    NegativePrice(String),

    /// A line was given a quantity of zero.
    #[error("Item {0} has a quantity of zero")]
    ZeroQuantity(String),

    /// Two lines share the same id.
    #[error("Item {0} appears more than once")]
    DuplicateItem(String),

    /// A total did not fit in a decimal.
    #[error("Cart total overflowed")]
    Overflow,
}

/// A line in the cart: an offer and how many units of it were added.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineItem {
    /// Id of the offer this line was created from
    pub id: String,

    /// Product name
    pub product_name: String,

    /// Id of the store the offer was priced at
    pub origin_store_id: String,

    /// Unit price at the origin store
    pub origin_unit_price: Decimal,

    /// Number of units, never below one
    pub quantity: u32,
}

impl CartLineItem {
    /// Create a single-unit line from an offer.
    pub fn from_offer(offer: Offer) -> Self {
        Self {
            id: offer.id,
            product_name: offer.product_name,
            origin_store_id: offer.store_id,
            origin_unit_price: offer.unit_price,
            quantity: 1,
        }
    }

    /// Set the quantity of the line.
    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Line total at the origin store's price.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Overflow`] if the multiplication overflows.
    pub fn origin_total(&self) -> Result<Decimal, CartError> {
        self.origin_unit_price
            .checked_mul(Decimal::from(self.quantity))
            .ok_or(CartError::Overflow)
    }
}

/// Shopping cart owned by a single session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cart from existing lines, e.g. a restored session.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if a line has a zero quantity or negative price,
    /// or if two lines share an id.
    pub fn with_lines(lines: impl Into<Vec<CartLineItem>>) -> Result<Self, CartError> {
        let lines = lines.into();
        let mut seen = FxHashSet::default();

        for line in &lines {
            if line.quantity == 0 {
                return Err(CartError::ZeroQuantity(line.id.clone()));
            }

            if line.origin_unit_price < Decimal::ZERO {
                return Err(CartError::NegativePrice(line.id.clone()));
            }

            if !seen.insert(line.id.as_str()) {
                return Err(CartError::DuplicateItem(line.id.clone()));
            }
        }

        Ok(Self { lines })
    }

    /// Add one unit of an offer.
    ///
    /// If a line for the same offer already exists its quantity goes up by
    /// one, otherwise a new line is appended. Returns the line's new quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NegativePrice`] if the offer is priced below zero.
    pub fn add_item(&mut self, offer: Offer) -> Result<u32, CartError> {
        if offer.unit_price < Decimal::ZERO {
            return Err(CartError::NegativePrice(offer.id));
        }

        if let Some(line) = self.find_mut(&offer.id) {
            line.quantity = line.quantity.saturating_add(1);

            return Ok(line.quantity);
        }

        self.lines.push(CartLineItem::from_offer(offer));

        Ok(1)
    }

    /// Take one unit off a line, never going below one.
    ///
    /// Returns the line's new quantity. Use [`Cart::remove_item`] to drop a line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if no line has the given id.
    pub fn decrement_item(&mut self, id: &str) -> Result<u32, CartError> {
        let line = self
            .find_mut(id)
            .ok_or_else(|| CartError::ItemNotFound(id.to_string()))?;

        line.quantity = line.quantity.saturating_sub(1).max(1);

        Ok(line.quantity)
    }

    /// Remove a line regardless of its quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if no line has the given id.
    pub fn remove_item(&mut self, id: &str) -> Result<CartLineItem, CartError> {
        let position = self
            .lines
            .iter()
            .position(|line| line.id == id)
            .ok_or_else(|| CartError::ItemNotFound(id.to_string()))?;

        Ok(self.lines.remove(position))
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Get a line by id.
    pub fn get(&self, id: &str) -> Option<&CartLineItem> {
        self.lines.iter().find(|line| line.id == id)
    }

    /// Lines in the order they were added.
    #[must_use]
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    /// Iterate over the lines in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &CartLineItem> {
        self.lines.iter()
    }

    /// Total at the prices the offers were added with.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Overflow`] if a line total or the sum overflows.
    pub fn subtotal(&self) -> Result<Decimal, CartError> {
        self.lines.iter().try_fold(Decimal::ZERO, |total, line| {
            total
                .checked_add(line.origin_total()?)
                .ok_or(CartError::Overflow)
        })
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut CartLineItem> {
        self.lines.iter_mut().find(|line| line.id == id)
    }
}
