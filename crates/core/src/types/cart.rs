//! Cart line items and their aggregates.

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;
use super::product::Product;

/// Number of units of one product in the cart.
///
/// Always at least one: a line whose quantity would drop to zero is removed
/// instead. Deserializing `0` fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single unit, the quantity of a freshly added line.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a quantity, or `None` for zero.
    #[must_use]
    pub const fn new(quantity: u32) -> Option<Self> {
        match NonZeroU32::new(quantity) {
            Some(quantity) => Some(Self(quantity)),
            None => None,
        }
    }

    /// Get the underlying count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// The quantity after one more unit is added, or `None` at `u32::MAX`.
    #[must_use]
    pub const fn incremented(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(quantity) => Some(Self(quantity)),
            None => None,
        }
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One aggregated cart entry per product id.
///
/// Holds a snapshot of the product fields taken when the product was first
/// added; later catalog changes do not reach existing lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub image: String,
    pub price: Price,
    pub quantity: Quantity,
}

impl CartLine {
    /// Copy a product into a new line with a quantity of one.
    #[must_use]
    pub fn snapshot(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            image: product.image.clone(),
            price: product.price,
            quantity: Quantity::ONE,
        }
    }

    /// Unit price times quantity, unrounded. `None` if it does not fit.
    #[must_use]
    pub fn line_total(&self) -> Option<Price> {
        self.price.checked_mul(self.quantity)
    }
}

/// Aggregates over a set of cart lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    /// Sum of quantities across all lines.
    pub item_count: u64,
    /// Sum of `price * quantity` across all lines, unrounded.
    pub total_price: Price,
}

impl Totals {
    /// Compute totals from scratch.
    ///
    /// Returns `None` if any line total or the grand total overflows.
    #[must_use]
    pub fn from_lines(lines: &[CartLine]) -> Option<Self> {
        lines.iter().try_fold(Self::default(), |totals, line| {
            Some(Self {
                item_count: totals.item_count + u64::from(line.quantity.get()),
                total_price: totals.total_price.checked_add(line.line_total()?)?,
            })
        })
    }

    /// Total price rounded to two decimal places.
    #[must_use]
    pub fn rounded_total(&self) -> Decimal {
        self.total_price.rounded()
    }
}
