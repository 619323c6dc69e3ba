//! Catalog products.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A purchasable item, as published by the catalog source.
///
/// Products are read-only for the whole session. The cart never holds a
/// reference to one; it copies the fields it needs at add time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier, stable for the session.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Display description.
    pub description: String,
    /// Image URL or asset path.
    pub image: String,
    /// Unit price.
    pub price: Price,
}
