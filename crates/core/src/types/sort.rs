//! Catalog sort orders.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::product::Product;

/// Ordering applied to the catalog by the sort buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Cheapest first ("Low to High").
    PriceAscending,
    /// Most expensive first ("High to Low").
    PriceDescending,
}

impl SortOrder {
    /// Compare two products under this ordering.
    #[must_use]
    pub fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::PriceAscending => a.price.cmp(&b.price),
            Self::PriceDescending => b.price.cmp(&a.price),
        }
    }
}

/// Error returned when a sort order name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid sort order: {0} (expected asc or desc)")]
pub struct ParseSortOrderError(String);

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PriceAscending => write!(f, "asc"),
            Self::PriceDescending => write!(f, "desc"),
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = ParseSortOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "low-high" | "price_ascending" => Ok(Self::PriceAscending),
            "desc" | "high-low" | "price_descending" => Ok(Self::PriceDescending),
            _ => Err(ParseSortOrderError(s.to_string())),
        }
    }
}
