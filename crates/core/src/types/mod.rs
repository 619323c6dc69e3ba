//! Core types for Simple Shop.
//!
//! This module provides type-safe wrappers for the catalog and cart domain.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;
pub mod sort;

pub use cart::{CartLine, Quantity, Totals};
pub use id::ProductId;
pub use price::Price;
pub use product::Product;
pub use sort::{ParseSortOrderError, SortOrder};
