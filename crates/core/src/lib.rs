//! Simple Shop Core - Shared types library.
//!
//! This crate provides the types used by the storefront state engine:
//! - products and the cart lines snapshotted from them
//! - decimal prices and cart totals
//! - the pagination policy for the product grid
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no storage
//! access, no HTTP clients. Everything here can be tested without a runtime.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, quantities and catalog records
//! - [`pagination`] - Page slicing and page-button layout

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod pagination;
pub mod types;

pub use pagination::{PageButton, PaginationControls};
pub use types::*;
