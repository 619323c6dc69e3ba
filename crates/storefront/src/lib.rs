//! Simple Shop Storefront library.
//!
//! The catalog and cart state engine behind the storefront widget, as a
//! library so it can be driven by any view and tested without one.
//!
//! # Modules
//!
//! - [`catalog`] - Product list, sorting, paging and catalog sources
//! - [`cart`] - Cart lines, totals and persistence
//! - [`storage`] - Durable key/value storage backends
//! - [`state`] - The [`Storefront`] state container
//! - [`intent`] - Commands emitted by the view
//! - [`view`] - Rendering boundary and bundled views

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod intent;
pub mod state;
pub mod storage;
pub mod view;

pub use state::{Storefront, StorefrontSettings};
