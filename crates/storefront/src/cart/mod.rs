//! Cart store.
//!
//! Holds one line per product id and writes the whole cart back to durable
//! storage after every mutation, before the mutating call returns. A reload
//! therefore always sees the latest in-memory state.

pub mod persistence;

use simple_shop_core::{CartLine, Product, ProductId, Quantity, Totals};

use crate::catalog::CatalogStore;
use crate::storage::DurableStorage;

pub use persistence::{CartDecodeError, load_cart, save_cart};

/// Storage key used when none is configured.
pub const DEFAULT_CART_KEY: &str = "cart";

/// The shopping cart and the storage it persists to.
#[derive(Debug)]
pub struct CartStore<S> {
    lines: Vec<CartLine>,
    storage: S,
    key: String,
}

impl<S: DurableStorage> CartStore<S> {
    /// Restore the cart saved under `key`, or start empty.
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let lines = load_cart(&storage, &key);
        if !lines.is_empty() {
            tracing::info!(key = %key, lines = lines.len(), "Restored saved cart");
        }
        Self {
            lines,
            storage,
            key,
        }
    }

    /// Add one unit of the catalog product `id`.
    ///
    /// Returns the product that was added, or `None` if the catalog has no
    /// such product or the add was refused (the cart is left untouched).
    pub fn add_to_cart<'c>(
        &mut self,
        catalog: &'c CatalogStore,
        id: ProductId,
    ) -> Option<&'c Product> {
        let Some(product) = catalog.find(id) else {
            tracing::debug!(product_id = %id, "Ignoring add for unknown product");
            return None;
        };
        self.add(product).map(|_| product)
    }

    /// Add one unit of `product`, snapshotting it if it is not in the cart yet.
    ///
    /// Returns the line's new quantity. An add that would push the quantity
    /// or a total past what can be represented is refused with `None`, and
    /// the line keeps its current quantity.
    pub fn add(&mut self, product: &Product) -> Option<Quantity> {
        let mut candidate = self.lines.clone();
        let existing = candidate.iter_mut().find(|line| line.id == product.id);
        let quantity = if let Some(line) = existing {
            line.quantity = line.quantity.incremented()?;
            line.quantity
        } else {
            candidate.push(CartLine::snapshot(product));
            Quantity::ONE
        };

        if Totals::from_lines(&candidate).is_none() {
            tracing::warn!(product_id = %product.id, "Refusing add that overflows the cart total");
            return None;
        }

        self.lines = candidate;
        self.persist();
        Some(quantity)
    }

    /// Delete the line for `id`. Returns false if there was none.
    pub fn remove_from_cart(&mut self, id: ProductId) -> bool {
        let Some(index) = self.position(id) else {
            tracing::debug!(product_id = %id, "Ignoring remove for product not in cart");
            return false;
        };
        self.lines.remove(index);
        self.persist();
        true
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.lines.clear();
        self.persist();
    }

    /// Item count and total price, computed from the current lines.
    ///
    /// Loading and adding both reject carts whose totals overflow, so the
    /// computation always succeeds for the lines held here.
    #[must_use]
    pub fn totals(&self) -> Totals {
        Totals::from_lines(&self.lines).unwrap_or_default()
    }

    /// Current lines, in the order they were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Line for `id`, if present.
    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    /// Returns true if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Storage key the cart is saved under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Backing storage.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Give the backing storage back, e.g. to reopen the cart from it.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.lines.iter().position(|line| line.id == id)
    }

    /// A failed write leaves the in-memory cart authoritative.
    fn persist(&mut self) {
        if let Err(e) = save_cart(&mut self.storage, &self.key, &self.lines) {
            tracing::error!(key = %self.key, error = %e, "Failed to save cart");
        }
    }
}
