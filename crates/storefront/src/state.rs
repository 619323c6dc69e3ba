//! Storefront state container.

use std::cmp::Ordering;
use std::num::NonZeroUsize;

use simple_shop_core::pagination::DEFAULT_PAGE_SIZE;
use simple_shop_core::{Product, ProductId, SortOrder, Totals};
use tracing::instrument;

use crate::cart::{CartStore, DEFAULT_CART_KEY};
use crate::catalog::{CatalogError, CatalogSource, CatalogStore};
use crate::intent::Intent;
use crate::storage::DurableStorage;
use crate::view::{CartView, Notification, ViewNotifier};

/// Settings the state engine needs at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontSettings {
    /// Storage key holding the cart.
    pub cart_key: String,
    /// Products per page.
    pub page_size: NonZeroUsize,
}

impl Default for StorefrontSettings {
    fn default() -> Self {
        Self {
            cart_key: DEFAULT_CART_KEY.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// The whole widget state: catalog, cart and the view that displays them.
///
/// Every operation runs to completion and redraws the affected parts of the
/// view before returning. Operations that change nothing do not redraw.
#[derive(Debug)]
pub struct Storefront<S, V> {
    catalog: CatalogStore,
    cart: CartStore<S>,
    view: V,
}

impl<S: DurableStorage, V: ViewNotifier> Storefront<S, V> {
    /// Create the storefront with an empty catalog, restoring the saved cart.
    pub fn new(storage: S, view: V, settings: StorefrontSettings) -> Self {
        Self {
            catalog: CatalogStore::new(settings.page_size),
            cart: CartStore::open(storage, settings.cart_key),
            view,
        }
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Fetch the catalog from `source` and apply the result.
    ///
    /// Returns true if a catalog was loaded.
    #[instrument(skip_all)]
    pub async fn load_catalog<C: CatalogSource>(&mut self, source: &C) -> bool {
        let result = source.fetch().await;
        self.apply_catalog(result)
    }

    /// Apply the outcome of a catalog fetch.
    ///
    /// On success the catalog is replaced and products, cart and pagination
    /// are rendered. On failure the error is logged and the catalog stays as
    /// it was (empty at startup).
    pub fn apply_catalog(&mut self, result: Result<Vec<Product>, CatalogError>) -> bool {
        match result {
            Ok(products) => {
                tracing::info!(count = products.len(), "Catalog loaded");
                self.catalog.replace(products);
                self.render_products();
                self.render_cart();
                self.render_pagination();
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Error loading products");
                false
            }
        }
    }

    /// Reorder the catalog with `compare` and return to page 1.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&Product, &Product) -> Ordering,
    {
        self.catalog.sort_by(compare);
        self.render_products();
        self.render_pagination();
    }

    /// Reorder the catalog by price and return to page 1.
    pub fn sort(&mut self, order: SortOrder) {
        self.sort_by(|a, b| order.compare(a, b));
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    /// Go to the previous page. No-op on page 1.
    pub fn previous_page(&mut self) -> bool {
        let moved = self.catalog.previous();
        self.after_page_change(moved)
    }

    /// Go to the next page. No-op on the last page.
    pub fn next_page(&mut self) -> bool {
        let moved = self.catalog.next();
        self.after_page_change(moved)
    }

    /// Go to `page`. No-op outside `1..=total_pages`.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        let moved = self.catalog.go_to(page);
        self.after_page_change(moved)
    }

    fn after_page_change(&mut self, moved: bool) -> bool {
        if moved {
            self.render_products();
            self.render_pagination();
        }
        moved
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add one unit of catalog product `id` to the cart.
    ///
    /// Unknown ids are ignored. Returns true if the cart changed.
    pub fn add_to_cart(&mut self, id: ProductId) -> bool {
        let Some(product) = self.cart.add_to_cart(&self.catalog, id) else {
            return false;
        };
        let notification = Notification::added_to_cart(&product.name);
        self.render_cart();
        self.view.notify(&notification);
        true
    }

    /// Remove the cart line for `id`. Returns true if there was one.
    pub fn remove_from_cart(&mut self, id: ProductId) -> bool {
        let removed = self.cart.remove_from_cart(id);
        if removed {
            self.render_cart();
        }
        removed
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear_cart();
        self.render_cart();
        self.view.notify(&Notification::cart_cleared());
    }

    /// Item count and total price of the cart.
    #[must_use]
    pub fn totals(&self) -> Totals {
        self.cart.totals()
    }

    /// Display model of the cart.
    #[must_use]
    pub fn cart_view(&self) -> CartView {
        CartView::new(self.cart.lines(), self.cart.totals())
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Apply a user intent. Returns true if state changed.
    pub fn dispatch(&mut self, intent: Intent) -> bool {
        tracing::debug!(?intent, "Dispatching intent");
        match intent {
            Intent::SortByPrice(order) => {
                self.sort(order);
                true
            }
            Intent::PreviousPage => self.previous_page(),
            Intent::NextPage => self.next_page(),
            Intent::GoToPage(page) => self.go_to_page(page),
            Intent::AddToCart(id) => self.add_to_cart(id),
            Intent::RemoveFromCart(id) => self.remove_from_cart(id),
            Intent::ClearCart => {
                self.clear_cart();
                true
            }
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub const fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    #[must_use]
    pub const fn view(&self) -> &V {
        &self.view
    }

    pub const fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Tear down the storefront, keeping the storage and the view.
    #[must_use]
    pub fn into_parts(self) -> (S, V) {
        (self.cart.into_storage(), self.view)
    }

    fn render_products(&mut self) {
        self.view.render_products(self.catalog.visible());
    }

    fn render_pagination(&mut self) {
        self.view.render_pagination(&self.catalog.controls());
    }

    fn render_cart(&mut self) {
        let cart = self.cart_view();
        self.view.render_cart(&cart);
    }
}
