//! Catalog store.
//!
//! # Architecture
//!
//! - The product list is fetched once per session from a [`CatalogSource`]
//! - The store owns the list and the current page; sorting reorders in place
//! - Paged reads are pure and never fail on out-of-range pages
//!
//! # Example
//!
//! ```rust,ignore
//! use simple_shop_storefront::catalog::{CatalogLocation, CatalogSource, CatalogStore};
//!
//! let source = "products.json".parse::<CatalogLocation>()?.into_source()?;
//! let mut catalog = CatalogStore::new(page_size);
//! catalog.replace(source.fetch().await?);
//!
//! catalog.sort(SortOrder::PriceAscending);
//! let first_page = catalog.visible();
//! ```

mod source;

use std::cmp::Ordering;
use std::num::NonZeroUsize;

use simple_shop_core::pagination::{self, PaginationControls};
use simple_shop_core::{Product, ProductId, SortOrder};
use thiserror::Error;

pub use source::{
    AnyCatalogSource, CatalogDocument, CatalogLocation, CatalogSource, FileCatalogSource,
    HttpCatalogSource, parse_catalog,
};

/// Errors that can occur when fetching the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    /// Catalog file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Response was not a valid catalog document.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Location is neither an HTTP(S) URL nor a file path.
    #[error("Unsupported catalog location: {0}")]
    UnsupportedLocation(String),
}

/// The session's product list plus the current page of the product grid.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    products: Vec<Product>,
    page_size: NonZeroUsize,
    current_page: usize,
}

impl CatalogStore {
    /// Create an empty catalog showing `page_size` products per page.
    #[must_use]
    pub const fn new(page_size: NonZeroUsize) -> Self {
        Self {
            products: Vec::new(),
            page_size,
            current_page: 1,
        }
    }

    /// Replace the product list with a freshly loaded one and go to page 1.
    pub fn replace(&mut self, products: Vec<Product>) {
        self.products = products;
        self.current_page = 1;
    }

    /// Reorder the catalog in place and go back to page 1.
    ///
    /// Equal elements keep their relative order.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&Product, &Product) -> Ordering,
    {
        self.products.sort_by(compare);
        self.current_page = 1;
    }

    /// Reorder the catalog by price.
    pub fn sort(&mut self, order: SortOrder) {
        self.sort_by(|a, b| order.compare(a, b));
    }

    /// Products on `page` when showing `page_size` per page.
    ///
    /// Pages are numbered from 1; page 0 and pages past the end are empty.
    #[must_use]
    pub fn get_page(&self, page: usize, page_size: NonZeroUsize) -> &[Product] {
        let range = pagination::page_range(self.products.len(), page_size, page);
        self.products.get(range).unwrap_or_default()
    }

    /// Products on the current page.
    #[must_use]
    pub fn visible(&self) -> &[Product] {
        self.get_page(self.current_page, self.page_size)
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// All products in their current order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    #[must_use]
    pub const fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    #[must_use]
    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.products.len(), self.page_size)
    }

    /// Controls for the pagination bar at the current page.
    #[must_use]
    pub fn controls(&self) -> PaginationControls {
        PaginationControls::new(self.products.len(), self.page_size, self.current_page)
    }

    /// Go to `page`. Returns false (and changes nothing) if the page does not exist.
    pub fn go_to(&mut self, page: usize) -> bool {
        if !pagination::is_valid_page(page, self.total_pages()) {
            return false;
        }
        self.current_page = page;
        true
    }

    /// Go to the previous page, if any.
    pub fn previous(&mut self) -> bool {
        self.current_page
            .checked_sub(1)
            .is_some_and(|page| self.go_to(page))
    }

    /// Go to the next page, if any.
    pub fn next(&mut self) -> bool {
        self.current_page
            .checked_add(1)
            .is_some_and(|page| self.go_to(page))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use simple_shop_core::Price;

    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn product(id: i32, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            image: String::new(),
            price: Price::from_cents(cents),
        }
    }

    /// Ten products with ids 0..10 and prices that are not in id order.
    fn ten_products() -> CatalogStore {
        let mut catalog = CatalogStore::new(size(4));
        catalog.replace(
            (0..10)
                .map(|id| product(id, i64::from((id * 7) % 10) * 100 + 99))
                .collect(),
        );
        catalog
    }

    fn ids(products: &[Product]) -> Vec<i32> {
        products.iter().map(|p| p.id.get()).collect()
    }

    #[test]
    fn test_get_page_boundaries() {
        let catalog = ten_products();

        assert_eq!(ids(catalog.get_page(1, size(4))), vec![0, 1, 2, 3]);
        assert_eq!(ids(catalog.get_page(3, size(4))), vec![8, 9]);
        assert!(catalog.get_page(0, size(4)).is_empty());
        assert!(catalog.get_page(4, size(4)).is_empty());
        assert!(catalog.get_page(usize::MAX, size(4)).is_empty());
    }

    #[test]
    fn test_get_page_is_idempotent() {
        let catalog = ten_products();
        assert_eq!(catalog.get_page(2, size(4)), catalog.get_page(2, size(4)));
    }

    #[test]
    fn test_get_page_on_empty_catalog() {
        let catalog = CatalogStore::new(size(4));
        assert!(catalog.get_page(1, size(4)).is_empty());
        assert!(catalog.visible().is_empty());
        assert_eq!(catalog.total_pages(), 0);
    }

    #[test]
    fn test_sort_orders_by_price_and_resets_page() {
        let mut catalog = ten_products();
        assert!(catalog.go_to(3));

        catalog.sort(SortOrder::PriceAscending);
        assert_eq!(catalog.current_page(), 1);
        assert!(
            catalog
                .products()
                .windows(2)
                .all(|pair| pair[0].price <= pair[1].price)
        );

        catalog.sort(SortOrder::PriceDescending);
        assert!(
            catalog
                .products()
                .windows(2)
                .all(|pair| pair[0].price >= pair[1].price)
        );
    }

    #[test]
    fn test_sort_by_custom_comparator() {
        let mut catalog = ten_products();
        catalog.sort_by(|a, b| b.id.cmp(&a.id));
        assert_eq!(ids(catalog.visible()), vec![9, 8, 7, 6]);
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let mut catalog = ten_products();

        assert!(!catalog.previous());
        assert_eq!(catalog.current_page(), 1);

        assert!(catalog.next());
        assert!(catalog.next());
        assert_eq!(catalog.current_page(), 3);
        assert!(!catalog.next());
        assert_eq!(catalog.current_page(), 3);

        assert!(!catalog.go_to(0));
        assert!(!catalog.go_to(4));
        assert!(catalog.go_to(2));
        assert!(catalog.previous());
        assert_eq!(catalog.current_page(), 1);
    }

    #[test]
    fn test_navigation_on_empty_catalog_is_noop() {
        let mut catalog = CatalogStore::new(size(4));
        assert!(!catalog.next());
        assert!(!catalog.previous());
        assert!(!catalog.go_to(1));
        assert_eq!(catalog.current_page(), 1);
    }

    #[test]
    fn test_controls_track_current_page() {
        let mut catalog = ten_products();
        let controls = catalog.controls();
        assert!(!controls.previous_enabled);
        assert!(controls.next_enabled);

        catalog.go_to(3);
        let controls = catalog.controls();
        assert!(controls.previous_enabled);
        assert!(!controls.next_enabled);
        assert_eq!(controls.current_page, 3);
    }

    #[test]
    fn test_find() {
        let catalog = ten_products();
        assert_eq!(catalog.find(ProductId::new(7)).unwrap().id, ProductId::new(7));
        assert!(catalog.find(ProductId::new(70)).is_none());
    }
}
