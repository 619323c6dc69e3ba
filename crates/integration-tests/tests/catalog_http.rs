//! Integration tests for fetching the catalog over HTTP.
//!
//! Each test starts its own fixture server on an ephemeral port.

use simple_shop_core::{Price, ProductId};
use simple_shop_integration_tests::{CatalogServer, catalog_json};
use simple_shop_storefront::catalog::{
    CatalogError, CatalogLocation, CatalogSource, HttpCatalogSource,
};
use simple_shop_storefront::storage::MemoryStorage;
use simple_shop_storefront::view::RecordingView;
use simple_shop_storefront::{Storefront, StorefrontSettings};

fn storefront() -> Storefront<MemoryStorage, RecordingView> {
    Storefront::new(
        MemoryStorage::new(),
        RecordingView::new(),
        StorefrontSettings::default(),
    )
}

#[tokio::test]
async fn test_http_source_fetches_products() {
    let server = CatalogServer::start(catalog_json(3)).await;
    let source = HttpCatalogSource::new(server.url("products.json")).expect("client");

    let products = source.fetch().await.expect("fetch catalog");

    assert_eq!(products.len(), 3);
    assert_eq!(products[2].id, ProductId::new(3));
    assert_eq!(products[2].price, Price::from_cents(375));
}

#[tokio::test]
async fn test_location_string_selects_http_source() {
    let server = CatalogServer::start(catalog_json(2)).await;
    let location: CatalogLocation = server
        .url("products.json")
        .as_str()
        .parse()
        .expect("parse location");

    let source = location.into_source().expect("build source");
    assert_eq!(source.fetch().await.expect("fetch catalog").len(), 2);
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let server = CatalogServer::start(catalog_json(1)).await;
    let source = HttpCatalogSource::new(server.url("unavailable.json")).expect("client");

    assert!(matches!(source.fetch().await, Err(CatalogError::Status(503))));
}

#[tokio::test]
async fn test_missing_route_is_reported() {
    let server = CatalogServer::start(catalog_json(1)).await;
    let source = HttpCatalogSource::new(server.url("nope.json")).expect("client");

    assert!(matches!(source.fetch().await, Err(CatalogError::Status(404))));
}

#[tokio::test]
async fn test_malformed_responses_leave_catalog_empty() {
    let server = CatalogServer::start(catalog_json(1)).await;

    for path in ["broken.json", "wrong-shape.json", "unavailable.json"] {
        let source = HttpCatalogSource::new(server.url(path)).expect("client");
        let mut storefront = storefront();

        assert!(!storefront.load_catalog(&source).await, "{path}");
        assert!(storefront.catalog().is_empty(), "{path}");
        assert!(storefront.view().events().is_empty(), "{path}");
    }
}

#[tokio::test]
async fn test_unreachable_server_leaves_catalog_empty() {
    // Bind and immediately drop a listener to get a port nobody listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let url = format!("http://{addr}/products.json").parse().expect("url");
    let source = HttpCatalogSource::new(url).expect("client");
    let mut storefront = storefront();

    assert!(!storefront.load_catalog(&source).await);
    assert!(storefront.catalog().is_empty());
    assert!(!storefront.add_to_cart(ProductId::new(1)));
}
