//! Integration tests for Simple Shop.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p simple-shop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_http` - Fetching the catalog over HTTP and recovering from bad responses
//! - `storefront_lifecycle` - Load, browse, fill the cart and reload from storage
//!
//! The helpers below serve catalog fixtures from an in-process `axum` router
//! bound to an ephemeral port, so no external services are needed.

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use serde_json::{Value, json};
use url::Url;

/// Catalog fixture with `count` products.
///
/// Product `n` (1-based) costs `n * 1.25`, so ids and prices sort the same way.
#[must_use]
pub fn catalog_json(count: i32) -> Value {
    let products: Vec<Value> = (1..=count)
        .map(|id| {
            json!({
                "id": id,
                "name": format!("Product {id}"),
                "description": format!("The number {id} product"),
                "image": format!("images/product-{id}.jpg"),
                "price": f64::from(id) * 1.25,
            })
        })
        .collect();
    json!({ "products": products })
}

/// A running fixture server.
pub struct CatalogServer {
    base: Url,
}

impl CatalogServer {
    /// Start a server with these routes:
    ///
    /// - `/products.json` - the given catalog document
    /// - `/broken.json` - a body that is not JSON
    /// - `/wrong-shape.json` - JSON without a `products` array
    /// - `/unavailable.json` - HTTP 503
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start(catalog: Value) -> Self {
        let app = Router::new()
            .route(
                "/products.json",
                get(move || {
                    let catalog = catalog.clone();
                    async move { axum::Json(catalog) }
                }),
            )
            .route("/broken.json", get(|| async { "{ products: oops" }))
            .route(
                "/wrong-shape.json",
                get(|| async { axum::Json(json!({ "items": [] })) }),
            )
            .route(
                "/unavailable.json",
                get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "try later") }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fixture server");
        let addr = listener
            .local_addr()
            .expect("Fixture server has no local address");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Fixture server error");
        });

        let base = Url::parse(&format!("http://{addr}/")).expect("Invalid fixture URL");
        Self { base }
    }

    /// URL of a route on this server.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid relative URL.
    #[must_use]
    pub fn url(&self, path: &str) -> Url {
        self.base.join(path).expect("Invalid fixture path")
    }
}
