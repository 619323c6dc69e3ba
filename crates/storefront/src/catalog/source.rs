//! Catalog sources.
//!
//! The catalog is a JSON document of the form
//! `{ "products": [ { "id", "name", "description", "image", "price" } ] }`,
//! fetched over HTTP or read from a local file.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use simple_shop_core::Product;
use url::Url;

use super::CatalogError;

/// Something the product list can be fetched from.
pub trait CatalogSource {
    /// Fetch the full product list.
    fn fetch(&self) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;
}

/// Top-level catalog document.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogDocument {
    pub products: Vec<Product>,
}

/// Parse a catalog document. Any missing field or wrong type fails the whole
/// document.
///
/// # Errors
///
/// Returns `CatalogError::Parse` if the body is not a valid catalog document.
pub fn parse_catalog(body: &[u8]) -> Result<Vec<Product>, CatalogError> {
    let document: CatalogDocument = serde_json::from_slice(body)?;
    Ok(document.products)
}

// =============================================================================
// HTTP
// =============================================================================

/// Fetches the catalog with a GET request.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpCatalogSource {
    /// Create a source for `url`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(url: Url) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("simple-shop/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, url })
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }
}

impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        parse_catalog(&body)
    }
}

// =============================================================================
// File
// =============================================================================

/// Reads the catalog from a local JSON file.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for FileCatalogSource {
    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        let body = tokio::fs::read(&self.path).await?;
        parse_catalog(&body)
    }
}

// =============================================================================
// Location
// =============================================================================

/// Where the catalog lives, as configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogLocation {
    /// An `http` or `https` URL.
    Http(Url),
    /// A local file, from a `file://` URL or a bare path.
    File(PathBuf),
}

impl CatalogLocation {
    /// Build the matching source.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn into_source(self) -> Result<AnyCatalogSource, CatalogError> {
        Ok(match self {
            Self::Http(url) => AnyCatalogSource::Http(HttpCatalogSource::new(url)?),
            Self::File(path) => AnyCatalogSource::File(FileCatalogSource::new(path)),
        })
    }
}

impl FromStr for CatalogLocation {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Url::parse(s) {
            Ok(url) => match url.scheme() {
                "http" | "https" => Ok(Self::Http(url)),
                "file" => url
                    .to_file_path()
                    .map(Self::File)
                    .map_err(|()| CatalogError::UnsupportedLocation(s.to_string())),
                // Windows drive letters parse as one-letter schemes
                scheme if scheme.len() == 1 => Ok(Self::File(PathBuf::from(s))),
                _ => Err(CatalogError::UnsupportedLocation(s.to_string())),
            },
            Err(url::ParseError::RelativeUrlWithoutBase) => Ok(Self::File(PathBuf::from(s))),
            Err(_) => Err(CatalogError::UnsupportedLocation(s.to_string())),
        }
    }
}

impl std::fmt::Display for CatalogLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A source chosen at runtime from a [`CatalogLocation`].
#[derive(Debug, Clone)]
pub enum AnyCatalogSource {
    Http(HttpCatalogSource),
    File(FileCatalogSource),
}

impl CatalogSource for AnyCatalogSource {
    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        match self {
            Self::Http(source) => source.fetch().await,
            Self::File(source) => source.fetch().await,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use simple_shop_core::{Price, ProductId};

    use super::*;

    const CATALOG: &str = r#"{
        "products": [
            {"id": 1, "name": "Soap", "description": "Lathers", "image": "soap.png", "price": 4.5},
            {"id": 2, "name": "Candle", "description": "Glows", "image": "candle.png", "price": 12}
        ]
    }"#;

    #[test]
    fn test_parse_catalog() {
        let products = parse_catalog(CATALOG.as_bytes()).unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, ProductId::new(1));
        assert_eq!(products[1].price, Price::from_cents(1200));
    }

    #[test]
    fn test_parse_catalog_rejects_malformed_documents() {
        for body in [
            "",
            "not json",
            "[]",
            r#"{"items": []}"#,
            r#"{"products": [{"id": 1}]}"#,
        ] {
            assert!(
                matches!(parse_catalog(body.as_bytes()), Err(CatalogError::Parse(_))),
                "{body}"
            );
        }
    }

    #[test]
    fn test_location_from_http_url() {
        let location: CatalogLocation = "https://shop.example/products.json".parse().unwrap();
        assert!(matches!(location, CatalogLocation::Http(ref url) if url.path() == "/products.json"));
    }

    #[test]
    fn test_location_from_relative_path() {
        let location: CatalogLocation = "data/products.json".parse().unwrap();
        assert_eq!(location, CatalogLocation::File(PathBuf::from("data/products.json")));
    }

    #[cfg(unix)]
    #[test]
    fn test_location_from_file_url() {
        let location: CatalogLocation = "file:///srv/shop/products.json".parse().unwrap();
        assert_eq!(
            location,
            CatalogLocation::File(PathBuf::from("/srv/shop/products.json"))
        );
    }

    #[test]
    fn test_location_rejects_other_schemes() {
        assert!(matches!(
            "ftp://shop.example/products.json".parse::<CatalogLocation>(),
            Err(CatalogError::UnsupportedLocation(_))
        ));
    }

    #[tokio::test]
    async fn test_file_source_reads_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, CATALOG).unwrap();

        let products = FileCatalogSource::new(&path).fetch().await.unwrap();
        assert_eq!(products.len(), 2);
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileCatalogSource::new(dir.path().join("missing.json"));

        assert!(matches!(source.fetch().await, Err(CatalogError::Io(_))));
    }

    #[tokio::test]
    async fn test_any_source_dispatches_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, CATALOG).unwrap();

        let source = CatalogLocation::File(path).into_source().unwrap();
        assert_eq!(source.fetch().await.unwrap().len(), 2);
    }
}
