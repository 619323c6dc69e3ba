//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `SHOP_CATALOG_URL` - Catalog location, an `http(s)://` URL, a `file://`
//!   URL or a path (default: products.json)
//! - `SHOP_STORAGE_DIR` - Directory for durable storage (default: .simple-shop)
//! - `SHOP_CART_KEY` - Storage key holding the cart (default: cart)
//! - `SHOP_ITEMS_PER_PAGE` - Products per page, at least 1 (default: 4)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::num::NonZeroUsize;
use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::CatalogLocation;
use crate::state::StorefrontSettings;

const DEFAULT_CATALOG_URL: &str = "products.json";
const DEFAULT_STORAGE_DIR: &str = ".simple-shop";
const DEFAULT_CART_KEY: &str = "cart";
const DEFAULT_ITEMS_PER_PAGE: &str = "4";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// Where the product catalog is fetched from
    pub catalog: CatalogLocation,
    /// Directory backing durable storage
    pub storage_dir: PathBuf,
    /// Storage key for the cart
    pub cart_key: String,
    /// Products shown per page
    pub items_per_page: NonZeroUsize,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

impl ShopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        let catalog = vars
            .get_or_default("SHOP_CATALOG_URL", DEFAULT_CATALOG_URL)
            .parse::<CatalogLocation>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOP_CATALOG_URL".to_string(), e.to_string()))?;
        let storage_dir = PathBuf::from(vars.get_or_default("SHOP_STORAGE_DIR", DEFAULT_STORAGE_DIR));
        let cart_key = vars.get_or_default("SHOP_CART_KEY", DEFAULT_CART_KEY);
        let items_per_page = vars
            .get_or_default("SHOP_ITEMS_PER_PAGE", DEFAULT_ITEMS_PER_PAGE)
            .parse::<NonZeroUsize>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SHOP_ITEMS_PER_PAGE".to_string(), e.to_string())
            })?;

        Ok(Self {
            catalog,
            storage_dir,
            cart_key,
            items_per_page,
            sentry_dsn: vars.get_optional("SENTRY_DSN"),
            sentry_environment: vars.get_optional("SENTRY_ENVIRONMENT"),
        })
    }

    /// Settings for the state engine.
    #[must_use]
    pub fn storefront_settings(&self) -> StorefrontSettings {
        StorefrontSettings {
            cart_key: self.cart_key.clone(),
            page_size: self.items_per_page,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Vars<F>(F);

impl<F: Fn(&str) -> Option<String>> Vars<F> {
    /// Get an optional variable. Empty values count as unset.
    fn get_optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn get_or_default(&self, key: &str, default: &str) -> String {
        self.get_optional(key)
            .unwrap_or_else(|| default.to_string())
    }
}
