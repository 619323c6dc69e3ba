//! Simple Shop - terminal storefront.
//!
//! Runs the catalog and cart state engine with a text view on stdout and
//! commands read from stdin.
//!
//! # Architecture
//!
//! - The catalog fetch runs concurrently with input handling; commands typed
//!   before it completes act on an empty catalog
//! - The cart is restored from and saved to file-backed durable storage
//! - Errors are logged through `tracing` and forwarded to Sentry when a DSN
//!   is configured

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use sentry::integrations::tracing as sentry_tracing;
use simple_shop_storefront::catalog::CatalogSource;
use simple_shop_storefront::config::ShopConfig;
use simple_shop_storefront::error::Result;
use simple_shop_storefront::intent::Intent;
use simple_shop_storefront::storage::FileStorage;
use simple_shop_storefront::view::{TerminalView, ViewNotifier};
use simple_shop_storefront::Storefront;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Shop = Storefront<FileStorage, TerminalView<std::io::Stdout>>;

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ShopConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Logs go to stderr so they never interleave with the rendered storefront.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "simple_shop_storefront=info,simple_shop=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
#[allow(clippy::print_stderr)]
async fn main() -> ExitCode {
    let config = match ShopConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("simple-shop: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);
    init_tracing();

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "simple-shop stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ShopConfig) -> Result<()> {
    tracing::info!(
        catalog = %config.catalog,
        storage = %config.storage_dir.display(),
        "Starting storefront"
    );

    let source = config.catalog.clone().into_source()?;
    let storage = FileStorage::new(&config.storage_dir);
    let view = TerminalView::new(std::io::stdout());
    let mut shop = Storefront::new(storage, view, config.storefront_settings());

    shop.view_mut().help();
    shop.view_mut().prompt();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let fetch = source.fetch();
    tokio::pin!(fetch);
    let mut catalog_pending = true;

    loop {
        tokio::select! {
            result = &mut fetch, if catalog_pending => {
                catalog_pending = false;
                shop.apply_catalog(result);
                shop.view_mut().prompt();
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if handle_line(&mut shop, &line) == Flow::Quit {
                    break;
                }
                shop.view_mut().prompt();
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received");
                break;
            }
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Handle one line of input. View-only commands never reach the engine.
fn handle_line(shop: &mut Shop, line: &str) -> Flow {
    match line.trim() {
        "" => {}
        "quit" | "exit" => return Flow::Quit,
        "help" => shop.view_mut().help(),
        "cart" => {
            let cart = shop.cart_view();
            shop.view_mut().render_cart(&cart);
        }
        command => match command.parse::<Intent>() {
            Ok(intent) => {
                shop.dispatch(intent);
            }
            Err(e) => shop.view_mut().report(&format!("{e} (type 'help' for commands)")),
        },
    }
    Flow::Continue
}
