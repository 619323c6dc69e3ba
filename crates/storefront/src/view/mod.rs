//! Rendering boundary.
//!
//! The state engine never draws anything itself. After each state change it
//! hands display-ready data to a [`ViewNotifier`]; the view turns user input
//! back into [`Intent`](crate::intent::Intent)s and never touches state
//! directly.

mod recording;
mod terminal;

use serde::Serialize;
use simple_shop_core::{CartLine, PaginationControls, Product, ProductId, Totals};

pub use recording::{RecordingView, ViewEvent};
pub use terminal::TerminalView;

/// Receives redraw requests from the state engine.
pub trait ViewNotifier {
    /// The products on the current page changed.
    fn render_products(&mut self, products: &[Product]);

    /// The pagination bar changed.
    fn render_pagination(&mut self, controls: &PaginationControls);

    /// The cart changed.
    fn render_cart(&mut self, cart: &CartView);

    /// Show a transient message.
    fn notify(&mut self, notification: &Notification);
}

// =============================================================================
// Display Models
// =============================================================================

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineView {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub total: String,
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: "$0.00".to_string(),
            item_count: 0,
        }
    }

    /// Build the display model from lines and their precomputed totals.
    #[must_use]
    pub fn new(lines: &[CartLine], totals: Totals) -> Self {
        Self {
            items: lines.iter().map(CartLineView::from).collect(),
            total: totals.total_price.display(),
            item_count: totals.item_count,
        }
    }

    /// Build the display model, computing totals from the lines.
    ///
    /// Returns `None` if the totals overflow.
    #[must_use]
    pub fn from_lines(lines: &[CartLine]) -> Option<Self> {
        Totals::from_lines(lines).map(|totals| Self::new(lines, totals))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id,
            name: line.name.clone(),
            image: line.image.clone(),
            quantity: line.quantity.get(),
            price: line.price.display(),
            line_price: line
                .line_total()
                .map_or_else(String::new, |total| total.display()),
        }
    }
}

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    AddedToCart,
    CartCleared,
}

/// A transient success message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    #[must_use]
    pub fn added_to_cart(product_name: &str) -> Self {
        Self {
            kind: NotificationKind::AddedToCart,
            message: format!("{product_name} added to cart!"),
        }
    }

    #[must_use]
    pub fn cart_cleared() -> Self {
        Self {
            kind: NotificationKind::CartCleared,
            message: "Cart has been cleared!".to_string(),
        }
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
