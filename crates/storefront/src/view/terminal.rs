//! Plain-text view for the terminal.

use std::fmt::Write as _;
use std::io::Write;

use simple_shop_core::{PaginationControls, Product};

use super::{CartView, Notification, ViewNotifier};

const HELP: &str = "\
Commands:
  sort asc | sort desc   sort products by price
  prev | next            previous / next page
  page N                 go to page N
  add ID                 add a product to the cart
  remove ID              remove a product from the cart
  clear                  empty the cart
  cart                   show the cart
  help                   show this help
  quit                   exit
";

/// Renders the storefront as text on any writer.
///
/// Write failures are logged and otherwise ignored; the view is output only.
#[derive(Debug)]
pub struct TerminalView<W> {
    out: W,
}

impl<W: Write> TerminalView<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print the command reference.
    pub fn help(&mut self) {
        self.emit(HELP);
    }

    /// Print a one-line message that is not a notification (e.g. a typo).
    pub fn report(&mut self, message: &str) {
        self.emit(&format!("{message}\n"));
    }

    /// Print the input prompt.
    pub fn prompt(&mut self) {
        self.emit("> ");
    }

    fn emit(&mut self, text: &str) {
        let result = self
            .out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush());
        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to write to terminal");
        }
    }
}

impl<W: Write> ViewNotifier for TerminalView<W> {
    fn render_products(&mut self, products: &[Product]) {
        let mut text = String::from("\n== Products ==\n");
        if products.is_empty() {
            text.push_str("No products to show.\n");
        }
        for product in products {
            let _ = writeln!(
                text,
                "[{}] {} - {}\n    {}\n    image: {}",
                product.id,
                product.name,
                product.price.display(),
                product.description,
                product.image
            );
        }
        self.emit(&text);
    }

    fn render_pagination(&mut self, controls: &PaginationControls) {
        let mut parts = Vec::with_capacity(controls.pages.len() + 2);
        parts.push(button("Previous", controls.previous_enabled));
        parts.extend(controls.pages.iter().map(|page| {
            if page.active {
                format!("[{}]", page.number)
            } else {
                page.number.to_string()
            }
        }));
        parts.push(button("Next", controls.next_enabled));
        self.emit(&format!("{}\n", parts.join(" ")));
    }

    fn render_cart(&mut self, cart: &CartView) {
        let mut text = format!("\n== Cart ({}) ==\n", cart.item_count);
        if cart.is_empty() {
            text.push_str("Your cart is empty.\n");
        }
        for item in &cart.items {
            let _ = writeln!(
                text,
                "{} x{} - {}   (remove {})",
                item.name, item.quantity, item.line_price, item.id
            );
        }
        let _ = writeln!(text, "Total: {}", cart.total);
        self.emit(&text);
    }

    fn notify(&mut self, notification: &Notification) {
        self.emit(&format!(">> {notification}\n"));
    }
}

fn button(label: &str, enabled: bool) -> String {
    if enabled {
        label.to_string()
    } else {
        format!("({label})")
    }
}
