//! A view that records what it was asked to render.

use simple_shop_core::{PaginationControls, Product, ProductId};

use super::{CartView, Notification, ViewNotifier};

/// One call made on a [`RecordingView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Products(Vec<ProductId>),
    Pagination(PaginationControls),
    Cart(CartView),
    Notification(Notification),
}

/// Headless view that keeps every render call, in order.
///
/// Used by tests and by callers that drive the engine without a screen.
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    events: Vec<ViewEvent>,
}

impl RecordingView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[ViewEvent] {
        &self.events
    }

    /// Drain the recorded events.
    pub fn take(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.events)
    }

    /// Most recently rendered product ids.
    #[must_use]
    pub fn last_products(&self) -> Option<&[ProductId]> {
        self.events.iter().rev().find_map(|event| match event {
            ViewEvent::Products(ids) => Some(ids.as_slice()),
            _ => None,
        })
    }

    /// Most recently rendered pagination bar.
    #[must_use]
    pub fn last_pagination(&self) -> Option<&PaginationControls> {
        self.events.iter().rev().find_map(|event| match event {
            ViewEvent::Pagination(controls) => Some(controls),
            _ => None,
        })
    }

    /// Most recently rendered cart.
    #[must_use]
    pub fn last_cart(&self) -> Option<&CartView> {
        self.events.iter().rev().find_map(|event| match event {
            ViewEvent::Cart(cart) => Some(cart),
            _ => None,
        })
    }

    /// Messages of every notification shown so far.
    #[must_use]
    pub fn notifications(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ViewEvent::Notification(notification) => Some(notification.message.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl ViewNotifier for RecordingView {
    fn render_products(&mut self, products: &[Product]) {
        self.events
            .push(ViewEvent::Products(products.iter().map(|p| p.id).collect()));
    }

    fn render_pagination(&mut self, controls: &PaginationControls) {
        self.events.push(ViewEvent::Pagination(controls.clone()));
    }

    fn render_cart(&mut self, cart: &CartView) {
        self.events.push(ViewEvent::Cart(cart.clone()));
    }

    fn notify(&mut self, notification: &Notification) {
        self.events.push(ViewEvent::Notification(notification.clone()));
    }
}
