//! Cart persistence adapter.
//!
//! The cart is stored as a JSON array of flat line records under one fixed
//! key. Loading never fails: anything unreadable is logged and replaced by an
//! empty cart.

use std::collections::HashSet;

use simple_shop_core::{CartLine, ProductId, Totals};
use thiserror::Error;

use crate::storage::{DurableStorage, StorageError};

/// Reasons a stored cart is discarded.
#[derive(Debug, Error)]
pub enum CartDecodeError {
    /// Storage could not be read.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Value is not a JSON array of cart lines.
    #[error("Malformed cart: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Two lines share a product id.
    #[error("Duplicate cart line for product {0}")]
    DuplicateLine(ProductId),

    /// A line total or the cart total does not fit in a decimal.
    #[error("Cart total overflows")]
    TotalOverflow,
}

/// Read the cart stored under `key`.
///
/// Returns an empty cart if the key is absent, the storage is unavailable,
/// or the stored value does not decode to a valid cart.
pub fn load_cart<S: DurableStorage + ?Sized>(storage: &S, key: &str) -> Vec<CartLine> {
    match try_load_cart(storage, key) {
        Ok(lines) => lines,
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding unreadable stored cart");
            Vec::new()
        }
    }
}

/// Serialize the full cart and write it under `key`, replacing any prior value.
///
/// # Errors
///
/// Returns an error if the cart cannot be serialized or written.
pub fn save_cart<S: DurableStorage + ?Sized>(
    storage: &mut S,
    key: &str,
    lines: &[CartLine],
) -> Result<(), StorageError> {
    let json = serde_json::to_string(lines)?;
    storage.set(key, &json)
}

fn try_load_cart<S: DurableStorage + ?Sized>(
    storage: &S,
    key: &str,
) -> Result<Vec<CartLine>, CartDecodeError> {
    let Some(raw) = storage.get(key)? else {
        return Ok(Vec::new());
    };
    decode_cart(&raw)
}

/// Parse a stored cart and check the cart invariants: one line per product
/// and totals that can be computed.
fn decode_cart(raw: &str) -> Result<Vec<CartLine>, CartDecodeError> {
    let lines: Vec<CartLine> = serde_json::from_str(raw)?;

    let mut seen = HashSet::with_capacity(lines.len());
    if let Some(duplicate) = lines.iter().find(|line| !seen.insert(line.id)) {
        return Err(CartDecodeError::DuplicateLine(duplicate.id));
    }

    if Totals::from_lines(&lines).is_none() {
        return Err(CartDecodeError::TotalOverflow);
    }

    Ok(lines)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use simple_shop_core::{Price, Product, Quantity};

    use super::*;
    use crate::storage::MemoryStorage;

    const KEY: &str = "cart";

    fn line(id: i32, cents: i64, quantity: u32) -> CartLine {
        let mut line = CartLine::snapshot(&Product {
            id: ProductId::new(id),
            name: format!("Item {id}"),
            description: format!("Description {id}"),
            image: format!("images/{id}.jpg"),
            price: Price::from_cents(cents),
        });
        line.quantity = Quantity::new(quantity).unwrap();
        line
    }

    fn storage_with(raw: &str) -> MemoryStorage {
        let mut storage = MemoryStorage::new();
        storage.set(KEY, raw).unwrap();
        storage
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let cart = vec![line(1, 233, 3), line(2, 1999, 1)];
        let mut storage = MemoryStorage::new();

        save_cart(&mut storage, KEY, &cart).unwrap();
        assert_eq!(load_cart(&storage, KEY), cart);
    }

    #[test]
    fn test_save_overwrites_previous_value() {
        let mut storage = MemoryStorage::new();
        save_cart(&mut storage, KEY, &[line(1, 100, 1)]).unwrap();
        save_cart(&mut storage, KEY, &[]).unwrap();

        assert_eq!(storage.get(KEY).unwrap().as_deref(), Some("[]"));
        assert!(load_cart(&storage, KEY).is_empty());
    }

    #[test]
    fn test_absent_key_is_empty_cart() {
        assert!(load_cart(&MemoryStorage::new(), KEY).is_empty());
    }

    #[test]
    fn test_non_json_is_empty_cart() {
        assert!(load_cart(&storage_with("definitely not json"), KEY).is_empty());
    }

    #[test]
    fn test_wrong_shape_is_empty_cart() {
        for raw in [
            r#"{"id": 1}"#,
            "null",
            r#"[{"id": 1, "name": "missing the rest"}]"#,
            r#"[{"id": "1", "name": "", "description": "", "image": "", "price": 1, "quantity": 1}]"#,
        ] {
            assert!(load_cart(&storage_with(raw), KEY).is_empty(), "{raw}");
        }
    }

    #[test]
    fn test_zero_quantity_is_empty_cart() {
        let raw = r#"[{"id": 1, "name": "a", "description": "", "image": "", "price": 1, "quantity": 0}]"#;
        assert!(load_cart(&storage_with(raw), KEY).is_empty());
    }

    #[test]
    fn test_duplicate_lines_are_rejected() {
        let raw = serde_json::to_string(&[line(4, 100, 1), line(4, 100, 2)]).unwrap();
        assert!(matches!(
            decode_cart(&raw),
            Err(CartDecodeError::DuplicateLine(id)) if id == ProductId::new(4)
        ));
        assert!(load_cart(&storage_with(&raw), KEY).is_empty());
    }

    #[test]
    fn test_numeric_prices_from_older_saves_are_accepted() {
        let raw = r#"[{"id": 1, "name": "a", "description": "b", "image": "c", "price": 2.33, "quantity": 3}]"#;
        let cart = load_cart(&storage_with(raw), KEY);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].line_total(), Some(Price::from_cents(699)));
    }

    #[test]
    fn test_overflowing_line_total_is_empty_cart() {
        let raw = r#"[{"id": 1, "name": "a", "description": "", "image": "", "price": "70000000000000000000000000000", "quantity": 2}]"#;
        assert!(matches!(decode_cart(raw), Err(CartDecodeError::TotalOverflow)));
        assert!(load_cart(&storage_with(raw), KEY).is_empty());
    }

    #[test]
    fn test_overflowing_cart_total_is_empty_cart() {
        let raw = r#"[
            {"id": 1, "name": "a", "description": "", "image": "", "price": "50000000000000000000000000000", "quantity": 1},
            {"id": 2, "name": "b", "description": "", "image": "", "price": "50000000000000000000000000000", "quantity": 1}
        ]"#;
        assert!(matches!(decode_cart(raw), Err(CartDecodeError::TotalOverflow)));
        assert!(load_cart(&storage_with(raw), KEY).is_empty());
    }
}
