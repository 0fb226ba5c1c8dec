//! Cart persistence on top of a [`KeyValueStore`].
//!
//! The cart is stored as a JSON array of `{ "sku", "name", "salePrice" }`
//! objects under a single key, overwritten on every mutation and read back
//! once at startup.

use std::io;

use shopping_cart_core::CartLine;
use thiserror::Error;
use tracing::debug;

use crate::storage::KeyValueStore;

/// Errors that can occur when saving or loading the cart.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The backing store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] io::Error),

    /// The stored value is not a valid cart.
    #[error("Stored cart is corrupted: {0}")]
    Parse(serde_json::Error),

    /// The cart could not be encoded.
    #[error("Failed to encode cart: {0}")]
    Encode(serde_json::Error),
}

/// Reads and writes the cart under a fixed key.
#[derive(Debug, Clone)]
pub struct CartPersistence<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> CartPersistence<S> {
    /// Create an adapter writing to `key` in `store`.
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The key the cart is stored under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Serialize `lines` and overwrite the stored value.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Encode` if serialization fails and
    /// `PersistenceError::Storage` if the store rejects the write.
    pub fn save(&self, lines: &[CartLine]) -> Result<(), PersistenceError> {
        let encoded = serde_json::to_string(lines).map_err(PersistenceError::Encode)?;
        self.store.set(&self.key, &encoded)?;
        debug!(key = %self.key, lines = lines.len(), "cart saved");
        Ok(())
    }

    /// Read the stored cart. A missing key is an empty cart.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Parse` if the stored value is malformed and
    /// `PersistenceError::Storage` if the store cannot be read.
    pub fn load(&self) -> Result<Vec<CartLine>, PersistenceError> {
        let Some(raw) = self.store.get(&self.key)? else {
            debug!(key = %self.key, "no stored cart");
            return Ok(Vec::new());
        };

        serde_json::from_str(&raw).map_err(PersistenceError::Parse)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopping_cart_core::{Price, Sku};

    use super::*;
    use crate::storage::MemoryStore;

    fn line(sku: &str, name: &str, price: u32) -> CartLine {
        CartLine::new(Sku::parse(sku).unwrap(), name, Price::from_units(price))
    }

    #[test]
    fn test_load_without_key_is_empty() {
        let persistence = CartPersistence::new(MemoryStore::new(), "cart");
        assert!(persistence.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_preserves_order() {
        let persistence = CartPersistence::new(MemoryStore::new(), "cart");
        let lines = vec![
            line("MLB2", "Mouse", 50),
            line("MLB1", "PC", 1000),
            line("MLB2", "Mouse", 50),
        ];

        persistence.save(&lines).unwrap();
        assert_eq!(persistence.load().unwrap(), lines);
    }

    #[test]
    fn test_save_overwrites() {
        let persistence = CartPersistence::new(MemoryStore::new(), "cart");
        persistence.save(&[line("MLB1", "PC", 1000)]).unwrap();
        persistence.save(&[]).unwrap();

        assert_eq!(
            persistence.store().get("cart").unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_stored_layout() {
        let persistence = CartPersistence::new(MemoryStore::new(), "cart");
        persistence.save(&[line("MLB1", "PC", 1000)]).unwrap();

        let raw = persistence.store().get("cart").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["sku"], "MLB1");
        assert_eq!(value[0]["name"], "PC");
        assert_eq!(value[0]["salePrice"].as_f64(), Some(1000.0));
    }

    #[test]
    fn test_corrupted_value_is_parse_error() {
        let persistence = CartPersistence::new(MemoryStore::with_entry("cart", "{not json"), "cart");
        assert!(matches!(
            persistence.load(),
            Err(PersistenceError::Parse(_))
        ));
    }

    #[test]
    fn test_wrong_shape_is_parse_error() {
        let persistence =
            CartPersistence::new(MemoryStore::with_entry("cart", r#"[{"sku":"MLB1"}]"#), "cart");
        assert!(matches!(
            persistence.load(),
            Err(PersistenceError::Parse(_))
        ));
    }
}
