//! Cart store: the single owner of cart membership.
//!
//! Every mutation writes through to [`CartPersistence`] and returns a
//! [`CartChange`] describing what happened, which the coordinator hands to
//! the view. The store never touches the view itself.
//!
//! Removal is by sku: removing `MLB1` drops every line carrying that sku.
//! Repeated adds of the same sku stay separate lines.

use shopping_cart_core::{CartLine, Price, PriceError, Sku};
use thiserror::Error;
use tracing::debug;

use crate::persistence::{CartPersistence, PersistenceError};
use crate::storage::KeyValueStore;

/// Errors returned by cart mutations.
#[derive(Debug, Error)]
pub enum CartError {
    /// No line in the cart carries the requested sku.
    #[error("No cart line with sku {0}")]
    LineNotFound(Sku),

    /// The cart total would leave the supported price range.
    #[error("Cart total out of range: {0}")]
    Price(#[from] PriceError),

    /// The mutation could not be persisted; the cart is unchanged.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// The outcome of a successful cart mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    /// A line was appended.
    Added { line: CartLine, total: Price },
    /// Every line with `sku` was removed.
    Removed { sku: Sku, count: usize, total: Price },
    /// The cart was emptied.
    Cleared,
}

impl CartChange {
    /// Cart total after the change.
    #[must_use]
    pub const fn total(&self) -> Price {
        match self {
            Self::Added { total, .. } | Self::Removed { total, .. } => *total,
            Self::Cleared => Price::ZERO,
        }
    }
}

/// Ordered collection of cart lines backed by persistent storage.
///
/// The total is kept alongside the lines and only ever produced by checked
/// addition, so a cart whose prices would overflow can never be built.
#[derive(Debug)]
pub struct CartStore<S> {
    lines: Vec<CartLine>,
    total: Price,
    persistence: CartPersistence<S>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Create an empty cart. Nothing is read from storage; see
    /// [`CartPersistence::load`] for restoring a previous session.
    pub fn new(persistence: CartPersistence<S>) -> Self {
        Self {
            lines: Vec::new(),
            total: Price::ZERO,
            persistence,
        }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all sale prices; zero for an empty cart.
    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }

    /// The persistence adapter the store writes through.
    #[must_use]
    pub const fn persistence(&self) -> &CartPersistence<S> {
        &self.persistence
    }

    /// Append a line. When `persist` is false the storage is left alone, which
    /// is how lines restored from storage are replayed at startup.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Price` if the new total would be out of range and
    /// `CartError::Persistence` if the write fails. The line is not kept in
    /// either case.
    pub fn add_line(&mut self, line: CartLine, persist: bool) -> Result<CartChange, CartError> {
        let total = self.total.checked_add(line.sale_price)?;
        self.lines.push(line.clone());

        if persist && let Err(e) = self.persistence.save(&self.lines) {
            self.lines.pop();
            return Err(e.into());
        }
        self.total = total;

        debug!(sku = %line.sku, persist, lines = self.lines.len(), "cart line added");
        Ok(CartChange::Added { line, total })
    }

    /// Remove every line with `sku`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::LineNotFound` if no line matches, or
    /// `CartError::Persistence` if the write fails. Cart and storage are
    /// untouched in both cases.
    pub fn remove_line(&mut self, sku: &Sku) -> Result<CartChange, CartError> {
        let remaining: Vec<CartLine> = self
            .lines
            .iter()
            .filter(|line| line.sku != *sku)
            .cloned()
            .collect();
        let count = self.lines.len() - remaining.len();
        if count == 0 {
            return Err(CartError::LineNotFound(sku.clone()));
        }

        let total = Price::checked_sum(remaining.iter().map(|line| line.sale_price))?;
        self.persistence.save(&remaining)?;
        self.lines = remaining;
        self.total = total;

        debug!(sku = %sku, count, lines = self.lines.len(), "cart lines removed");
        Ok(CartChange::Removed {
            sku: sku.clone(),
            count,
            total,
        })
    }

    /// Remove every line.
    ///
    /// # Errors
    ///
    /// Returns the persistence error if the write fails; the cart is untouched.
    pub fn clear(&mut self) -> Result<CartChange, PersistenceError> {
        self.persistence.save(&[])?;

        debug!(removed = self.lines.len(), "cart cleared");
        self.lines.clear();
        self.total = Price::ZERO;
        Ok(CartChange::Cleared)
    }
}
