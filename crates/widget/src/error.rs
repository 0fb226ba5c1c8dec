//! Unified error handling.
//!
//! Each component has its own error enum; `AppError` wraps them so the
//! coordinator and the entry points can use a single `Result` type.

use thiserror::Error;

use crate::cart::CartError;
use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::persistence::PersistenceError;

/// Application-level error type for the widget.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog API operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Cart mutation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Persisting or restoring the cart failed.
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

impl AppError {
    /// Whether the error came from the network rather than local state.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Catalog(CatalogError::Transport(_)))
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
