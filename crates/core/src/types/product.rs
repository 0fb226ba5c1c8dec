//! Catalog product shown as a card in the product list.

use serde::{Deserialize, Serialize};

use crate::Sku;

/// A product returned by a catalog search.
///
/// Read-only: products only live for the rendering pass that displays them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier.
    pub sku: Sku,
    /// Display title.
    pub name: String,
    /// Thumbnail URL.
    pub image: String,
}
