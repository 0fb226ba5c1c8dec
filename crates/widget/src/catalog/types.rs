//! Wire types for the catalog API responses.
//!
//! Only the fields the widget reads are declared; anything else in the
//! payload is ignored. Missing or ill-typed fields fail deserialization.

use serde::Deserialize;
use shopping_cart_core::{Price, Sku};

/// Response of `GET /sites/{site}/search?q=...`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
}

/// A single search hit.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    pub id: Sku,
    pub title: String,
    pub thumbnail: String,
}

/// Response of `GET /items/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemDetail {
    pub id: Sku,
    pub title: String,
    pub price: Price,
}
