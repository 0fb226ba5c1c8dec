//! Catalog wire type conversions.

use shopping_cart_core::{CartLine, Product};

use super::types::{ItemDetail, SearchResult};

impl From<SearchResult> for Product {
    fn from(result: SearchResult) -> Self {
        Self {
            sku: result.id,
            name: result.title,
            image: result.thumbnail,
        }
    }
}

impl From<ItemDetail> for CartLine {
    fn from(item: ItemDetail) -> Self {
        Self::new(item.id, item.title, item.price)
    }
}
