//! Core types for the shopping cart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod price;
pub mod product;
pub mod sku;

pub use cart::CartLine;
pub use price::{Price, PriceError};
pub use product::Product;
pub use sku::{Sku, SkuError};
