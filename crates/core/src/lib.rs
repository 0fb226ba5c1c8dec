//! Shopping Cart Core - Shared domain types.
//!
//! This crate provides the types shared by every shopping cart component:
//! - `widget` - Catalog client, cart store, persistence and view synchronization
//! - `cli` - Command-line entry point driving the widget
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for SKUs and prices, plus the product and cart line records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
