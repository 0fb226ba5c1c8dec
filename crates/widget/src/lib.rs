//! Shopping cart widget library.
//!
//! Fetches a product catalog, renders product cards, and keeps the cart,
//! its persisted copy, the rendered cart list and the displayed total in
//! step with each other.
//!
//! # Modules
//!
//! - [`catalog`] - Catalog API client (search and item lookup)
//! - [`cart`] - Cart store, the single owner of cart membership
//! - [`persistence`] / [`storage`] - Cart serialization over a key-value store
//! - [`view`] - Abstract view tree, in-memory backend and synchronizer
//! - [`app`] - Application context wiring the above together

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod persistence;
pub mod storage;
pub mod telemetry;
pub mod view;

pub use app::App;
pub use config::WidgetConfig;
pub use error::{AppError, Result};
