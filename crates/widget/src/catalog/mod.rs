//! Catalog API client.
//!
//! # Architecture
//!
//! - Plain `GET` requests with `reqwest`, bodies parsed with `serde_json`
//! - One request per call: no retries, no timeout, no caching
//! - Every failure is returned to the caller as a [`CatalogError`]
//!
//! # Endpoints
//!
//! - `GET {api_base}/sites/{site_id}/search?q={query}` - product listing
//! - `GET {api_base}/items/{item_id}` - single item with its sale price
//!
//! # Example
//!
//! ```rust,ignore
//! use shopping_cart_widget::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config);
//!
//! let products = client.search("computador").await?;
//! let line = client.fetch_item(&products[0].sku).await?;
//! ```

mod conversions;
pub mod types;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use shopping_cart_core::{CartLine, Product, Sku};
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::WidgetConfig;

use types::{ItemDetail, SearchResponse};

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request never produced a readable response.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body is not the JSON document we expected.
    #[error("Response parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for the remote product catalog.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    api_base: Url,
    site_id: String,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &WidgetConfig) -> Self {
        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                api_base: config.api_base.clone(),
                site_id: config.site_id.clone(),
            }),
        }
    }

    /// Search the catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Transport` if the API cannot be reached and
    /// `CatalogError::Parse` if the body is not a search response.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, CatalogError> {
        let mut url = self.endpoint(&["sites", &self.inner.site_id, "search"]);
        url.query_pairs_mut().append_pair("q", query);

        let response: SearchResponse = self.get_json(url).await?;
        debug!(count = response.results.len(), "catalog search returned");

        Ok(response.results.into_iter().map(Product::from).collect())
    }

    /// Look up a single item and resolve it into a cart line.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Transport` if the API cannot be reached and
    /// `CatalogError::Parse` if the body is not an item document.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn fetch_item(&self, item_id: &Sku) -> Result<CartLine, CatalogError> {
        let url = self.endpoint(&["items", item_id.as_str()]);
        let item: ItemDetail = self.get_json(url).await?;

        Ok(CartLine::from(item))
    }

    /// Build an endpoint URL below the configured base, percent-encoding segments.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.inner.api_base.clone();
        // The configured base is validated to be a base URL, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Execute a GET request and parse the body as JSON.
    ///
    /// The body is parsed regardless of HTTP status: the API answers errors with
    /// JSON documents of a different shape, which surface as parse errors.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CatalogError> {
        debug!(url = %url, "catalog request");

        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                status = %status,
                body = %body.chars().take(200).collect::<String>(),
                "Catalog API returned non-success status"
            );
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }
}
