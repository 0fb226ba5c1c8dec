//! Integration tests for the shopping cart widget.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopping-cart-integration-tests
//! ```
//!
//! Every test drives a real [`App`] against a [`MockCatalog`], a local
//! `tiny_http` server answering the two catalog endpoints from fixed JSON.
//!
//! # Test Categories
//!
//! - `cart_scenarios` - cart mutations, persistence and rendering
//! - `catalog_failures` - transport and parse failures surfacing to the caller

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use shopping_cart_widget::App;
use shopping_cart_widget::WidgetConfig;
use shopping_cart_widget::catalog::CatalogClient;
use shopping_cart_widget::storage::KeyValueStore;
use shopping_cart_widget::view::{MemoryView, event_channel};
use url::Url;

/// A local catalog API serving canned JSON bodies by path.
///
/// Unknown paths answer `404` with a JSON error document, like the real API.
pub struct MockCatalog {
    base: Url,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockCatalog {
    /// Start a server answering `routes` (path without query string -> body).
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    #[must_use]
    pub fn start(routes: &[(&str, &str)]) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("bind mock catalog");
        let port = server
            .server_addr()
            .to_ip()
            .map(|addr| addr.port())
            .expect("mock catalog listens on TCP");

        let routes: HashMap<String, String> = routes
            .iter()
            .map(|(path, body)| ((*path).to_string(), (*body).to_string()))
            .collect();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        thread::spawn(move || {
            while let Ok(Some(request)) = server.recv_timeout(Duration::from_secs(10)) {
                let url = request.url().to_string();
                let path = url.split('?').next().unwrap_or_default().to_string();
                if let Ok(mut seen) = seen.lock() {
                    seen.push(url);
                }

                let (status, body) = routes.get(&path).map_or_else(
                    || (404, r#"{"message":"resource not found","status":404}"#.to_string()),
                    |body| (200, body.clone()),
                );
                let response = tiny_http::Response::from_string(body)
                    .with_status_code(status)
                    .with_header(json_header());
                let _ = request.respond(response);
            }
        });

        Self {
            base: Url::parse(&format!("http://127.0.0.1:{port}"))
                .expect("mock catalog URL is valid"),
            requests,
        }
    }

    /// Base URL to configure the widget with.
    #[must_use]
    pub fn base(&self) -> Url {
        self.base.clone()
    }

    /// Every request URL (path and query) received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

fn json_header() -> tiny_http::Header {
    tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
        .expect("static header is valid")
}

/// A base URL nothing listens on.
///
/// # Panics
///
/// Panics if no local port can be bound.
#[must_use]
pub fn dead_api_base() -> Url {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .map(|addr| addr.port())
        .expect("bind probe port");
    Url::parse(&format!("http://127.0.0.1:{port}")).expect("probe URL is valid")
}

/// Search response body with one hit per `(id, title)`.
#[must_use]
pub fn search_body(hits: &[(&str, &str)]) -> String {
    let results: Vec<serde_json::Value> = hits
        .iter()
        .map(|(id, title)| {
            serde_json::json!({
                "id": id,
                "title": title,
                "thumbnail": format!("http://img.example/{id}.jpg"),
                "price": 1,
            })
        })
        .collect();
    serde_json::json!({ "query": "computador", "results": results }).to_string()
}

/// Item response body.
#[must_use]
pub fn item_body(id: &str, title: &str, price: f64) -> String {
    serde_json::json!({ "id": id, "title": title, "price": price, "currency_id": "BRL" })
        .to_string()
}

/// Build an app against `api_base` over `store`, with an in-memory view.
#[must_use]
pub fn app<S: KeyValueStore>(api_base: Url, store: S) -> App<S, MemoryView> {
    let config = WidgetConfig::default().with_api_base(api_base);
    let (events_tx, events_rx) = event_channel();
    App::new(
        config.clone(),
        CatalogClient::new(&config),
        store,
        MemoryView::new(events_tx),
        events_rx,
    )
}
