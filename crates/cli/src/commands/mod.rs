//! CLI commands.
//!
//! Every command opens a [`Session`], which restores the cart from the file
//! store exactly as the widget does on page load.

pub mod browse;
pub mod cart;

use shopping_cart_widget::App;
use shopping_cart_widget::WidgetConfig;
use shopping_cart_widget::catalog::CatalogClient;
use shopping_cart_widget::storage::FileStore;
use shopping_cart_widget::view::{MemoryView, event_channel};

/// A widget instance backed by the file store and an in-memory view.
pub struct Session {
    pub app: App<FileStore, MemoryView>,
}

impl Session {
    /// Build the application context and restore the persisted cart.
    pub fn open(config: &WidgetConfig) -> Self {
        let (events_tx, events_rx) = event_channel();
        let mut app = App::new(
            config.clone(),
            CatalogClient::new(config),
            FileStore::new(&config.storage_dir),
            MemoryView::new(events_tx),
            events_rx,
        );
        app.restore_cart();

        Self { app }
    }
}
