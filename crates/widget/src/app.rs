//! Application context: wires the catalog, cart store and view together.
//!
//! The entry point builds one [`App`] and owns it; nothing is global. The
//! view reports user intent as [`ViewEvent`] values on a channel and the
//! app is the only thing that turns them into cart mutations.
//!
//! ```rust,ignore
//! let (events_tx, events_rx) = view::event_channel();
//! let mut app = App::new(
//!     config.clone(),
//!     CatalogClient::new(&config),
//!     FileStore::new(&config.storage_dir),
//!     MemoryView::new(events_tx),
//!     events_rx,
//! );
//!
//! app.start().await?;
//! // ... user clicks ...
//! app.run_pending().await;
//! ```

use shopping_cart_core::{CartLine, Price};
use tracing::{debug, error, info, instrument, warn};

use crate::cart::{CartError, CartStore};
use crate::catalog::CatalogClient;
use crate::config::WidgetConfig;
use crate::error::Result;
use crate::persistence::CartPersistence;
use crate::storage::KeyValueStore;
use crate::view::{EventReceiver, ViewEvent, ViewSynchronizer, ViewTree};

/// The running widget.
pub struct App<S, V> {
    config: WidgetConfig,
    catalog: CatalogClient,
    cart: CartStore<S>,
    view: ViewSynchronizer<V>,
    events: EventReceiver,
}

impl<S: KeyValueStore, V: ViewTree> App<S, V> {
    /// Create the application context.
    ///
    /// `events` must be the receiving end of the channel `view` sends activations on.
    pub fn new(
        config: WidgetConfig,
        catalog: CatalogClient,
        store: S,
        view: V,
        events: EventReceiver,
    ) -> Self {
        let persistence = CartPersistence::new(store, config.storage_key.clone());

        Self {
            config,
            catalog,
            cart: CartStore::new(persistence),
            view: ViewSynchronizer::new(view),
            events,
        }
    }

    /// Widget configuration.
    #[must_use]
    pub const fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// The cart store.
    #[must_use]
    pub const fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    /// The view synchronizer.
    #[must_use]
    pub const fn view(&self) -> &ViewSynchronizer<V> {
        &self.view
    }

    /// Restore the cart, then populate the product list with the configured query.
    ///
    /// # Errors
    ///
    /// Returns the catalog error if the product search fails. The restored
    /// cart stays rendered either way.
    pub async fn start(&mut self) -> Result<()> {
        self.restore_cart();
        let query = self.config.search_query.clone();
        self.load_products(&query).await?;
        Ok(())
    }

    /// Replay the persisted cart into the store and the view.
    ///
    /// A corrupted stored value, including one whose total is out of range,
    /// is logged and treated as an empty cart; the next mutation overwrites it. Returns the number of restored lines.
    pub fn restore_cart(&mut self) -> usize {
        let lines = match self.stored_lines() {
            Ok(lines) => lines,
            Err(e) => {
                warn!(
                    error = %e,
                    key = %self.config.storage_key,
                    "Stored cart unreadable, starting with an empty cart"
                );
                Vec::new()
            }
        };

        let count = lines.len();
        for line in lines {
            match self.cart.add_line(line, false) {
                Ok(change) => self.view.apply(&change),
                Err(e) => error!(error = %e, "Failed to restore cart line"),
            }
        }
        self.view.render_total(self.cart.total());

        info!(lines = count, "cart restored");
        count
    }

    /// The persisted lines, provided their total is representable.
    fn stored_lines(&self) -> Result<Vec<CartLine>> {
        let lines = self.cart.persistence().load()?;
        Price::checked_sum(lines.iter().map(|line| line.sale_price)).map_err(CartError::from)?;
        Ok(lines)
    }

    /// Search the catalog and render the results as product cards.
    ///
    /// The busy indicator is shown for the duration of the request and is
    /// hidden again whether or not it succeeds.
    ///
    /// # Errors
    ///
    /// Returns the catalog error; nothing is rendered in that case.
    #[instrument(skip(self))]
    pub async fn load_products(&mut self, query: &str) -> Result<usize> {
        self.view.show_busy();
        let result = self.catalog.search(query).await;
        self.view.hide_busy();

        let products = result?;
        self.view.render_product_list(&products);
        Ok(products.len())
    }

    /// Perform the cart mutation a view event asks for.
    ///
    /// Removing a sku that is no longer in the cart is a no-op.
    ///
    /// # Errors
    ///
    /// Returns the catalog error if the item lookup for an add fails, or the
    /// persistence error if the mutation cannot be saved. Cart, storage and
    /// view are unchanged in both cases.
    #[instrument(skip(self))]
    pub async fn handle(&mut self, event: ViewEvent) -> Result<()> {
        match event {
            ViewEvent::AddToCart { item_id } => {
                self.view.show_busy();
                let result = self.catalog.fetch_item(&item_id).await;
                self.view.hide_busy();

                let change = self.cart.add_line(result?, true)?;
                self.view.apply(&change);
            }
            ViewEvent::RemoveFromCart { sku } => match self.cart.remove_line(&sku) {
                Ok(change) => self.view.apply(&change),
                Err(CartError::LineNotFound(sku)) => {
                    debug!(sku = %sku, "remove requested for a line no longer in the cart");
                }
                Err(e) => return Err(e.into()),
            },
            ViewEvent::EmptyCart => {
                let change = self.cart.clear()?;
                self.view.apply(&change);
            }
        }
        Ok(())
    }

    /// Handle every event already queued by the view, in order.
    ///
    /// A failing event is logged and does not stop the ones after it.
    /// Returns the number of events that failed.
    pub async fn run_pending(&mut self) -> usize {
        let mut failures = 0;
        while let Ok(event) = self.events.try_recv() {
            if let Err(e) = self.handle(event).await {
                error!(error = %e, "view event failed");
                failures += 1;
            }
        }
        failures
    }
}
