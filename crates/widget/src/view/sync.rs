//! Renders products, cart lines, the total and the busy indicator.

use shopping_cart_core::{CartLine, Price, Product, Sku};
use tracing::debug;

use super::{NodeId, Region, ViewEvent, ViewTree};
use crate::cart::CartChange;

const ADD_LABEL: &str = "Add to cart";
const BUSY_TEXT: &str = "loading...";

/// Keeps a [`ViewTree`] in step with the cart.
///
/// Holds no copy of the cart: cart line nodes carry their sku in a
/// `data-sku` attribute, which is all removal needs.
#[derive(Debug)]
pub struct ViewSynchronizer<V> {
    view: V,
    busy: Option<NodeId>,
}

impl<V: ViewTree> ViewSynchronizer<V> {
    /// Wrap a view tree.
    pub const fn new(view: V) -> Self {
        Self { view, busy: None }
    }

    /// The underlying view tree.
    #[must_use]
    pub const fn view(&self) -> &V {
        &self.view
    }

    /// Unwrap the underlying view tree.
    #[must_use]
    pub fn into_view(self) -> V {
        self.view
    }

    /// Append a card per product to the product region.
    pub fn render_product_list(&mut self, products: &[Product]) {
        let region = self.view.region(Region::Products);
        for product in products {
            let card = self.product_card(product);
            self.view.append_child(region, card);
        }
        debug!(count = products.len(), "product list rendered");
    }

    fn product_card(&mut self, product: &Product) -> NodeId {
        let section = self.element("section", "item", None);

        let sku = self.element("span", "item__sku", Some(product.sku.as_str()));
        let title = self.element("span", "item__title", Some(&product.name));
        let image = self.element("img", "item__image", None);
        self.view.set_attribute(image, "src", &product.image);
        let add = self.element("button", "item__add", Some(ADD_LABEL));
        self.view.bind(
            add,
            ViewEvent::AddToCart {
                item_id: product.sku.clone(),
            },
        );

        for child in [sku, title, image, add] {
            self.view.append_child(section, child);
        }
        section
    }

    /// Append a cart line; activating it requests removal of its sku.
    pub fn render_cart_line(&mut self, line: &CartLine) -> NodeId {
        let text = format!(
            "SKU: {} | NAME: {} | PRICE: ${}",
            line.sku, line.name, line.sale_price
        );
        let li = self.element("li", "cart__item", Some(&text));
        self.view.set_attribute(li, "data-sku", line.sku.as_str());
        self.view.bind(
            li,
            ViewEvent::RemoveFromCart {
                sku: line.sku.clone(),
            },
        );

        let region = self.view.region(Region::CartLines);
        self.view.append_child(region, li);
        li
    }

    /// Remove every rendered cart line for `sku`. Returns how many were removed.
    pub fn remove_cart_lines(&mut self, sku: &Sku) -> usize {
        let region = self.view.region(Region::CartLines);
        let matching: Vec<NodeId> = self
            .view
            .children(region)
            .into_iter()
            .filter(|node| self.view.attribute(*node, "data-sku") == Some(sku.as_str()))
            .collect();

        for node in &matching {
            self.view.remove(*node);
        }
        matching.len()
    }

    /// Remove every rendered cart line.
    pub fn clear_cart_lines(&mut self) {
        let region = self.view.region(Region::CartLines);
        for node in self.view.children(region) {
            self.view.remove(node);
        }
    }

    /// Show `total` in the total region.
    pub fn render_total(&mut self, total: Price) {
        let region = self.view.region(Region::Total);
        self.view.set_text(region, &total.to_string());
    }

    /// Reflect a cart mutation: update the cart list, then the total.
    pub fn apply(&mut self, change: &CartChange) {
        match change {
            CartChange::Added { line, .. } => {
                self.render_cart_line(line);
            }
            CartChange::Removed { sku, .. } => {
                self.remove_cart_lines(sku);
            }
            CartChange::Cleared => self.clear_cart_lines(),
        }
        self.render_total(change.total());
    }

    /// Show the loading indicator. Showing it twice keeps a single indicator.
    pub fn show_busy(&mut self) {
        if self.busy.is_some() {
            return;
        }
        let indicator = self.element("span", "loading", Some(BUSY_TEXT));
        let region = self.view.region(Region::Products);
        self.view.append_child(region, indicator);
        self.busy = Some(indicator);
    }

    /// Hide the loading indicator. One call clears it regardless of how many
    /// times it was shown; hiding when idle does nothing.
    pub fn hide_busy(&mut self) {
        if let Some(indicator) = self.busy.take() {
            self.view.remove(indicator);
        }
    }

    /// Whether the loading indicator is showing.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy.is_some()
    }

    fn element(&mut self, tag: &str, class: &str, text: Option<&str>) -> NodeId {
        let node = self.view.create_element(tag);
        self.view.set_attribute(node, "class", class);
        if let Some(text) = text {
            self.view.set_text(node, text);
        }
        node
    }
}
