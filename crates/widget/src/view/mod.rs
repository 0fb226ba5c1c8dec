//! View layer: an abstract view tree plus the synchronizer that keeps it in
//! step with the cart.
//!
//! # Architecture
//!
//! - [`ViewTree`] is the only surface the widget renders into; a browser DOM,
//!   a terminal or the in-memory [`MemoryView`] can sit behind it
//! - Interactive nodes are bound to a [`ViewEvent`] value; activating the node
//!   hands that value to the coordinator over an [`EventSender`] instead of
//!   mutating the cart directly
//! - [`ViewSynchronizer`] owns the view and knows the widget's markup

mod memory;
mod sync;

pub use memory::MemoryView;
pub use sync::ViewSynchronizer;

use shopping_cart_core::Sku;
use tokio::sync::mpsc;

/// Sending half of the view → coordinator channel.
pub type EventSender = mpsc::UnboundedSender<ViewEvent>;

/// Receiving half of the view → coordinator channel.
pub type EventReceiver = mpsc::UnboundedReceiver<ViewEvent>;

/// Create the channel interactive nodes report activations on.
#[must_use]
pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// A user intent produced by the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// "Add" was activated on a product card.
    AddToCart { item_id: Sku },
    /// A cart line was activated.
    RemoveFromCart { sku: Sku },
    /// The empty-cart trigger was activated.
    EmptyCart,
}

/// Handle to a node in a [`ViewTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// Create a node handle from a backend-specific number.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The backend-specific number.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Fixed regions of the widget's page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Product cards (`section.items`).
    Products,
    /// Cart lines (`ol.cart__items`).
    CartLines,
    /// Total price text (`span.total-price`).
    Total,
    /// Empty-cart trigger (`button.empty-cart`).
    EmptyCart,
}

impl Region {
    /// Class name of the region's container.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Products => "items",
            Self::CartLines => "cart__items",
            Self::Total => "total-price",
            Self::EmptyCart => "empty-cart",
        }
    }
}

/// Minimal tree-mutation surface the widget renders through.
///
/// Operations on nodes that no longer exist are ignored, the way a detached
/// DOM node swallows updates.
pub trait ViewTree {
    /// Container node of a fixed region.
    fn region(&self, region: Region) -> NodeId;

    /// Create a detached element.
    fn create_element(&mut self, tag: &str) -> NodeId;

    /// Set an attribute (`class`, `src`, `data-*`, ...).
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    /// Read an attribute.
    fn attribute(&self, node: NodeId, name: &str) -> Option<&str>;

    /// Replace the node's text content.
    fn set_text(&mut self, node: NodeId, text: &str);

    /// Read the node's own text content.
    fn text(&self, node: NodeId) -> Option<&str>;

    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: NodeId, child: NodeId);

    /// Detach and drop `node` and its subtree.
    fn remove(&mut self, node: NodeId);

    /// Children of `node`, in order.
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Emit `event` whenever `node` is activated.
    fn bind(&mut self, node: NodeId, event: ViewEvent);
}
