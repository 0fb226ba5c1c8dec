//! Cart mutations and cart display.

use std::fmt::Write as _;

use shopping_cart_core::Sku;
use shopping_cart_widget::AppError;
use shopping_cart_widget::view::{Region, ViewEvent, ViewTree};

use super::Session;

/// Look up `item_id` and append it to the cart.
pub async fn add(session: &mut Session, item_id: Sku) -> Result<(), AppError> {
    session.app.handle(ViewEvent::AddToCart { item_id }).await
}

/// Remove every line with `sku`. Unknown skus are a no-op.
pub async fn remove(session: &mut Session, sku: Sku) -> Result<(), AppError> {
    session.app.handle(ViewEvent::RemoveFromCart { sku }).await
}

/// Remove every line.
pub async fn empty(session: &mut Session) -> Result<(), AppError> {
    session.app.handle(ViewEvent::EmptyCart).await
}

#[allow(clippy::print_stdout)]
pub fn print_cart(session: &Session) {
    print!("{}", format_cart(session));
}

/// Rendered cart lines followed by the total, as shown in the view.
pub fn format_cart(session: &Session) -> String {
    let view = session.app.view().view();
    let mut out = String::new();

    let lines = view.children(view.region(Region::CartLines));
    if lines.is_empty() {
        out.push_str("(cart is empty)\n");
    }
    for line in lines {
        let _ = writeln!(out, "{}", view.text(line).unwrap_or_default());
    }

    let total = view.text(view.region(Region::Total)).unwrap_or("0");
    let _ = writeln!(out, "Total: ${total}");
    out
}
