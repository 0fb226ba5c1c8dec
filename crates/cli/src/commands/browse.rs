//! Product listing.

use std::fmt::Write as _;

use shopping_cart_widget::AppError;
use shopping_cart_widget::view::{Region, ViewTree};

use super::Session;

/// Search the catalog (configured query unless `query` is given) and print the cards.
pub async fn run(session: &mut Session, query: Option<&str>) -> Result<(), AppError> {
    let query = query.map_or_else(|| session.app.config().search_query.clone(), str::to_string);
    let count = session.app.load_products(&query).await?;
    tracing::info!(count, query = %query, "products loaded");

    print_products(session);
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_products(session: &Session) {
    print!("{}", format_products(session));
}

/// One `sku  title` row per rendered product card.
pub fn format_products(session: &Session) -> String {
    let view = session.app.view().view();
    let mut out = String::new();

    for card in view.children(view.region(Region::Products)) {
        let parts = view.children(card);
        let field = |class: &str| {
            parts
                .iter()
                .find(|node| view.attribute(**node, "class") == Some(class))
                .and_then(|node| view.text(*node))
                .unwrap_or_default()
        };
        let _ = writeln!(out, "{:<16} {}", field("item__sku"), field("item__title"));
    }
    out
}
