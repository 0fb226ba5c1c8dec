//! End-to-end cart scenarios against a mock catalog.
//!
//! Each test starts its own `tiny_http` catalog on a free port, so they run
//! in parallel without any external setup.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use shopping_cart_core::{CartLine, Price, PriceError, Sku};
use shopping_cart_integration_tests::{MockCatalog, app, item_body, search_body};
use shopping_cart_widget::cart::CartError;
use shopping_cart_widget::persistence::CartPersistence;
use shopping_cart_widget::storage::{FileStore, KeyValueStore, MemoryStore};
use shopping_cart_widget::view::{MemoryView, Region, ViewEvent, ViewTree};
use shopping_cart_widget::{App, AppError};

fn sku(value: &str) -> Sku {
    Sku::parse(value).unwrap()
}

fn persisted<S: KeyValueStore>(store: S) -> Vec<CartLine> {
    CartPersistence::new(store, "cart").load().unwrap()
}

fn rendered_total<S: KeyValueStore>(app: &App<S, MemoryView>) -> String {
    let view = app.view().view();
    view.text(view.region(Region::Total)).unwrap_or_default().to_string()
}

fn rendered_lines<S: KeyValueStore>(app: &App<S, MemoryView>) -> Vec<String> {
    let view = app.view().view();
    view.children(view.region(Region::CartLines))
        .into_iter()
        .filter_map(|node| view.text(node).map(str::to_string))
        .collect()
}

// ============================================================================
// Adding
// ============================================================================

#[tokio::test]
async fn test_add_from_empty_cart_persists_one_line() {
    let body = item_body("MLB1", "PC", 1000.0);
    let catalog = MockCatalog::start(&[("/items/MLB1", &body)]);
    let store = MemoryStore::new();
    let mut app = app(catalog.base(), store.clone());
    app.restore_cart();

    app.handle(ViewEvent::AddToCart { item_id: sku("MLB1") })
        .await
        .unwrap();

    assert_eq!(app.cart().total(), Price::from_units(1000));
    assert_eq!(rendered_total(&app), "1000");
    assert_eq!(
        persisted(store),
        vec![CartLine::new(sku("MLB1"), "PC", Price::from_units(1000))]
    );
}

#[tokio::test]
async fn test_product_card_click_adds_line() {
    let search = search_body(&[("MLB1", "PC Gamer"), ("MLB2", "Mouse")]);
    let item = item_body("MLB2", "Mouse", 49.9);
    let catalog = MockCatalog::start(&[
        ("/sites/MLB/search", &search),
        ("/items/MLB2", &item),
    ]);
    let mut app = app(catalog.base(), MemoryStore::new());

    app.start().await.unwrap();

    let view = app.view().view();
    let cards = view.children(view.region(Region::Products));
    assert_eq!(cards.len(), 2);
    assert!(!app.view().is_busy());

    let add_button = view.children(cards[1])[3];
    assert!(view.click(add_button));
    assert_eq!(app.run_pending().await, 0);

    assert_eq!(rendered_lines(&app), vec!["SKU: MLB2 | NAME: Mouse | PRICE: $49.9"]);
    assert_eq!(rendered_total(&app), "49.9");
    assert!(
        catalog
            .requests()
            .contains(&"/sites/MLB/search?q=computador".to_string())
    );
}

#[tokio::test]
async fn test_same_item_twice_keeps_two_lines() {
    let body = item_body("MLB1", "PC", 10.0);
    let catalog = MockCatalog::start(&[("/items/MLB1", &body)]);
    let mut app = app(catalog.base(), MemoryStore::new());

    for _ in 0..2 {
        app.handle(ViewEvent::AddToCart { item_id: sku("MLB1") })
            .await
            .unwrap();
    }

    assert_eq!(app.cart().len(), 2);
    assert_eq!(rendered_total(&app), "20");
}

// ============================================================================
// Removing and clearing
// ============================================================================

#[tokio::test]
async fn test_remove_first_of_two_lines() {
    let first = item_body("MLB1", "PC", 500.0);
    let second = item_body("MLB2", "Monitor", 700.0);
    let catalog = MockCatalog::start(&[("/items/MLB1", &first), ("/items/MLB2", &second)]);
    let store = MemoryStore::new();
    let mut app = app(catalog.base(), store.clone());

    for id in ["MLB1", "MLB2"] {
        app.handle(ViewEvent::AddToCart { item_id: sku(id) })
            .await
            .unwrap();
    }
    assert_eq!(app.cart().total(), Price::from_units(1200));

    let view = app.view().view();
    let first_line = view.children(view.region(Region::CartLines))[0];
    assert!(view.click(first_line));
    assert_eq!(app.run_pending().await, 0);

    assert_eq!(app.cart().total(), Price::from_units(700));
    assert_eq!(rendered_total(&app), "700");
    let lines = persisted(store);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].sku, sku("MLB2"));
}

#[tokio::test]
async fn test_clear_three_line_cart() {
    let catalog = MockCatalog::start(&[]);
    let store = MemoryStore::new();
    CartPersistence::new(store.clone(), "cart")
        .save(&[
            CartLine::new(sku("MLB1"), "a", Price::from_units(1)),
            CartLine::new(sku("MLB2"), "b", Price::from_units(2)),
            CartLine::new(sku("MLB3"), "c", Price::from_units(3)),
        ])
        .unwrap();
    let mut app = app(catalog.base(), store.clone());
    assert_eq!(app.restore_cart(), 3);

    let view = app.view().view();
    assert!(view.click(view.region(Region::EmptyCart)));
    assert_eq!(app.run_pending().await, 0);

    assert_eq!(app.cart().total(), Price::ZERO);
    assert_eq!(rendered_total(&app), "0");
    assert!(rendered_lines(&app).is_empty());
    assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));
}

// ============================================================================
// Persistence across restarts
// ============================================================================

#[test]
fn test_fresh_store_loads_empty_cart() {
    let tmp = tempfile::tempdir().unwrap();
    assert!(persisted(FileStore::new(tmp.path())).is_empty());
}

#[tokio::test]
async fn test_cart_survives_restart_with_file_store() {
    let tmp = tempfile::tempdir().unwrap();
    let body = item_body("MLB1", "PC", 1999.99);
    let catalog = MockCatalog::start(&[("/items/MLB1", &body)]);

    {
        let mut app = app(catalog.base(), FileStore::new(tmp.path()));
        app.restore_cart();
        app.handle(ViewEvent::AddToCart { item_id: sku("MLB1") })
            .await
            .unwrap();
    }

    let mut restarted = app(catalog.base(), FileStore::new(tmp.path()));
    assert_eq!(restarted.restore_cart(), 1);
    assert_eq!(
        rendered_lines(&restarted),
        vec!["SKU: MLB1 | NAME: PC | PRICE: $1999.99"]
    );
    assert_eq!(rendered_total(&restarted), "1999.99");
}

#[tokio::test]
async fn test_corrupted_stored_cart_is_replaced_on_next_mutation() {
    let body = item_body("MLB1", "PC", 5.0);
    let catalog = MockCatalog::start(&[("/items/MLB1", &body)]);
    let store = MemoryStore::with_entry("cart", "not json");
    let mut app = app(catalog.base(), store.clone());

    assert_eq!(app.restore_cart(), 0);
    app.handle(ViewEvent::AddToCart { item_id: sku("MLB1") })
        .await
        .unwrap();

    assert_eq!(persisted(store).len(), 1);
}

#[tokio::test]
async fn test_add_that_overflows_total_is_rejected() {
    let body = r#"{"id":"MLB2","title":"Yacht","price":5e28}"#;
    let catalog = MockCatalog::start(&[("/items/MLB2", body)]);
    let store = MemoryStore::new();
    CartPersistence::new(store.clone(), "cart")
        .save(&[CartLine::new(
            sku("MLB1"),
            "Jet",
            serde_json::from_str("5e28").unwrap(),
        )])
        .unwrap();
    let mut app = app(catalog.base(), store.clone());
    assert_eq!(app.restore_cart(), 1);

    let err = app
        .handle(ViewEvent::AddToCart { item_id: sku("MLB2") })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Cart(CartError::Price(PriceError::Overflow))
    ));
    assert_eq!(app.cart().len(), 1);
    assert_eq!(rendered_lines(&app).len(), 1);
    assert_eq!(persisted(store).len(), 1);
    assert!(!app.view().is_busy());
}
