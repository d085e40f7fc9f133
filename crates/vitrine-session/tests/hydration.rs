//! Hydration round trips: a rebuilt session over the same backing store
//! observes the collections the previous session persisted, and corrupt
//! persisted state reads as a cold start.

use std::sync::Arc;

use vitrine_commerce::prelude::*;
use vitrine_session::{keys, CommerceSession};
use vitrine_storage::{KvStore, SnapshotStore};

fn product(id: &str, cents: i64) -> ProductRef {
    ProductRef::new(
        id,
        format!("SKU-{id}"),
        format!("Product {id}"),
        Money::new(cents, Currency::EUR),
        VatRate::STANDARD_FR,
    )
}

fn session(store_name: &str) -> CommerceSession {
    CommerceSession::hydrate(SnapshotStore::open(store_name).unwrap(), Arc::new(NullSink))
}

#[test]
fn rebuilt_session_observes_persisted_state() {
    let store = "hydration-round-trip";

    let mut first = session(store);
    first.add_to_cart(product("b", 1_000), 2);
    first.add_to_cart(product("a", 2_500), 1);
    first.update_quantity(&ProductId::new("b"), 3, Some(10));
    first.toggle_wishlist(product("w", 500));
    first.add_to_comparison(product("c1", 100)).unwrap();
    first.add_to_comparison(product("c2", 200)).unwrap();
    drop(first);

    let second = session(store);

    // Same line items, quantities, and insertion order
    let items: Vec<(&str, i64)> = second
        .line_items()
        .iter()
        .map(|i| (i.product.id.as_str(), i.quantity))
        .collect();
    assert_eq!(items, [("b", 3), ("a", 1)]);
    assert_eq!(second.items_count(), 4);

    assert!(second.is_in_wishlist(&ProductId::new("w")));
    assert!(second.is_in_comparison(&ProductId::new("c1")));
    assert!(second.is_in_comparison(&ProductId::new("c2")));
    assert!(second.can_add_more());
}

#[test]
fn corrupt_cart_snapshot_hydrates_empty() {
    let store = "hydration-corrupt-cart";

    let mut first = session(store);
    first.add_to_cart(product("1", 1_000), 1);
    first.toggle_wishlist(product("w", 500));
    drop(first);

    // Garble the cart snapshot only
    let kv = KvStore::open(store).unwrap();
    kv.set(keys::CART, &"garbled bytes").unwrap();

    let second = session(store);
    assert_eq!(second.items_count(), 0);
    assert!(second.cart().is_empty());
    // The wishlist snapshot was untouched and survives
    assert!(second.is_in_wishlist(&ProductId::new("w")));
}

#[test]
fn clear_operations_persist() {
    let store = "hydration-clear";

    let mut first = session(store);
    first.add_to_cart(product("1", 1_000), 2);
    first.toggle_wishlist(product("2", 500));
    first.clear_cart();
    first.clear_wishlist();
    drop(first);

    let second = session(store);
    assert!(second.cart().is_empty());
    assert!(second.wishlist().is_empty());
}
