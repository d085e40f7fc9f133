//! The per-session commerce facade.
//!
//! One `CommerceSession` is constructed at startup and handed by
//! reference to every product-bearing component; no component owns
//! commerce state itself. Mutations are synchronous and atomic on the
//! in-memory stores; after each one, the mutated store's snapshot is
//! persisted best-effort and, when the write goes through, a
//! notification event is emitted where the operation calls for it.
//! Neither side effect can fail the mutation.

use std::sync::Arc;

use vitrine_commerce::{
    CartLineItem, CartStore, CommerceError, ComparisonStore, ItemAdded, ItemRemoved,
    NotificationSink, ProductId, ProductRef, WishlistStore,
};
use vitrine_storage::SnapshotStore;

/// Storage keys, one snapshot per store.
pub mod keys {
    /// Cart snapshot key.
    pub const CART: &str = "vitrine:cart";
    /// Wishlist snapshot key.
    pub const WISHLIST: &str = "vitrine:wishlist";
    /// Comparison snapshot key.
    pub const COMPARISON: &str = "vitrine:comparison";
}

/// The session's commerce state: cart, wishlist, and comparison stores,
/// wired to persistence and the notification bridge.
pub struct CommerceSession {
    cart: CartStore,
    wishlist: WishlistStore,
    comparison: ComparisonStore,
    snapshots: SnapshotStore,
    sink: Arc<dyn NotificationSink>,
}

impl CommerceSession {
    /// Build a session by rehydrating each store from persisted state.
    ///
    /// An absent or corrupt snapshot hydrates as an empty store; entries
    /// that survived deserialization but violate store invariants
    /// (negative price, duplicate id, out-of-range quantity, over
    /// capacity) are dropped or re-clamped. Hydration can therefore
    /// never fail or block first paint.
    pub fn hydrate(snapshots: SnapshotStore, sink: Arc<dyn NotificationSink>) -> Self {
        let mut cart: CartStore = snapshots.load(keys::CART).unwrap_or_default();
        cart.sanitize();

        let mut wishlist: WishlistStore = snapshots.load(keys::WISHLIST).unwrap_or_default();
        wishlist.sanitize();

        let mut comparison: ComparisonStore = snapshots.load(keys::COMPARISON).unwrap_or_default();
        comparison.sanitize();

        tracing::debug!(
            cart_items = cart.items_count(),
            wishlist_items = wishlist.len(),
            comparison_items = comparison.len(),
            "commerce session hydrated"
        );

        Self {
            cart,
            wishlist,
            comparison,
            snapshots,
            sink,
        }
    }

    // Cart ------------------------------------------------------------

    /// Add a product snapshot to the cart, merging into an existing line
    /// item when the product is already present.
    pub fn add_to_cart(&mut self, product: ProductRef, quantity: i64) {
        let name = product.name.clone();
        let image = product.image.clone();

        let added = self.cart.add(product, quantity);
        if self.snapshots.save(keys::CART, &self.cart) {
            self.sink.item_added(&ItemAdded {
                name,
                image,
                quantity: added,
                total_items_after: self.cart.items_count(),
            });
        }
    }

    /// Set a line item's quantity, clamped to `[1, stock]` when a stock
    /// ceiling is known. Returns `false` when the product is not in the
    /// cart.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
        stock: Option<i64>,
    ) -> bool {
        let changed = self.cart.update_quantity(product_id, quantity, stock);
        if changed {
            self.snapshots.save(keys::CART, &self.cart);
        }
        changed
    }

    /// Remove a line item. No-op when the product is not in the cart.
    pub fn remove_from_cart(&mut self, product_id: &ProductId) {
        if let Some(removed) = self.cart.remove(product_id) {
            if self.snapshots.save(keys::CART, &self.cart) {
                self.sink.item_removed(&ItemRemoved {
                    name: removed.product.name,
                    total_items_after: self.cart.items_count(),
                });
            }
        }
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.snapshots.save(keys::CART, &self.cart);
    }

    // Wishlist ---------------------------------------------------------

    /// Toggle a product in the wishlist. Returns `true` when the product
    /// is now saved.
    pub fn toggle_wishlist(&mut self, product: ProductRef) -> bool {
        let present = self.wishlist.toggle(product);
        self.snapshots.save(keys::WISHLIST, &self.wishlist);
        present
    }

    /// Check if a product is in the wishlist.
    pub fn is_in_wishlist(&self, product_id: &ProductId) -> bool {
        self.wishlist.contains(product_id)
    }

    /// Empty the wishlist.
    pub fn clear_wishlist(&mut self) {
        self.wishlist.clear();
        self.snapshots.save(keys::WISHLIST, &self.wishlist);
    }

    // Comparison -------------------------------------------------------

    /// Add a product to the comparison tray.
    ///
    /// A fifth distinct product is rejected with
    /// [`CommerceError::ComparisonFull`]; the caller surfaces that to the
    /// user, it is an expected recoverable condition.
    pub fn add_to_comparison(&mut self, product: ProductRef) -> Result<(), CommerceError> {
        self.comparison.add(product)?;
        self.snapshots.save(keys::COMPARISON, &self.comparison);
        Ok(())
    }

    /// Remove a product from the comparison tray. No-op when absent.
    pub fn remove_from_comparison(&mut self, product_id: &ProductId) {
        if self.comparison.remove(product_id) {
            self.snapshots.save(keys::COMPARISON, &self.comparison);
        }
    }

    /// Whether another product can still be compared.
    pub fn can_add_more(&self) -> bool {
        self.comparison.can_add_more()
    }

    /// Check if a product is being compared.
    pub fn is_in_comparison(&self, product_id: &ProductId) -> bool {
        self.comparison.contains(product_id)
    }

    /// Empty the comparison tray.
    pub fn clear_comparison(&mut self) {
        self.comparison.clear();
        self.snapshots.save(keys::COMPARISON, &self.comparison);
    }

    // Read accessors ---------------------------------------------------

    /// Total cart item count (sum of line quantities).
    pub fn items_count(&self) -> i64 {
        self.cart.items_count()
    }

    /// Cart line items in insertion order.
    pub fn line_items(&self) -> &[CartLineItem] {
        self.cart.line_items()
    }

    /// The cart store.
    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// The wishlist store.
    pub fn wishlist(&self) -> &WishlistStore {
        &self.wishlist
    }

    /// The comparison store.
    pub fn comparison(&self) -> &ComparisonStore {
        &self.comparison
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use vitrine_commerce::{Currency, Money, NullSink, VatRate};

    /// Sink that records every event for assertions.
    #[derive(Default)]
    struct RecordingSink {
        added: Mutex<Vec<ItemAdded>>,
        removed: Mutex<Vec<ItemRemoved>>,
    }

    impl NotificationSink for RecordingSink {
        fn item_added(&self, event: &ItemAdded) {
            self.added.lock().unwrap().push(event.clone());
        }

        fn item_removed(&self, event: &ItemRemoved) {
            self.removed.lock().unwrap().push(event.clone());
        }
    }

    fn product(id: &str) -> ProductRef {
        ProductRef::new(
            id,
            format!("SKU-{id}"),
            format!("Product {id}"),
            Money::new(1_000, Currency::EUR),
            VatRate::STANDARD_FR,
        )
        .with_image(format!("https://img/{id}.webp"))
    }

    fn session(store_name: &str) -> CommerceSession {
        CommerceSession::hydrate(
            SnapshotStore::open(store_name).unwrap(),
            Arc::new(NullSink),
        )
    }

    #[test]
    fn test_hydrates_empty_on_cold_start() {
        let session = session("session-cold-start");
        assert_eq!(session.items_count(), 0);
        assert!(session.wishlist().is_empty());
        assert!(session.comparison().is_empty());
    }

    #[test]
    fn test_add_to_cart_notifies_with_payload() {
        let sink = Arc::new(RecordingSink::default());
        let mut session = CommerceSession::hydrate(
            SnapshotStore::open("session-notify").unwrap(),
            Arc::clone(&sink) as Arc<dyn NotificationSink>,
        );

        session.add_to_cart(product("1"), 2);
        session.add_to_cart(product("1"), 1);

        let added = sink.added.lock().unwrap();
        assert_eq!(added.len(), 2);
        assert_eq!(added[0].name, "Product 1");
        assert_eq!(added[0].image.as_deref(), Some("https://img/1.webp"));
        assert_eq!(added[0].quantity, 2);
        assert_eq!(added[0].total_items_after, 2);
        assert_eq!(added[1].total_items_after, 3);
    }

    #[test]
    fn test_remove_from_cart_notifies() {
        let sink = Arc::new(RecordingSink::default());
        let mut session = CommerceSession::hydrate(
            SnapshotStore::open("session-remove-notify").unwrap(),
            Arc::clone(&sink) as Arc<dyn NotificationSink>,
        );

        session.add_to_cart(product("1"), 2);
        session.remove_from_cart(&ProductId::new("1"));
        // Absent id: no event
        session.remove_from_cart(&ProductId::new("ghost"));

        let removed = sink.removed.lock().unwrap();
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].name, "Product 1");
        assert_eq!(removed[0].total_items_after, 0);
    }

    #[test]
    fn test_comparison_capacity_surfaces_to_caller() {
        let mut session = session("session-comparison");
        for id in ["1", "2", "3", "4"] {
            session.add_to_comparison(product(id)).unwrap();
        }

        assert!(!session.can_add_more());
        assert!(session.add_to_comparison(product("5")).is_err());
        assert!(!session.is_in_comparison(&ProductId::new("5")));
        assert_eq!(session.comparison().len(), 4);
    }

    #[test]
    fn test_wishlist_toggle_via_session() {
        let mut session = session("session-wishlist");
        assert!(session.toggle_wishlist(product("1")));
        assert!(session.is_in_wishlist(&ProductId::new("1")));
        assert!(!session.toggle_wishlist(product("1")));
        assert!(!session.is_in_wishlist(&ProductId::new("1")));
    }

    #[test]
    fn test_update_quantity_persisted_only_when_found() {
        let mut session = session("session-update");
        session.add_to_cart(product("1"), 1);

        assert!(session.update_quantity(&ProductId::new("1"), 999, Some(5)));
        assert_eq!(session.line_items()[0].quantity, 5);
        assert!(!session.update_quantity(&ProductId::new("ghost"), 3, None));
    }
}
