//! Wishlist store: a saved-products set with a single toggle mutator.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::product::{ProductId, ProductRef};

/// The wishlist.
///
/// Set semantics on product id, insertion ordered. The UI exposes one
/// "heart" control, so the store exposes one mutator: [`WishlistStore::toggle`].
/// Modeling it as a single transition keeps the toggle/toggle round trip
/// idempotent by construction rather than by convention.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct WishlistStore {
    entries: Vec<ProductRef>,
}

impl WishlistStore {
    /// Create an empty wishlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a product: remove it when present, store the full snapshot
    /// when absent. Returns `true` when the product is now in the
    /// wishlist.
    pub fn toggle(&mut self, product: ProductRef) -> bool {
        if let Some(pos) = self.entries.iter().position(|p| p.id == product.id) {
            self.entries.remove(pos);
            false
        } else {
            self.entries.push(product);
            true
        }
    }

    /// Check if a product is in the wishlist.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.entries.iter().any(|p| &p.id == product_id)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[ProductRef] {
        &self.entries
    }

    /// Number of saved products.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the wishlist is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Restore invariants after rehydration: drop invalid entries and
    /// duplicates (first occurrence wins).
    pub fn sanitize(&mut self) {
        let mut seen = HashSet::new();
        self.entries
            .retain(|p| p.is_valid() && seen.insert(p.id.clone()));
    }
}
