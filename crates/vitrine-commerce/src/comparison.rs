//! Comparison store: a capacity-bounded set of products being compared.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::CommerceError;
use crate::product::{ProductId, ProductRef};

/// Maximum number of products that can be compared at once.
pub const MAX_COMPARISON_ITEMS: usize = 4;

/// The product-comparison tray.
///
/// Holds at most [`MAX_COMPARISON_ITEMS`] distinct products. The limit is
/// enforced here, at the insert boundary; [`ComparisonStore::can_add_more`]
/// is a thin read of the same count so the UI check and the store check
/// cannot drift apart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ComparisonStore {
    entries: Vec<ProductRef>,
}

impl ComparisonStore {
    /// Create an empty comparison tray.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product to the comparison.
    ///
    /// A product that is already present is a successful no-op. A fifth
    /// distinct product is rejected with [`CommerceError::ComparisonFull`]
    /// even if the UI forgot to consult [`ComparisonStore::can_add_more`].
    pub fn add(&mut self, product: ProductRef) -> Result<(), CommerceError> {
        if self.contains(&product.id) {
            return Ok(());
        }
        if self.entries.len() >= MAX_COMPARISON_ITEMS {
            return Err(CommerceError::ComparisonFull {
                limit: MAX_COMPARISON_ITEMS,
            });
        }
        self.entries.push(product);
        Ok(())
    }

    /// Remove a product. Returns `false` (no-op) when absent.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        match self.entries.iter().position(|p| &p.id == product_id) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Whether another product can still be added.
    pub fn can_add_more(&self) -> bool {
        self.entries.len() < MAX_COMPARISON_ITEMS
    }

    /// Check if a product is being compared.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.entries.iter().any(|p| &p.id == product_id)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[ProductRef] {
        &self.entries
    }

    /// Number of products being compared.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the tray is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Restore invariants after rehydration: drop invalid entries and
    /// duplicates, then truncate to the capacity limit.
    pub fn sanitize(&mut self) {
        let mut seen = HashSet::new();
        self.entries
            .retain(|p| p.is_valid() && seen.insert(p.id.clone()));
        self.entries.truncate(MAX_COMPARISON_ITEMS);
    }
}
