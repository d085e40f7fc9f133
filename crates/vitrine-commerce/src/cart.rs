//! Cart store: line items and derived totals.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::CommerceError;
use crate::pricing::{Currency, Money};
use crate::product::{ProductId, ProductRef};

/// Ceiling on the quantity of a single line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9_999;

/// One row in the cart: a unique product and its quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLineItem {
    /// Product snapshot captured when the line was created.
    pub product: ProductRef,
    /// Quantity, always in `[1, MAX_QUANTITY_PER_ITEM]`.
    pub quantity: i64,
}

impl CartLineItem {
    /// Tax-exclusive line total (`price_ht × quantity`).
    pub fn total_ht(&self) -> Result<Money, CommerceError> {
        self.product
            .price_ht
            .try_mul(self.quantity)
            .ok_or(CommerceError::Overflow)
    }

    /// Tax-inclusive line total. The unit price is converted to TTC
    /// before multiplying, so the line total matches what the product
    /// card shows times the quantity.
    pub fn total_ttc(&self) -> Result<Money, CommerceError> {
        self.product
            .price_ttc()?
            .try_mul(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

/// The shopping cart.
///
/// Holds at most one line item per product id, in insertion order.
/// Quantities are clamped, never rejected: user-driven steppers routinely
/// produce transient out-of-range values and none of them should surface
/// as an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CartStore {
    currency: Currency,
    items: Vec<CartLineItem>,
}

impl CartStore {
    /// Create an empty cart in the given currency.
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            items: Vec::new(),
        }
    }

    /// The cart currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Add a product to the cart.
    ///
    /// If a line item with the same product id exists, its quantity is
    /// increased (not replaced); otherwise a new line is appended. The
    /// requested quantity is clamped to `[1, MAX_QUANTITY_PER_ITEM]`
    /// first. No stock check happens here; the stock ceiling, if any, is
    /// the caller's business via [`CartStore::update_quantity`].
    ///
    /// Returns the quantity actually added after clamping.
    pub fn add(&mut self, product: ProductRef, quantity: i64) -> i64 {
        let quantity = quantity.clamp(1, MAX_QUANTITY_PER_ITEM);
        if let Some(existing) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            let before = existing.quantity;
            existing.quantity = existing
                .quantity
                .saturating_add(quantity)
                .min(MAX_QUANTITY_PER_ITEM);
            existing.quantity - before
        } else {
            self.items.push(CartLineItem { product, quantity });
            quantity
        }
    }

    /// Set the quantity of a line item, clamped to
    /// `[1, min(stock, MAX_QUANTITY_PER_ITEM)]`.
    ///
    /// Setting 0 or below does not remove the line; removal is a separate
    /// explicit operation. Returns `false` when the product is not in the
    /// cart.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
        stock: Option<i64>,
    ) -> bool {
        let Some(item) = self.items.iter_mut().find(|i| &i.product.id == product_id) else {
            return false;
        };
        item.quantity = clamp_quantity(quantity, stock);
        true
    }

    /// Remove a line item. No-op when the product is not in the cart.
    ///
    /// Returns the removed line so callers can report what disappeared.
    pub fn remove(&mut self, product_id: &ProductId) -> Option<CartLineItem> {
        let pos = self.items.iter().position(|i| &i.product.id == product_id)?;
        Some(self.items.remove(pos))
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total item count (sum of line quantities).
    pub fn items_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of distinct line items.
    pub fn unique_items(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Line items in insertion order.
    pub fn line_items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Get a line item by product id.
    pub fn get(&self, product_id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|i| &i.product.id == product_id)
    }

    /// Tax-exclusive subtotal across all line items.
    pub fn subtotal_ht(&self) -> Result<Money, CommerceError> {
        self.sum_lines(CartLineItem::total_ht)
    }

    /// Tax-inclusive subtotal across all line items.
    pub fn subtotal_ttc(&self) -> Result<Money, CommerceError> {
        self.sum_lines(CartLineItem::total_ttc)
    }

    fn sum_lines(
        &self,
        line_total: impl Fn(&CartLineItem) -> Result<Money, CommerceError>,
    ) -> Result<Money, CommerceError> {
        let mut total = Money::zero(self.currency);
        for item in &self.items {
            let line = line_total(item)?;
            if line.currency != self.currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: self.currency.code().to_string(),
                    got: line.currency.code().to_string(),
                });
            }
            total = total.try_add(&line).ok_or(CommerceError::Overflow)?;
        }
        Ok(total)
    }

    /// Restore the store invariants after rehydration from persisted
    /// state: drop invalid or duplicate entries (first occurrence wins)
    /// and re-clamp quantities.
    pub fn sanitize(&mut self) {
        let mut seen = HashSet::new();
        self.items
            .retain(|i| i.product.is_valid() && seen.insert(i.product.id.clone()));
        for item in &mut self.items {
            item.quantity = item.quantity.clamp(1, MAX_QUANTITY_PER_ITEM);
        }
    }
}

/// Clamp a requested quantity to `[1, min(stock, MAX_QUANTITY_PER_ITEM)]`.
fn clamp_quantity(quantity: i64, stock: Option<i64>) -> i64 {
    let ceiling = match stock {
        Some(stock) => stock.clamp(1, MAX_QUANTITY_PER_ITEM),
        None => MAX_QUANTITY_PER_ITEM,
    };
    quantity.clamp(1, ceiling)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::VatRate;

    fn product(id: &str, cents: i64) -> ProductRef {
        ProductRef::new(
            id,
            format!("SKU-{id}"),
            format!("Product {id}"),
            Money::new(cents, Currency::EUR),
            VatRate::STANDARD_FR,
        )
    }

    #[test]
    fn test_add_creates_line() {
        let mut cart = CartStore::default();
        let added = cart.add(product("1", 1_000), 2);
        assert_eq!(added, 2);
        assert_eq!(cart.items_count(), 2);
        assert_eq!(cart.unique_items(), 1);
    }

    #[test]
    fn test_add_same_product_merges() {
        let mut cart = CartStore::default();
        cart.add(product("1", 1_000), 1);
        cart.add(product("1", 1_000), 1);

        assert_eq!(cart.unique_items(), 1);
        assert_eq!(cart.items_count(), 2);
    }

    #[test]
    fn test_add_clamps_non_positive_quantity() {
        let mut cart = CartStore::default();
        cart.add(product("1", 1_000), 0);
        assert_eq!(cart.items_count(), 1);

        cart.add(product("2", 1_000), -5);
        assert_eq!(cart.get(&ProductId::new("2")).unwrap().quantity, 1);
    }

    #[test]
    fn test_add_caps_at_max_quantity() {
        let mut cart = CartStore::default();
        cart.add(product("1", 1_000), MAX_QUANTITY_PER_ITEM);
        let added = cart.add(product("1", 1_000), 10);
        assert_eq!(added, 0);
        assert_eq!(cart.items_count(), MAX_QUANTITY_PER_ITEM);
    }

    #[test]
    fn test_update_quantity_zero_clamps_to_one() {
        let mut cart = CartStore::default();
        cart.add(product("1", 1_000), 3);

        assert!(cart.update_quantity(&ProductId::new("1"), 0, Some(10)));
        assert_eq!(cart.get(&ProductId::new("1")).unwrap().quantity, 1);
        assert_eq!(cart.unique_items(), 1);
    }

    #[test]
    fn test_update_quantity_respects_stock_ceiling() {
        let mut cart = CartStore::default();
        cart.add(product("1", 1_000), 1);

        cart.update_quantity(&ProductId::new("1"), 999, Some(5));
        assert_eq!(cart.get(&ProductId::new("1")).unwrap().quantity, 5);
    }

    #[test]
    fn test_update_quantity_without_stock() {
        let mut cart = CartStore::default();
        cart.add(product("1", 1_000), 1);

        cart.update_quantity(&ProductId::new("1"), 42, None);
        assert_eq!(cart.get(&ProductId::new("1")).unwrap().quantity, 42);
    }

    #[test]
    fn test_update_quantity_missing_item() {
        let mut cart = CartStore::default();
        assert!(!cart.update_quantity(&ProductId::new("ghost"), 3, None));
    }

    #[test]
    fn test_remove_is_noop_when_absent() {
        let mut cart = CartStore::default();
        cart.add(product("1", 1_000), 1);

        assert!(cart.remove(&ProductId::new("ghost")).is_none());
        assert_eq!(cart.unique_items(), 1);

        let removed = cart.remove(&ProductId::new("1")).unwrap();
        assert_eq!(removed.quantity, 1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cart = CartStore::default();
        cart.add(product("1", 1_000), 2);
        cart.add(product("2", 2_000), 1);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.items_count(), 0);
    }

    #[test]
    fn test_insertion_order_is_stable() {
        let mut cart = CartStore::default();
        cart.add(product("b", 1_000), 1);
        cart.add(product("a", 2_000), 1);
        cart.add(product("b", 1_000), 1); // merge does not reorder

        let ids: Vec<&str> = cart
            .line_items()
            .iter()
            .map(|i| i.product.id.as_str())
            .collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn test_subtotals_concrete_scenario() {
        // addToCart(Robot Mower, priceHT 249900, VAT 20%, qty 2)
        let mut cart = CartStore::default();
        let mower = ProductRef::new(
            "42",
            "SKU-42",
            "Robot Mower",
            Money::new(249_900, Currency::EUR),
            VatRate::STANDARD_FR,
        );
        cart.add(mower, 2);

        assert_eq!(cart.items_count(), 2);
        assert_eq!(cart.subtotal_ht().unwrap().cents, 499_800);
        assert_eq!(cart.subtotal_ttc().unwrap().cents, 599_760);
    }

    #[test]
    fn test_subtotal_currency_mismatch() {
        let mut cart = CartStore::new(Currency::EUR);
        let mut p = product("1", 1_000);
        p.price_ht = Money::new(1_000, Currency::USD);
        cart.add(p, 1);

        assert!(matches!(
            cart.subtotal_ht(),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_sanitize_drops_corrupt_entries() {
        let mut cart = CartStore::default();
        cart.add(product("1", 1_000), 1);
        cart.add(product("2", 2_000), 1);

        // Simulate a tampered snapshot: negative price, duplicate id,
        // out-of-range quantity.
        let mut corrupt = cart.clone();
        corrupt.items[0].product.price_ht = Money::new(-500, Currency::EUR);
        corrupt.items.push(CartLineItem {
            product: product("2", 2_000),
            quantity: 3,
        });
        corrupt.items[1].quantity = 0;

        corrupt.sanitize();
        assert_eq!(corrupt.unique_items(), 1);
        assert_eq!(corrupt.get(&ProductId::new("2")).unwrap().quantity, 1);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut cart = CartStore::default();
        cart.add(product("1", 1_000).with_image("https://img/1.webp"), 2);
        cart.add(product("2", 2_000), 1);

        let json = serde_json::to_string(&cart).unwrap();
        let back: CartStore = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
    }
}
