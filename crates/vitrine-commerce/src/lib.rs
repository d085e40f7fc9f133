//! Commerce domain types and client-side state stores for Vitrine.
//!
//! This crate is the pure core of the storefront's commerce state:
//!
//! - **Pricing**: integer-cent [`Money`], validated [`VatRate`], HT→TTC
//!   conversion, localized display formatting
//! - **Cart**: line items with quantity merging and clamping, derived
//!   counts and subtotals
//! - **Wishlist**: a saved-products set with a single toggle mutator
//! - **Comparison**: a capacity-bounded (4) product set
//! - **Events**: notification payloads handed to the presentation layer
//!
//! No I/O happens here. Persistence lives in `vitrine-storage`; the
//! wiring of stores to storage and notifications lives in
//! `vitrine-session`.
//!
//! # Example
//!
//! ```
//! use vitrine_commerce::prelude::*;
//!
//! let mower = ProductRef::new(
//!     "42",
//!     "SKU-42",
//!     "Robot Mower",
//!     Money::new(249_900, Currency::EUR),
//!     VatRate::STANDARD_FR,
//! );
//!
//! let mut cart = CartStore::default();
//! cart.add(mower, 2);
//!
//! assert_eq!(cart.items_count(), 2);
//! assert_eq!(cart.subtotal_ttc().unwrap().cents, 599_760);
//! ```

pub mod error;
pub mod events;
pub mod pricing;
pub mod product;

pub mod cart;
pub mod comparison;
pub mod wishlist;

pub use cart::{CartLineItem, CartStore, MAX_QUANTITY_PER_ITEM};
pub use comparison::{ComparisonStore, MAX_COMPARISON_ITEMS};
pub use error::CommerceError;
pub use events::{ItemAdded, ItemRemoved, NotificationSink, NullSink};
pub use pricing::{Currency, Money, VatRate};
pub use product::{AttributeValue, ProductId, ProductRef};
pub use wishlist::WishlistStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{CartLineItem, CartStore, MAX_QUANTITY_PER_ITEM};
    pub use crate::comparison::{ComparisonStore, MAX_COMPARISON_ITEMS};
    pub use crate::error::CommerceError;
    pub use crate::events::{ItemAdded, ItemRemoved, NotificationSink, NullSink};
    pub use crate::pricing::{Currency, Money, VatRate};
    pub use crate::product::{AttributeValue, ProductId, ProductRef};
    pub use crate::wishlist::WishlistStore;
}
