//! Per-session commerce state facade for Vitrine.
//!
//! Wires the pure stores from `vitrine-commerce` to the persistence
//! adapter from `vitrine-storage` and to an injected notification sink.
//! Construct one [`CommerceSession`] at startup and pass it by reference
//! to every consumer; it is the single source of truth for cart,
//! wishlist, and comparison state for the session.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use vitrine_commerce::prelude::*;
//! use vitrine_session::CommerceSession;
//! use vitrine_storage::SnapshotStore;
//!
//! let snapshots = SnapshotStore::open("docs-session").unwrap();
//! let mut session = CommerceSession::hydrate(snapshots, Arc::new(NullSink));
//!
//! let mower = ProductRef::new(
//!     "42",
//!     "SKU-42",
//!     "Robot Mower",
//!     Money::new(249_900, Currency::EUR),
//!     VatRate::STANDARD_FR,
//! );
//! session.add_to_cart(mower, 2);
//! assert_eq!(session.items_count(), 2);
//! ```

mod session;

pub use session::{keys, CommerceSession};
