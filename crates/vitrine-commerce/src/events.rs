//! Notification bridge: events the stores emit toward the presentation
//! layer (toasts). Fire-and-forget; nothing a sink does can fail a
//! mutation.

use serde::{Deserialize, Serialize};

/// Payload for an "item added to cart" notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAdded {
    /// Product display name.
    pub name: String,
    /// Product image URL, when the snapshot carried one.
    pub image: Option<String>,
    /// Quantity that was added (after clamping).
    pub quantity: i64,
    /// Cart-wide item count after the mutation.
    pub total_items_after: i64,
}

/// Payload for an "item removed from cart" notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemoved {
    /// Product display name.
    pub name: String,
    /// Cart-wide item count after the mutation.
    pub total_items_after: i64,
}

/// Receiver for store notifications.
///
/// The presentation layer implements this to render toasts; the default
/// bodies make every event optional for a sink.
pub trait NotificationSink {
    /// An item was added to the cart.
    fn item_added(&self, _event: &ItemAdded) {}

    /// An item was removed from the cart.
    fn item_removed(&self, _event: &ItemRemoved) {}
}

/// A sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {}
