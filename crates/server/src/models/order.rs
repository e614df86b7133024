//! Order domain type.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value as JsonValue;

use kirana_core::{OrderId, OrderStatus};

/// A customer order.
///
/// `items` is the opaque `{product, qty, price}` list captured verbatim at
/// order time and `total` is the client-supplied amount; neither is
/// recomputed server-side.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    /// Unique order ID, strictly increasing.
    pub id: OrderId,
    /// Customer name as supplied at checkout.
    pub customer_name: String,
    /// Customer mobile number; the key for self-service order lookup.
    pub mobile: String,
    /// Delivery address.
    pub address: String,
    /// Item list snapshot, stored verbatim.
    pub items: JsonValue,
    /// Client-supplied total.
    pub total: Decimal,
    /// Free-form payment method string ("cod" by default).
    pub payment_method: String,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// When the order was placed.
    pub date: DateTime<Utc>,
}
