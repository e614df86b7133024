//! Product domain type.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use kirana_core::ProductId;

/// A catalog product.
///
/// Orders snapshot product name/price into their item list at order time, so
/// editing or deleting a product never changes historical orders.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Product display name.
    pub name: String,
    /// Unit price.
    pub price: Decimal,
    /// Stored asset reference ("default.png" when none was uploaded).
    pub image: String,
    /// Whether the product is currently orderable.
    pub is_available: bool,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
}
