// src/models/order_item.rs

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Immutable order line. Name and unit are copied from the product at
/// purchase time so later catalog edits don't rewrite order history.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrderItem {
  pub id: Uuid,
  pub order_id: Uuid,
  pub product_id: Uuid,
  pub product_name: String,
  pub quantity: i32,
  pub unit: String,
  pub price_at_purchase_cents: i32,
}
