// src/models/product.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
  pub id: Uuid,
  pub farmer_id: Uuid,
  pub name: String,
  pub description: Option<String>,
  pub price_cents: i32,
  pub stock_quantity: i32,
  /// Unit of sale shown to buyers ("kg", "dozen", "bunch", ...).
  pub unit: String,
  /// Perishables carry an expiry; past-expiry products cannot be carted.
  pub expires_at: Option<DateTime<Utc>>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

pub const PRODUCT_COLUMNS: &str =
  "id, farmer_id, name, description, price_cents, stock_quantity, unit, expires_at, created_at, updated_at";
