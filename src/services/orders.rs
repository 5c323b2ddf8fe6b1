// src/services/orders.rs

//! Order placement and retrieval.
//!
//! Placement converts the whole cart into an order inside one transaction:
//! product rows are locked, every line is re-checked against current stock,
//! stock is decremented, and the cart is cleared. Any failure rolls the whole
//! thing back.

use serde::Serialize;
use sqlx::{FromRow, PgPool};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Order, OrderItem};
use crate::services::{activity, notifications};

#[derive(Debug, Serialize)]
pub struct OrderDetail {
  pub order: Order,
  pub items: Vec<OrderItem>,
}

#[derive(Debug, FromRow)]
struct CheckoutLine {
  product_id: Uuid,
  quantity: i32,
  name: String,
  unit: String,
  price_cents: i32,
  stock_quantity: i32,
}

const ORDER_COLUMNS: &str = "id, buyer_id, status, total_cents, created_at, updated_at";
const ORDER_ITEM_COLUMNS: &str = "id, order_id, product_id, product_name, quantity, unit, price_at_purchase_cents";

#[instrument(name = "orders::place_order", skip(pool), fields(buyer_id = %buyer_id))]
pub async fn place_order(pool: &PgPool, buyer_id: Uuid) -> Result<Order, AppError> {
  let mut tx = pool.begin().await?;

  let lines: Vec<CheckoutLine> = sqlx::query_as(
    "SELECT ci.product_id, ci.quantity, p.name, p.unit, p.price_cents, p.stock_quantity \
     FROM cart_items ci JOIN products p ON p.id = ci.product_id \
     WHERE ci.buyer_id = $1 ORDER BY p.name ASC FOR UPDATE OF p",
  )
  .bind(buyer_id)
  .fetch_all(&mut *tx)
  .await?;

  if lines.is_empty() {
    return Err(AppError::InvalidInput(
      "Your cart is empty; there is nothing to order.".to_string(),
    ));
  }

  let mut total_cents: i64 = 0;
  for line in &lines {
    if line.quantity > line.stock_quantity {
      return Err(AppError::InsufficientStock {
        name: line.name.clone(),
        available: line.stock_quantity.max(0),
        unit: line.unit.clone(),
      });
    }
    total_cents += i64::from(line.quantity) * i64::from(line.price_cents);
  }

  let insert_order = format!(
    "INSERT INTO orders (id, buyer_id, status, total_cents, created_at, updated_at) \
     VALUES ($1, $2, 'placed', $3, NOW(), NOW()) RETURNING {}",
    ORDER_COLUMNS
  );
  let order: Order = sqlx::query_as(&insert_order)
    .bind(Uuid::new_v4())
    .bind(buyer_id)
    .bind(total_cents)
    .fetch_one(&mut *tx)
    .await?;

  for line in &lines {
    sqlx::query("UPDATE products SET stock_quantity = stock_quantity - $1, updated_at = NOW() WHERE id = $2")
      .bind(line.quantity)
      .bind(line.product_id)
      .execute(&mut *tx)
      .await?;

    sqlx::query(
      "INSERT INTO order_items \
       (id, order_id, product_id, product_name, quantity, unit, price_at_purchase_cents) \
       VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(Uuid::new_v4())
    .bind(order.id)
    .bind(line.product_id)
    .bind(&line.name)
    .bind(line.quantity)
    .bind(&line.unit)
    .bind(line.price_cents)
    .execute(&mut *tx)
    .await?;
  }

  sqlx::query("DELETE FROM cart_items WHERE buyer_id = $1")
    .bind(buyer_id)
    .execute(&mut *tx)
    .await?;

  tx.commit().await?;
  info!(order_id = %order.id, total_cents, "Order placed.");

  notifications::notify(
    pool,
    buyer_id,
    "order",
    &format!("Your order {} has been placed.", order.id),
  )
  .await;
  activity::record(pool, buyer_id, "order", &format!("Placed order {}.", order.id)).await;

  Ok(order)
}

#[instrument(name = "orders::list_orders", skip(pool), fields(buyer_id = %buyer_id))]
pub async fn list_orders(pool: &PgPool, buyer_id: Uuid) -> Result<Vec<Order>, AppError> {
  let sql = format!(
    "SELECT {} FROM orders WHERE buyer_id = $1 ORDER BY created_at DESC",
    ORDER_COLUMNS
  );
  let orders: Vec<Order> = sqlx::query_as(&sql).bind(buyer_id).fetch_all(pool).await?;
  Ok(orders)
}

/// Order header plus line items. Orders belonging to other buyers are
/// indistinguishable from missing ones.
#[instrument(name = "orders::get_order", skip(pool), fields(buyer_id = %buyer_id, order_id = %order_id))]
pub async fn get_order(pool: &PgPool, buyer_id: Uuid, order_id: Uuid) -> Result<OrderDetail, AppError> {
  let select_order = format!("SELECT {} FROM orders WHERE id = $1 AND buyer_id = $2", ORDER_COLUMNS);
  let order: Order = sqlx::query_as(&select_order)
    .bind(order_id)
    .bind(buyer_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Order {} not found.", order_id)))?;

  let select_items = format!(
    "SELECT {} FROM order_items WHERE order_id = $1 ORDER BY product_name ASC",
    ORDER_ITEM_COLUMNS
  );
  let items: Vec<OrderItem> = sqlx::query_as(&select_items).bind(order_id).fetch_all(pool).await?;

  Ok(OrderDetail { order, items })
}
