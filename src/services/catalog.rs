// src/services/catalog.rs

use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::product::PRODUCT_COLUMNS;
use crate::models::Product;

/// Products ordered by name. Expired products are kept in the table for order
/// history but never listed.
#[instrument(name = "catalog::list_products", skip(pool))]
pub async fn list_products(pool: &PgPool) -> Result<Vec<Product>, AppError> {
  let sql = format!(
    "SELECT {} FROM products WHERE expires_at IS NULL OR expires_at >= NOW() ORDER BY name ASC",
    PRODUCT_COLUMNS
  );
  let products: Vec<Product> = sqlx::query_as(&sql).fetch_all(pool).await?;
  Ok(products)
}

#[instrument(name = "catalog::get_product", skip(pool), fields(product_id = %product_id))]
pub async fn get_product(pool: &PgPool, product_id: Uuid) -> Result<Product, AppError> {
  let sql = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);
  sqlx::query_as(&sql)
    .bind(product_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::ProductNotFound(product_id))
}
