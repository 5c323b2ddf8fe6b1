// src/web/handlers/order_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::UserRole;
use crate::services::orders;
use crate::state::AppState;
use crate::web::identity::{self, CurrentUser};

/// POST /orders — turn the caller's cart into an order.
#[instrument(name = "handler::place_order", skip(app_state, user), fields(buyer_id = %user.user_id))]
pub async fn place_order_handler(app_state: web::Data<AppState>, user: CurrentUser) -> Result<HttpResponse, AppError> {
  identity::require_role(&app_state.db_pool, user.user_id, UserRole::Buyer).await?;

  let order = orders::place_order(&app_state.db_pool, user.user_id).await?;
  Ok(HttpResponse::Created().json(json!({
    "message": "Order placed.",
    "order": order,
  })))
}

#[instrument(name = "handler::list_orders", skip(app_state, user), fields(buyer_id = %user.user_id))]
pub async fn list_orders_handler(app_state: web::Data<AppState>, user: CurrentUser) -> Result<HttpResponse, AppError> {
  identity::require_role(&app_state.db_pool, user.user_id, UserRole::Buyer).await?;

  let orders = orders::list_orders(&app_state.db_pool, user.user_id).await?;
  Ok(HttpResponse::Ok().json(json!({ "orders": orders })))
}

/// GET /orders/{id} — data behind the order detail page.
#[instrument(name = "handler::get_order", skip(app_state, path, user), fields(buyer_id = %user.user_id))]
pub async fn get_order_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  user: CurrentUser,
) -> Result<HttpResponse, AppError> {
  identity::require_role(&app_state.db_pool, user.user_id, UserRole::Buyer).await?;

  let order_id = path.into_inner();
  let detail = orders::get_order(&app_state.db_pool, user.user_id, order_id).await?;
  Ok(HttpResponse::Ok().json(detail))
}
