// src/web/handlers/notification_handlers.rs

use actix_web::{web, HttpResponse};
use tracing::instrument;

use crate::errors::AppError;
use crate::services::notifications;
use crate::state::AppState;
use crate::web::identity::CurrentUser;

/// GET /notifications — the caller's feed, bucketed for display. Any
/// authenticated user has a feed; no role gate.
#[instrument(name = "handler::notification_feed", skip(app_state, user), fields(user_id = %user.user_id))]
pub async fn notification_feed_handler(
  app_state: web::Data<AppState>,
  user: CurrentUser,
) -> Result<HttpResponse, AppError> {
  let feed = notifications::feed(&app_state.db_pool, user.user_id).await?;
  Ok(HttpResponse::Ok().json(feed))
}
