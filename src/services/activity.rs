// src/services/activity.rs

use sqlx::PgPool;
use tracing::{instrument, warn};
use uuid::Uuid;

/// Best-effort audit entry. A failed insert must never fail the action it
/// records, so errors are logged and swallowed here.
#[instrument(name = "activity::record", skip(pool, message), fields(user_id = %user_id, category = %category))]
pub async fn record(pool: &PgPool, user_id: Uuid, category: &str, message: &str) {
  let result = sqlx::query(
    "INSERT INTO activity_log (id, user_id, category, message, created_at) VALUES ($1, $2, $3, $4, NOW())",
  )
  .bind(Uuid::new_v4())
  .bind(user_id)
  .bind(category)
  .bind(message)
  .execute(pool)
  .await;

  if let Err(e) = result {
    warn!(error = %e, "Failed to write activity log entry.");
  }
}
