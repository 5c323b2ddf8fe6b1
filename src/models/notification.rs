// src/models/notification.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Notification {
  pub id: Uuid,
  pub user_id: Uuid,
  pub category: String,
  pub message: String,
  pub created_at: DateTime<Utc>,
}
