// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type as SqlxType};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, SqlxType)]
#[sqlx(type_name = "user_role_enum", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
  Buyer,
  Farmer,
}

impl fmt::Display for UserRole {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      UserRole::Buyer => write!(f, "buyer"),
      UserRole::Farmer => write!(f, "farmer"),
    }
  }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
  pub id: Uuid,
  pub email: String,
  pub display_name: String,
  pub role: UserRole,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}
