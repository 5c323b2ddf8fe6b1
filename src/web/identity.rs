// src/web/identity.rs

//! Request-scoped caller identity.
//!
//! Session management lives in the fronting layer; by the time a request
//! reaches this service, the session has been resolved to a user id carried in
//! the `X-User-ID` header. This module consumes that identity and enforces
//! roles — it never issues or refreshes credentials.

use actix_web::{FromRequest, HttpRequest};
use sqlx::PgPool;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{User, UserRole};

#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
  pub user_id: Uuid,
}

impl FromRequest for CurrentUser {
  type Error = AppError;
  type Future = futures_util::future::Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    if let Some(user_id_header) = req.headers().get("X-User-ID") {
      if let Ok(user_id_str) = user_id_header.to_str() {
        if let Ok(user_id) = Uuid::parse_str(user_id_str) {
          return futures_util::future::ready(Ok(CurrentUser { user_id }));
        }
      }
    }
    warn!("CurrentUser extractor: missing or invalid X-User-ID header.");
    futures_util::future::ready(Err(AppError::Auth(
      "You must be signed in to do that.".to_string(),
    )))
  }
}

/// Loads the caller's user row and verifies the role. An unknown id and a
/// wrong role both surface as authentication failures.
#[instrument(name = "identity::require_role", skip(pool), fields(user_id = %user_id, role = %role))]
pub async fn require_role(pool: &PgPool, user_id: Uuid, role: UserRole) -> Result<User, AppError> {
  let user: Option<User> =
    sqlx::query_as("SELECT id, email, display_name, role, created_at, updated_at FROM users WHERE id = $1")
      .bind(user_id)
      .fetch_optional(pool)
      .await?;

  match user {
    Some(user) if user.role == role => Ok(user),
    Some(user) => {
      warn!(actual_role = %user.role, "Role check failed.");
      Err(AppError::Auth(format!("This action requires the {} role.", role)))
    }
    None => Err(AppError::Auth("Unknown user identity.".to_string())),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::dev::Payload;
  use actix_web::test::TestRequest;

  #[actix_web::test]
  async fn extracts_user_id_from_header() {
    let id = Uuid::new_v4();
    let req = TestRequest::default()
      .insert_header(("X-User-ID", id.to_string()))
      .to_http_request();
    let user = CurrentUser::from_request(&req, &mut Payload::None).await.unwrap();
    assert_eq!(user.user_id, id);
  }

  #[actix_web::test]
  async fn missing_header_is_an_auth_error() {
    let req = TestRequest::default().to_http_request();
    let result = CurrentUser::from_request(&req, &mut Payload::None).await;
    assert!(matches!(result, Err(AppError::Auth(_))));
  }

  #[actix_web::test]
  async fn malformed_header_is_an_auth_error() {
    let req = TestRequest::default()
      .insert_header(("X-User-ID", "not-a-uuid"))
      .to_http_request();
    let result = CurrentUser::from_request(&req, &mut Payload::None).await;
    assert!(matches!(result, Err(AppError::Auth(_))));
  }
}
