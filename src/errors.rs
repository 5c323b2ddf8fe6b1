// src/errors.rs

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Authentication required: {0}")]
  Auth(String),

  #[error("Invalid input: {0}")]
  InvalidInput(String),

  #[error("Product {0} not found.")]
  ProductNotFound(Uuid),

  #[error("{0} is past its expiry date and can no longer be ordered.")]
  ProductExpired(String),

  #[error("Insufficient stock for {name}: only {available} {unit} left.")]
  InsufficientStock {
    name: String,
    available: i32,
    unit: String,
  },

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

// Allow anyhow::Error to be converted into AppError::Internal for convenience
// in handlers that use `?` on functions returning anyhow::Result.
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    if err.is::<sqlx::Error>() {
      match err.downcast::<sqlx::Error>() {
        Ok(sqlx_err) => AppError::Sqlx(sqlx_err),
        Err(other) => AppError::Internal(other.to_string()),
      }
    } else {
      AppError::Internal(err.to_string())
    }
  }
}

impl AppError {
  /// Message safe to show an untrusted caller. Datastore and internal errors
  /// collapse to a generic line; their detail only goes to the server log.
  pub fn public_message(&self) -> String {
    match self {
      AppError::Sqlx(_) | AppError::Internal(_) | AppError::Config(_) => {
        "Something went wrong on our end. Please try again.".to_string()
      }
      other => other.to_string(),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Auth(_) => StatusCode::UNAUTHORIZED,
      AppError::InvalidInput(_) | AppError::ProductExpired(_) | AppError::InsufficientStock { .. } => {
        StatusCode::BAD_REQUEST
      }
      AppError::ProductNotFound(_) | AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response.
    tracing::error!(application_error = %self, "Responding with error");
    HttpResponse::build(self.status_code()).json(json!({ "error": self.public_message() }))
  }
}

// Define a Result type alias for the application.
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_codes_follow_the_taxonomy() {
    assert_eq!(AppError::Auth("x".into()).status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(
      AppError::InvalidInput("x".into()).status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      AppError::ProductExpired("Eggs".into()).status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      AppError::InsufficientStock {
        name: "Eggs".into(),
        available: 2,
        unit: "dozen".into()
      }
      .status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      AppError::ProductNotFound(Uuid::nil()).status_code(),
      StatusCode::NOT_FOUND
    );
    assert_eq!(
      AppError::Sqlx(sqlx::Error::PoolClosed).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn datastore_detail_never_reaches_the_caller() {
    let err = AppError::Sqlx(sqlx::Error::PoolClosed);
    assert!(!err.public_message().contains("pool"));

    let err = AppError::InsufficientStock {
      name: "Heirloom Tomatoes".into(),
      available: 6,
      unit: "kg".into(),
    };
    assert!(err.public_message().contains("only 6 kg left"));
  }
}
