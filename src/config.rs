// src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

/// How the cart add flow protects its read-check-write sequence against
/// concurrent adds for the same product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartLockStrategy {
  /// Transaction with `SELECT ... FOR UPDATE` on the product and cart rows.
  RowLock,
  /// Single conditional `INSERT ... ON CONFLICT ... DO UPDATE ... WHERE`.
  AtomicUpsert,
}

impl FromStr for CartLockStrategy {
  type Err = String;

  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    match s {
      "row-lock" => Ok(CartLockStrategy::RowLock),
      "atomic-upsert" => Ok(CartLockStrategy::AtomicUpsert),
      other => Err(format!(
        "unknown cart lock strategy '{}' (expected 'row-lock' or 'atomic-upsert')",
        other
      )),
    }
  }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  pub cart_lock_strategy: CartLockStrategy,
  pub run_migrations: bool,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL")?;

    let cart_lock_strategy = get_env("CART_LOCK_STRATEGY")
      .unwrap_or_else(|_| "row-lock".to_string())
      .parse::<CartLockStrategy>()
      .map_err(AppError::Config)?;

    let run_migrations = get_env("RUN_MIGRATIONS")
      .unwrap_or_else(|_| "false".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid RUN_MIGRATIONS value: {}", e)))?;

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      database_url,
      cart_lock_strategy,
      run_migrations,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn lock_strategy_parses_known_values() {
    assert_eq!("row-lock".parse(), Ok(CartLockStrategy::RowLock));
    assert_eq!("atomic-upsert".parse(), Ok(CartLockStrategy::AtomicUpsert));
    assert!("pessimistic".parse::<CartLockStrategy>().is_err());
  }
}
