// src/web/respond.rs

//! Boundary adapter between domain results and the two response modes the
//! cart endpoints serve: JSON for AJAX callers, redirect-with-flash for plain
//! form posts. Domain services know nothing about either.

use actix_web::cookie::Cookie;
use actix_web::http::{header, StatusCode};
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use serde_json::json;

use crate::errors::AppError;
use crate::services::cart::CartAddOutcome;

pub const FLASH_COOKIE: &str = "flash";

/// Where a form post lands when the browser didn't send a referer.
const DEFAULT_RETURN_PATH: &str = "/cart";

/// AJAX callers announce themselves with `X-Requested-With: XMLHttpRequest`.
pub fn wants_json(req: &HttpRequest) -> bool {
  req
    .headers()
    .get("X-Requested-With")
    .and_then(|v| v.to_str().ok())
    .map(|v| v.eq_ignore_ascii_case("XMLHttpRequest"))
    .unwrap_or(false)
}

pub fn cart_success(req: &HttpRequest, outcome: &CartAddOutcome) -> HttpResponse {
  if wants_json(req) {
    HttpResponse::Ok().json(json!({
      "success": true,
      "message": outcome.message,
      "cart_count": outcome.cart_count,
    }))
  } else {
    redirect_back(req, &outcome.message)
  }
}

pub fn cart_failure(req: &HttpRequest, err: &AppError) -> HttpResponse {
  if matches!(err, AppError::Sqlx(_) | AppError::Internal(_)) {
    tracing::error!(error = %err, "Cart request failed.");
  } else {
    tracing::warn!(error = %err, "Cart request rejected.");
  }

  let message = err.public_message();
  if wants_json(req) {
    // A product id that resolves to nothing is a business-rule failure on
    // this endpoint, not a missing route.
    let status = match err {
      AppError::ProductNotFound(_) => StatusCode::BAD_REQUEST,
      other => other.status_code(),
    };
    HttpResponse::build(status).json(json!({ "success": false, "message": message }))
  } else {
    redirect_back(req, &message)
  }
}

/// 303 back to the referring page (or the cart page), with the message
/// flashed in a cookie the next page load consumes.
fn redirect_back(req: &HttpRequest, message: &str) -> HttpResponse {
  let target = req
    .headers()
    .get(header::REFERER)
    .and_then(|v| v.to_str().ok())
    .unwrap_or(DEFAULT_RETURN_PATH)
    .to_string();

  HttpResponse::SeeOther()
    .insert_header((header::LOCATION, target))
    .cookie(flash_cookie(message))
    .finish()
}

pub fn flash_cookie(message: &str) -> Cookie<'static> {
  Cookie::build(FLASH_COOKIE, message.to_owned())
    .path("/")
    .http_only(true)
    .finish()
}

/// Reads and clears the flashed message. Page renderers attach the returned
/// removal cookie so the message shows exactly once.
pub fn take_flash(req: &HttpRequest) -> Option<(String, Cookie<'static>)> {
  let cookie = req.cookie(FLASH_COOKIE)?;
  let message = cookie.value().to_string();
  let mut removal = Cookie::new(FLASH_COOKIE, "");
  removal.set_path("/");
  removal.make_removal();
  Some((message, removal))
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::test::TestRequest;
  use uuid::Uuid;

  fn ajax_request() -> HttpRequest {
    TestRequest::default()
      .insert_header(("X-Requested-With", "XMLHttpRequest"))
      .to_http_request()
  }

  #[actix_web::test]
  async fn wants_json_keys_on_the_requested_with_header() {
    assert!(wants_json(&ajax_request()));
    assert!(!wants_json(&TestRequest::default().to_http_request()));
    let other = TestRequest::default()
      .insert_header(("X-Requested-With", "Fetch"))
      .to_http_request();
    assert!(!wants_json(&other));
  }

  #[actix_web::test]
  async fn ajax_success_is_json_with_count() {
    let outcome = CartAddOutcome {
      message: "Added 4 kg of Heirloom Tomatoes to your cart.".to_string(),
      cart_count: 3,
    };
    let res = cart_success(&ajax_request(), &outcome);
    assert_eq!(res.status(), StatusCode::OK);

    let body = actix_web::body::to_bytes(res.into_body()).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(parsed["success"], true);
    assert_eq!(parsed["cart_count"], 3);
  }

  #[actix_web::test]
  async fn ajax_failure_carries_the_error_status() {
    let err = AppError::InsufficientStock {
      name: "Eggs".to_string(),
      available: 2,
      unit: "dozen".to_string(),
    };
    let res = cart_failure(&ajax_request(), &err);
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let missing = AppError::ProductNotFound(Uuid::new_v4());
    let res = cart_failure(&ajax_request(), &missing);
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let auth = AppError::Auth("no".to_string());
    let res = cart_failure(&ajax_request(), &auth);
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
  }

  #[actix_web::test]
  async fn ajax_datastore_failure_is_generic() {
    let err = AppError::Sqlx(sqlx::Error::PoolClosed);
    let res = cart_failure(&ajax_request(), &err);
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = actix_web::body::to_bytes(res.into_body()).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(parsed["success"], false);
    assert!(!parsed["message"].as_str().unwrap().to_lowercase().contains("pool"));
  }

  #[actix_web::test]
  async fn form_post_redirects_to_referer_with_flash() {
    let req = TestRequest::default()
      .insert_header((header::REFERER, "/products/abc"))
      .to_http_request();
    let outcome = CartAddOutcome {
      message: "Added.".to_string(),
      cart_count: 1,
    };
    let res = cart_success(&req, &outcome);
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/products/abc");

    let flash = res.cookies().find(|c| c.name() == FLASH_COOKIE).unwrap();
    assert_eq!(flash.value(), "Added.");
  }

  #[actix_web::test]
  async fn form_post_without_referer_falls_back_to_cart_page() {
    let req = TestRequest::default().to_http_request();
    let err = AppError::InvalidInput("Quantity must be a positive number.".to_string());
    let res = cart_failure(&req, &err);
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers().get(header::LOCATION).unwrap(), DEFAULT_RETURN_PATH);
  }

  #[actix_web::test]
  async fn take_flash_reads_and_clears() {
    let req = TestRequest::default()
      .cookie(flash_cookie("Added 1 kg of Carrots to your cart."))
      .to_http_request();
    let (message, removal) = take_flash(&req).unwrap();
    assert_eq!(message, "Added 1 kg of Carrots to your cart.");
    assert_eq!(removal.name(), FLASH_COOKIE);

    let bare = TestRequest::default().to_http_request();
    assert!(take_flash(&bare).is_none());
  }
}
