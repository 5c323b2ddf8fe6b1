// src/web/routes.rs

use actix_web::web;

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// Called in `main.rs` to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1")
      .route("/health", web::get().to(health_check_handler))
      .service(
        web::scope("/products")
          .route(
            "",
            web::get().to(crate::web::handlers::product_handlers::list_products_handler),
          )
          .route(
            "/{product_id}",
            web::get().to(crate::web::handlers::product_handlers::get_product_handler),
          ),
      )
      .service(
        web::scope("/cart")
          .route(
            "",
            web::get().to(crate::web::handlers::cart_handlers::view_cart_handler),
          )
          .route(
            "/add",
            web::post().to(crate::web::handlers::cart_handlers::add_to_cart_handler),
          )
          .route(
            "/count",
            web::get().to(crate::web::handlers::cart_handlers::cart_count_handler),
          )
          .route(
            "/remove",
            web::post().to(crate::web::handlers::cart_handlers::remove_from_cart_handler),
          ),
      )
      .service(
        web::scope("/orders")
          .route(
            "",
            web::post().to(crate::web::handlers::order_handlers::place_order_handler),
          )
          .route(
            "",
            web::get().to(crate::web::handlers::order_handlers::list_orders_handler),
          )
          .route(
            "/{order_id}",
            web::get().to(crate::web::handlers::order_handlers::get_order_handler),
          ),
      )
      .service(web::scope("/notifications").route(
        "",
        web::get().to(crate::web::handlers::notification_handlers::notification_feed_handler),
      )),
  );
}
