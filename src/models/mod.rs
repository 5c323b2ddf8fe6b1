// src/models/mod.rs

//! Contains data structures representing database entities.

pub mod cart_item;
pub mod notification;
pub mod order;
pub mod order_item;
pub mod product;
pub mod user;

// Re-export the model structs for convenient access
pub use cart_item::CartItem;
pub use notification::Notification;
pub use order::{Order, OrderStatus};
pub use order_item::OrderItem;
pub use product::Product;
pub use user::{User, UserRole};
