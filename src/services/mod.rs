// src/services/mod.rs

//! Domain services. Handlers stay thin; each request-scoped operation lives
//! here and takes the pool plus an explicit caller identity, never ambient
//! session state.

pub mod activity;
pub mod cart;
pub mod catalog;
pub mod notifications;
pub mod orders;
