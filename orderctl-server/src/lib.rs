//! orderctl-server: REST API for orders, products, and their associations
//!
//! Layers, leaf-first:
//! - [`db::schema`]: table definitions, reconcile, reset + seed
//! - [`db::repos`]: `OrderRepo` / `ProductRepo` over a shared `PgPool`
//! - [`http`]: axum routes mapping repository results to JSON responses

pub mod config;
pub mod db;
pub mod http;
pub mod state;

pub use config::{ConfigError, DatabaseConfig};
pub use state::AppState;
