//! Repository implementations for database access
//!
//! Each repository owns a clone of the pool handle and follows these patterns:
//! - Uses a JOIN to load associations (no N+1)
//! - Relies on foreign keys instead of check-then-insert
//! - Uses transactions for multi-step operations

pub mod orders;
pub mod products;

pub use orders::{Order, OrderDetail, OrderProductMap, OrderRepo};
pub use products::{Product, ProductRepo};
