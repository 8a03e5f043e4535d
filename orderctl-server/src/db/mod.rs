//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Bounded connection pool shared through cloned handles, no globals
//! - Detail reads use a JOIN for associations, no N+1 queries
//! - Rely on DB constraints, no check-then-insert
//! - Transactions for multi-step writes

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{create_pool, ping};
pub use repos::*;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}
