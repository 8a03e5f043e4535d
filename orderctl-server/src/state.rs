//! Application state shared across handlers

use std::sync::Arc;

use sqlx::PgPool;

use crate::db::{OrderRepo, ProductRepo};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: PgPool,
    orders: OrderRepo,
    products: ProductRepo,
}

impl AppState {
    /// Build the repositories over one pool. Called once at startup.
    pub fn new(pool: PgPool) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                orders: OrderRepo::new(pool.clone()),
                products: ProductRepo::new(pool.clone()),
                pool,
            }),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    pub fn orders(&self) -> &OrderRepo {
        &self.inner.orders
    }

    pub fn products(&self) -> &ProductRepo {
        &self.inner.products
    }
}
