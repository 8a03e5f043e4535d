//! Product repository
//!
//! Products are read-only through the API; rows come from the seed routine.

use sqlx::{FromRow, PgPool};

use crate::db::DbError;

/// Product record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Product {
    pub id: i32,
    pub product_name: String,
    pub product_description: Option<String>,
}

/// Product repository
#[derive(Clone)]
pub struct ProductRepo {
    pool: PgPool,
}

impl ProductRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List every product.
    pub async fn list(&self) -> Result<Vec<Product>, DbError> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, product_name, product_description
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }
}
